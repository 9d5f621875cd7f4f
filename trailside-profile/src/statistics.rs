//! Statistics over a hiker's completed activities.

use std::collections::{BTreeMap, BTreeSet};

use trailside_core::{CompletedActivity, Trail, TrailType};

use crate::Summary;

/// One completed hike joined with its trail.
#[derive(Debug, Clone, Copy)]
pub struct Hike<'a> {
    /// The activity record.
    pub activity: &'a CompletedActivity,
    /// The trail it was completed on.
    pub trail: &'a Trail,
}

impl Hike<'_> {
    /// Recorded duration, falling back to the trail's nominal one.
    pub fn duration_minutes(&self) -> u32 {
        self.activity
            .duration_minutes
            .unwrap_or(self.trail.duration_minutes)
    }
}

/// Aggregates the archetype heuristics read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStatistics {
    /// Number of hikes summarised.
    pub hike_count: usize,
    /// Elevation gain in metres.
    pub elevation: Summary,
    /// Difficulty on the `0..=10` scale.
    pub difficulty: Summary,
    /// Distance in kilometres.
    pub distance: Summary,
    /// Duration in minutes.
    pub duration: Summary,
    /// Trail popularity.
    pub popularity: Summary,
    /// Share of hikes carrying each landscape tag, keyed lowercase.
    pub landscape_frequency: BTreeMap<String, f64>,
    /// Share of hikes carrying each safety tag, keyed lowercase.
    pub safety_frequency: BTreeMap<String, f64>,
    /// Share of loop trails.
    pub loop_ratio: f64,
    /// Share of one-way trails.
    pub one_way_ratio: f64,
    /// Share of hikes with no safety risk at all.
    pub safety_none_ratio: f64,
    /// Share of hikes with a risk beyond `none` or `low`.
    pub risk_acceptance_ratio: f64,
    /// Share of hikes through at least one rare landscape.
    pub rare_landscape_ratio: f64,
    /// Number of distinct landscape tags seen.
    pub distinct_landscapes: usize,
}

impl HistoryStatistics {
    /// Compute statistics over `hikes`, treating `rare` tags as unusual
    /// scenery.
    #[expect(
        clippy::cast_precision_loss,
        reason = "hike counts are far below 2^52"
    )]
    pub fn compute(hikes: &[Hike<'_>], rare: &[String]) -> Self {
        if hikes.is_empty() {
            return Self::default();
        }
        let count = hikes.len() as f64;
        let share = |predicate: &dyn Fn(&Hike<'_>) -> bool| {
            hikes.iter().filter(|hike| predicate(hike)).count() as f64 / count
        };

        let mut landscape_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut safety_counts: BTreeMap<String, usize> = BTreeMap::new();
        for hike in hikes {
            let landscapes: BTreeSet<String> = hike
                .trail
                .landscapes
                .iter()
                .map(|tag| tag.to_lowercase())
                .collect();
            for tag in landscapes {
                *landscape_counts.entry(tag).or_default() += 1;
            }
            let risks: BTreeSet<String> = hike
                .trail
                .safety_risks
                .iter()
                .map(|tag| tag.to_lowercase())
                .collect();
            for tag in risks {
                *safety_counts.entry(tag).or_default() += 1;
            }
        }
        let to_share = |counts: BTreeMap<String, usize>| -> BTreeMap<String, f64> {
            counts
                .into_iter()
                .map(|(tag, n)| (tag, n as f64 / count))
                .collect()
        };

        Self {
            hike_count: hikes.len(),
            elevation: Summary::of(hikes.iter().map(|h| h.trail.elevation_gain_m)),
            difficulty: Summary::of(hikes.iter().map(|h| h.trail.difficulty)),
            distance: Summary::of(hikes.iter().map(|h| h.trail.distance_km)),
            duration: Summary::of(hikes.iter().map(|h| f64::from(h.duration_minutes()))),
            popularity: Summary::of(hikes.iter().map(|h| h.trail.popularity)),
            distinct_landscapes: landscape_counts.len(),
            landscape_frequency: to_share(landscape_counts),
            safety_frequency: to_share(safety_counts),
            loop_ratio: share(&|h| h.trail.trail_type == TrailType::Loop),
            one_way_ratio: share(&|h| h.trail.trail_type == TrailType::OneWay),
            safety_none_ratio: share(&|h| {
                h.trail
                    .safety_risks
                    .iter()
                    .all(|tag| tag.eq_ignore_ascii_case("none"))
            }),
            risk_acceptance_ratio: share(&|h| !h.trail.has_only_mild_risks()),
            rare_landscape_ratio: share(&|h| {
                rare.iter().any(|tag| h.trail.landscape_contains(tag))
            }),
        }
    }

    /// Share of hikes carrying the landscape `tag`, ignoring case.
    pub fn landscape_share(&self, tag: &str) -> f64 {
        self.landscape_frequency
            .get(&tag.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }
}
