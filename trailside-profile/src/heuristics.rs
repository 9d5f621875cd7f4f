//! Independent scoring heuristics for the seven archetypes.
//!
//! Each heuristic reads [`HistoryStatistics`] and returns a non-negative
//! score. Several apply multiplicative boosts or demotions when the history
//! plausibly fits a neighbouring archetype better; those constants live in
//! [`ClassifierTuning`].

use std::collections::BTreeMap;

use trailside_core::Archetype;

use crate::HistoryStatistics;

/// Numeric constants behind the archetype heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierTuning {
    /// Fewest activities that produce a profile.
    pub min_activities: usize,
    /// Scores closer than this count as tied.
    pub tie_epsilon: f64,
    /// Landscape tags counting as unusual scenery.
    pub rare_landscapes: Vec<String>,
    /// Median elevation gain earning the full elevation component.
    pub elevation_reference_m: f64,
    /// Mean difficulty earning the full difficulty component.
    pub difficulty_reference: f64,
    /// Median gain marking a dedicated climber.
    pub high_elevation_m: f64,
    /// Mean difficulty marking a dedicated climber.
    pub high_difficulty: f64,
    /// Boost for dedicated climbers.
    pub elevation_boost: f64,
    /// Mean distance beyond which flat long hikes penalise climbers.
    pub long_distance_km: f64,
    /// Mean distance earning the full athlete distance component.
    pub athlete_distance_km: f64,
    /// Mean duration earning the full athlete duration component.
    pub athlete_duration_minutes: f64,
    /// Demotion for athletes who look more like climbers or photographers,
    /// and for explorers who look casual.
    pub cross_demotion: f64,
    /// Popularity window favoured by contemplative hikers.
    pub contemplative_window: (f64, f64),
    /// Boost for a strongly scenic, moderately popular history.
    pub contemplative_boost: f64,
    /// Mean distance at which the casual distance component reaches zero.
    pub casual_distance_km: f64,
    /// Mean difficulty at which the casual difficulty component reaches zero.
    pub casual_difficulty: f64,
    /// Boost for short, easy histories.
    pub casual_boost: f64,
    /// Mean difficulty at which the family difficulty component reaches zero.
    pub family_difficulty: f64,
    /// Distinct landscapes earning the full family variety component.
    pub family_distinct_landscapes: f64,
    /// Demotion for casual-looking histories with little variety.
    pub family_demotion: f64,
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            min_activities: 3,
            tie_epsilon: 1e-9,
            rare_landscapes: ["canyon", "cave", "volcano", "desert", "gorge", "wetland", "island"]
                .map(str::to_owned)
                .to_vec(),
            elevation_reference_m: 1200.0,
            difficulty_reference: 8.0,
            high_elevation_m: 1000.0,
            high_difficulty: 6.5,
            elevation_boost: 1.3,
            long_distance_km: 20.0,
            athlete_distance_km: 25.0,
            athlete_duration_minutes: 360.0,
            cross_demotion: 0.7,
            contemplative_window: (0.3, 0.7),
            contemplative_boost: 1.25,
            casual_distance_km: 15.0,
            casual_difficulty: 6.0,
            casual_boost: 1.4,
            family_difficulty: 5.0,
            family_distinct_landscapes: 6.0,
            family_demotion: 0.75,
        }
    }
}

fn unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn within(x: f64, (low, high): (f64, f64)) -> bool {
    (low..=high).contains(&x)
}

/// Score every archetype for `stats`.
pub fn score_archetypes(
    stats: &HistoryStatistics,
    tuning: &ClassifierTuning,
) -> BTreeMap<Archetype, f64> {
    Archetype::ALL
        .into_iter()
        .map(|archetype| {
            let score = match archetype {
                Archetype::Family => family(stats, tuning),
                Archetype::Casual => casual(stats, tuning),
                Archetype::Contemplative => contemplative(stats, tuning),
                Archetype::Photographer => photographer(stats),
                Archetype::Explorer => explorer(stats, tuning),
                Archetype::ElevationSeeker => elevation_seeker(stats, tuning),
                Archetype::PerformanceAthlete => performance_athlete(stats, tuning),
            };
            (archetype, score.max(0.0))
        })
        .collect()
}

fn climber_plausible(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> bool {
    stats.elevation.median >= tuning.high_elevation_m
        && stats.difficulty.mean >= tuning.high_difficulty
}

fn scenic_overlap(stats: &HistoryStatistics) -> f64 {
    0.5 * stats.landscape_share("lake") + 0.5 * stats.landscape_share("peaks")
}

fn photographer_plausible(stats: &HistoryStatistics) -> bool {
    scenic_overlap(stats) >= 0.5 && stats.one_way_ratio >= 0.5
}

fn casual_plausible(stats: &HistoryStatistics) -> bool {
    stats.distance.mean < 6.0 && stats.difficulty.mean < 3.0
}

fn elevation_seeker(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let mut score = 0.6 * unit(stats.elevation.median / tuning.elevation_reference_m)
        + 0.4 * unit(stats.difficulty.mean / tuning.difficulty_reference);
    if stats.distance.mean > tuning.long_distance_km
        && stats.elevation.median < tuning.high_elevation_m
    {
        score -= ((stats.distance.mean - tuning.long_distance_km) / 50.0).min(0.3);
    }
    if climber_plausible(stats, tuning) {
        score *= tuning.elevation_boost;
    }
    score
}

fn performance_athlete(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let consistency = if stats.difficulty.std < 1.0 {
        0.15
    } else if stats.difficulty.std < 1.5 {
        0.05
    } else {
        0.0
    };
    let score = 0.45 * unit(stats.distance.mean / tuning.athlete_distance_km)
        + 0.25 * unit(stats.duration.mean / tuning.athlete_duration_minutes)
        + consistency
        + 0.15 * stats.loop_ratio;
    if climber_plausible(stats, tuning) || photographer_plausible(stats) {
        score * tuning.cross_demotion
    } else {
        score
    }
}

fn contemplative(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let overlap = 0.4 * stats.landscape_share("lake")
        + 0.35 * stats.landscape_share("peaks")
        + 0.25 * stats.landscape_share("glacier");
    let (low, high) = tuning.contemplative_window;
    let popularity = stats.popularity.mean;
    let window = if within(popularity, tuning.contemplative_window) {
        1.0
    } else {
        let distance = if popularity < low {
            low - popularity
        } else {
            popularity - high
        };
        unit(1.0 - 2.0 * distance)
    };
    let score = 0.6 * overlap + 0.4 * window;
    if overlap >= 0.5 && popularity > 0.35 && popularity < 0.65 {
        score * tuning.contemplative_boost
    } else {
        score
    }
}

fn casual(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let score = 0.5 * unit(1.0 - stats.distance.mean / tuning.casual_distance_km)
        + 0.5 * unit(1.0 - stats.difficulty.mean / tuning.casual_difficulty);
    if casual_plausible(stats) {
        score * tuning.casual_boost
    } else {
        score
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "distinct landscape counts are tiny"
)]
fn family(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let distinct = stats.distinct_landscapes as f64;
    let score = 0.4 * unit(1.0 - stats.difficulty.mean / tuning.family_difficulty)
        + 0.4 * stats.safety_none_ratio
        + 0.2 * unit(distinct / tuning.family_distinct_landscapes);
    if casual_plausible(stats) && stats.distinct_landscapes < 3 {
        score * tuning.family_demotion
    } else {
        score
    }
}

fn explorer(stats: &HistoryStatistics, tuning: &ClassifierTuning) -> f64 {
    let score = 0.35 * unit(1.0 - stats.popularity.mean)
        + 0.4 * stats.rare_landscape_ratio
        + 0.25 * stats.risk_acceptance_ratio;
    let family_plausible = stats.difficulty.mean < 3.5 && stats.safety_none_ratio >= 0.8;
    if casual_plausible(stats) || family_plausible {
        score * tuning.cross_demotion
    } else {
        score
    }
}

fn photographer(stats: &HistoryStatistics) -> f64 {
    let median = stats.duration.median;
    let timing = if within(median, (180.0, 360.0)) {
        0.2
    } else if within(median, (120.0, 480.0)) {
        0.1
    } else {
        0.0
    };
    0.5 * scenic_overlap(stats) + 0.3 * stats.one_way_ratio + timing
}
