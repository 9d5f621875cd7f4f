//! Archetype classification over a hiker's activity history.

use std::collections::BTreeMap;

use log::{debug, warn};
use thiserror::Error;
use trailside_core::{Archetype, CompletedActivity, TrailStore, TrailStoreError, UserProfile};

use crate::{ClassifierTuning, Hike, HistoryStatistics, score_archetypes};

/// Classification failed before any statistics could be computed.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Looking up a completed trail failed.
    #[error("failed to look up trail {trail_id}")]
    TrailLookup {
        /// Trail being resolved.
        trail_id: u64,
        /// Store failure.
        #[source]
        source: TrailStoreError,
    },
}

/// Winning archetype with the full score map and the statistics behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileClassification {
    /// Highest-scoring archetype after the tie-break.
    pub archetype: Archetype,
    /// Score of every archetype.
    pub scores: BTreeMap<Archetype, f64>,
    /// Statistics the scores were computed from.
    pub statistics: HistoryStatistics,
}

impl ProfileClassification {
    /// Record the archetype, score map and hike count on `user`.
    pub fn apply_to(&self, user: &mut UserProfile) {
        user.archetype = Some(self.archetype);
        user.archetype_scores.clone_from(&self.scores);
        user.performance.completed_hikes =
            u32::try_from(self.statistics.hike_count).unwrap_or(u32::MAX);
    }
}

/// Pick the highest score, resolving ties within `epsilon` in favour of
/// the archetype listed first in [`Archetype::ALL`].
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use trailside_core::Archetype;
/// use trailside_profile::select_archetype;
///
/// let scores = BTreeMap::from([
///     (Archetype::Explorer, 0.8),
///     (Archetype::Casual, 0.8),
///     (Archetype::Family, 0.2),
/// ]);
/// assert_eq!(select_archetype(&scores, 1e-9), Some(Archetype::Casual));
/// ```
pub fn select_archetype(scores: &BTreeMap<Archetype, f64>, epsilon: f64) -> Option<Archetype> {
    let finite = |archetype: &Archetype| {
        scores
            .get(archetype)
            .copied()
            .filter(|score| score.is_finite())
    };
    let top = Archetype::ALL
        .iter()
        .filter_map(finite)
        .reduce(f64::max)?;
    Archetype::ALL
        .into_iter()
        .find(|archetype| finite(archetype).is_some_and(|score| top - score <= epsilon))
}

/// Classifies hikers from their completed activities.
#[derive(Debug, Clone, Default)]
pub struct ProfileClassifier {
    tuning: ClassifierTuning,
}

impl ProfileClassifier {
    /// Classifier using `tuning`.
    pub const fn new(tuning: ClassifierTuning) -> Self {
        Self { tuning }
    }

    /// Constants in use.
    pub const fn tuning(&self) -> &ClassifierTuning {
        &self.tuning
    }

    /// Classify `activities`, resolving each trail through `store`.
    ///
    /// Activities whose trail is unknown are skipped. Returns `Ok(None)`
    /// when fewer than the minimum number of activities remain.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::TrailLookup`] when the store fails.
    pub fn classify<S>(
        &self,
        activities: &[CompletedActivity],
        store: &S,
    ) -> Result<Option<ProfileClassification>, ClassifyError>
    where
        S: TrailStore + ?Sized,
    {
        if activities.len() < self.tuning.min_activities {
            debug!("{} activities is too few to classify", activities.len());
            return Ok(None);
        }
        let mut resolved = Vec::with_capacity(activities.len());
        for activity in activities {
            let trail_id = activity.trail_id;
            match store
                .get(trail_id)
                .map_err(|source| ClassifyError::TrailLookup { trail_id, source })?
            {
                Some(trail) => resolved.push((activity, trail)),
                None => warn!("activity references unknown trail {trail_id}"),
            }
        }
        let hikes: Vec<Hike<'_>> = resolved
            .iter()
            .map(|(activity, trail)| Hike {
                activity: *activity,
                trail,
            })
            .collect();
        Ok(self.classify_hikes(&hikes))
    }

    /// Classify hikes already joined with their trails.
    pub fn classify_hikes(&self, hikes: &[Hike<'_>]) -> Option<ProfileClassification> {
        if hikes.len() < self.tuning.min_activities {
            return None;
        }
        let statistics = HistoryStatistics::compute(hikes, &self.tuning.rare_landscapes);
        let scores = score_archetypes(&statistics, &self.tuning);
        let archetype = select_archetype(&scores, self.tuning.tie_epsilon)?;
        debug!("classified {} hikes as {}", hikes.len(), archetype.as_str());
        Some(ProfileClassification {
            archetype,
            scores,
            statistics,
        })
    }
}
