//! Weighted aggregation of criterion results into a relevance score.

use log::warn;
use trailside_core::{
    CriterionResult, ScoredTrail, SearchContext, Trail, UserProfile, WeatherCategory,
};

use crate::{CriteriaSet, CriterionError};

/// Relevance assigned when a trail cannot be scored.
pub const FALLBACK_RELEVANCE: f64 = 50.0;

/// Scores trails against every criterion in a [`CriteriaSet`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailside_core::{ExperienceLevel, FitnessLevel, SearchContext, Trail, UserProfile};
/// use trailside_scorer::Scorer;
///
/// let scorer = Scorer::default();
/// let trail = Trail::new(1, "Lake loop", Coord { x: 7.0, y: 46.0 })
///     .with_difficulty(2.0)
///     .with_duration_minutes(60);
/// let user = UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low);
/// let scored = scorer.score(trail, &user, &SearchContext::default(), None);
///
/// assert!((0.0..=100.0).contains(&scored.relevance));
/// assert_eq!(scored.matched.len() + scored.unmatched.len(), 8);
/// ```
#[derive(Debug, Default)]
pub struct Scorer {
    criteria: CriteriaSet,
}

impl Scorer {
    /// Scorer over `criteria`.
    pub const fn new(criteria: CriteriaSet) -> Self {
        Self { criteria }
    }

    /// Scorer weighted for the profile's archetype.
    #[must_use]
    pub fn for_user(user: &UserProfile) -> Self {
        Self::new(CriteriaSet::for_archetype(user.archetype))
    }

    /// Criteria in use.
    pub const fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    /// Score one trail. A criterion fault yields the neutral relevance with
    /// the fault recorded on the result.
    pub fn score(
        &self,
        trail: Trail,
        user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> ScoredTrail {
        match self.try_score(&trail, user, context, forecast) {
            Ok((relevance, matched, unmatched)) => ScoredTrail {
                trail,
                relevance,
                matched,
                unmatched,
                forecast,
                scoring_error: None,
            },
            Err(err) => {
                warn!("scoring trail {} failed: {err}", trail.id);
                ScoredTrail {
                    trail,
                    relevance: FALLBACK_RELEVANCE,
                    matched: Vec::new(),
                    unmatched: Vec::new(),
                    forecast,
                    scoring_error: Some(err.to_string()),
                }
            }
        }
    }

    /// Score every trail without a forecast.
    pub fn score_all<I>(
        &self,
        trails: I,
        user: &UserProfile,
        context: &SearchContext,
    ) -> Vec<ScoredTrail>
    where
        I: IntoIterator<Item = Trail>,
    {
        trails
            .into_iter()
            .map(|trail| self.score(trail, user, context, None))
            .collect()
    }

    /// Score `scored` again with a forecast, keeping the trail.
    pub fn rescore(
        &self,
        scored: ScoredTrail,
        user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> ScoredTrail {
        self.score(scored.trail, user, context, forecast)
    }

    fn try_score(
        &self,
        trail: &Trail,
        user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> Result<Scores, CriterionError> {
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        let mut earned = 0.0;
        let mut total = 0.0;
        for criterion in self.criteria.iter() {
            let outcome = criterion.evaluate(trail, user, context, forecast)?;
            total += outcome.weight;
            if outcome.matches {
                earned += outcome.score * outcome.weight;
                matched.push(outcome);
            } else {
                unmatched.push(outcome);
            }
        }
        let relevance = if total > 0.0 {
            (100.0 * earned / total).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Ok((relevance, matched, unmatched))
    }
}

type Scores = (f64, Vec<CriterionResult>, Vec<CriterionResult>);
