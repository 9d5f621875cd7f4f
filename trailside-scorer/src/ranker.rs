//! Hard filtering and exact-match classification of scored trails.

use trailside_core::{
    FilterSet, RankedResult, ScoredTrail, SearchContext, UserProfile, WeatherCategory,
};

use crate::RankingError;

/// Multiplier on the distance upper bound for multi-day trails or requests.
pub const MULTI_DAY_DISTANCE_LENIENCY: f64 = 3.0;

/// Splits scored trails into exact matches and suggestions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    distance_leniency: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(MULTI_DAY_DISTANCE_LENIENCY)
    }
}

impl Ranker {
    /// Ranker applying `distance_leniency` to multi-day distance bounds.
    pub const fn new(distance_leniency: f64) -> Self {
        Self { distance_leniency }
    }

    /// Whether the trail survives the filters no score can override: closed
    /// in the hike season, exposed while the hiker fears heights, or a
    /// stormy forecast.
    pub fn passes_hard_filters(
        scored: &ScoredTrail,
        user: &UserProfile,
        context: &SearchContext,
    ) -> bool {
        let trail = &scored.trail;
        let closed = context
            .effective_season()
            .is_some_and(|season| trail.is_closed_in(season));
        let exposed = user.fear_of_heights && trail.has_heights_exposure();
        let stormy = scored.forecast == Some(WeatherCategory::Stormy);
        !(closed || exposed || stormy)
    }

    /// Keep only the trails passing the hard filters.
    pub fn hard_filter(
        scored: Vec<ScoredTrail>,
        user: &UserProfile,
        context: &SearchContext,
    ) -> Vec<ScoredTrail> {
        scored
            .into_iter()
            .filter(|trail| Self::passes_hard_filters(trail, user, context))
            .collect()
    }

    /// Whether `scored` clears `threshold`, fails no critical criterion and
    /// satisfies the filter bounds directly.
    ///
    /// A trail that could not be scored, or carries a non-finite attribute,
    /// never had its critical criteria evaluated and stays a suggestion.
    pub fn is_exact_match(
        &self,
        scored: &ScoredTrail,
        filters: &FilterSet,
        context: &SearchContext,
        threshold: f64,
    ) -> bool {
        let leniency = if scored.trail.is_multi_day() || context.is_multi_day() {
            self.distance_leniency
        } else {
            1.0
        };
        scored.scoring_error.is_none()
            && scored.trail.is_finite()
            && scored.relevance >= threshold
            && !scored.has_unmatched_critical()
            && filters.bounds_satisfied(&scored.trail, leniency)
    }

    /// Apply the hard filters, classify the survivors and sort both lists.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::NonFiniteRelevance`] when a surviving trail's
    /// relevance is NaN or infinite.
    pub fn rank(
        &self,
        scored: Vec<ScoredTrail>,
        filters: &FilterSet,
        user: &UserProfile,
        context: &SearchContext,
        threshold: f64,
    ) -> Result<RankedResult, RankingError> {
        let mut ranked = RankedResult::default();
        for trail in Self::hard_filter(scored, user, context) {
            if !trail.relevance.is_finite() {
                return Err(RankingError::NonFiniteRelevance {
                    trail_id: trail.trail.id,
                    relevance: trail.relevance,
                });
            }
            if self.is_exact_match(&trail, filters, context, threshold) {
                ranked.exact_matches.push(trail);
            } else {
                ranked.suggestions.push(trail);
            }
        }
        ranked.exact_matches.sort_by(ScoredTrail::ranking_order);
        ranked.suggestions.sort_by(ScoredTrail::ranking_order);
        Ok(ranked)
    }
}
