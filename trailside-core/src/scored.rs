//! Scoring outcomes shared by the scorer, ranker and recommender.

use std::cmp::Ordering;

use crate::{Trail, WeatherCategory};

/// The eight scoring criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CriterionKind {
    /// Exposure and weather-related risk.
    Safety,
    /// Fit within the available time.
    Duration,
    /// Fit with experience and fitness.
    Difficulty,
    /// Fit with persistence.
    Distance,
    /// Fit of the climb with fitness.
    Elevation,
    /// Overlap with landscape preferences.
    Landscape,
    /// Open during the hike season.
    Season,
    /// Forecast compatibility with the desired weather.
    Weather,
}

impl CriterionKind {
    /// Return the criterion name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Duration => "duration",
            Self::Difficulty => "difficulty",
            Self::Distance => "distance",
            Self::Elevation => "elevation",
            Self::Landscape => "landscape",
            Self::Season => "season",
            Self::Weather => "weather",
        }
    }

    /// Whether failing this criterion rules out an exact match.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Safety | Self::Duration)
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one criterion against one trail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionResult {
    /// Criterion that produced the result.
    pub kind: CriterionKind,
    /// Whether the trail satisfies the criterion.
    pub matches: bool,
    /// Partial credit in `0.0..=1.0`.
    pub score: f64,
    /// Short explanation suitable for display.
    pub message: String,
    /// Weight of the owning criterion, always positive.
    pub weight: f64,
}

/// A trail with its relevance and per-criterion explanation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredTrail {
    /// The scored trail.
    pub trail: Trail,
    /// Weighted relevance in `0.0..=100.0`.
    pub relevance: f64,
    /// Criteria the trail satisfies.
    pub matched: Vec<CriterionResult>,
    /// Criteria the trail fails.
    pub unmatched: Vec<CriterionResult>,
    /// Forecast fetched for the hike date, if any.
    pub forecast: Option<WeatherCategory>,
    /// Scoring fault that forced the neutral relevance, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub scoring_error: Option<String>,
}

impl ScoredTrail {
    /// Whether Safety or Duration is among the unmatched criteria.
    pub fn has_unmatched_critical(&self) -> bool {
        self.unmatched.iter().any(|result| result.kind.is_critical())
    }

    /// Result for `kind`, matched or not.
    pub fn result_for(&self, kind: CriterionKind) -> Option<&CriterionResult> {
        self.matched
            .iter()
            .chain(&self.unmatched)
            .find(|result| result.kind == kind)
    }

    /// Presentation order: relevance descending, popularity descending, then
    /// id ascending so equal trails keep a stable order.
    pub fn ranking_order(a: &Self, b: &Self) -> Ordering {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.trail.popularity.total_cmp(&a.trail.popularity))
            .then_with(|| a.trail.id.cmp(&b.trail.id))
    }
}

/// Ranked output of one classification pass.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedResult {
    /// Trails clearing the threshold with no critical failure.
    pub exact_matches: Vec<ScoredTrail>,
    /// Other trails that survived the hard filters.
    pub suggestions: Vec<ScoredTrail>,
}

impl RankedResult {
    /// Whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty() && self.suggestions.is_empty()
    }
}
