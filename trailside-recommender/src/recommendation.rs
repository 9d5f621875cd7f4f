//! Engine output.

use trailside_core::{DisplaySettings, Rule, ScoredTrail};

use crate::Explanation;

/// How a recommendation was produced.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationMetadata {
    /// Candidates retrieved at the exit level.
    pub candidate_count: usize,
    /// Fallback level the search stopped at, `1..=7`.
    pub fallback_level: u8,
    /// Exact-match threshold of the final ranking.
    pub threshold: f64,
    /// Trails that received a forecast.
    pub weather_fetched_count: usize,
    /// Recovered faults, in the order they happened.
    pub warnings: Vec<String>,
    /// Fault that stopped the pipeline, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

/// Recommended trails with the reasoning behind them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// Trails meeting every constraint at the final threshold.
    pub exact_matches: Vec<ScoredTrail>,
    /// Other trails worth showing.
    pub suggestions: Vec<ScoredTrail>,
    /// Rules that fired for this request.
    pub activated_rules: Vec<Rule>,
    /// Presentation hints from the rules.
    pub display_settings: DisplaySettings,
    /// One explanation per returned trail, exact matches first.
    pub explanations: Vec<Explanation>,
    /// Diagnostics.
    pub metadata: RecommendationMetadata,
}

impl Recommendation {
    /// Empty, well-formed result carrying `error`.
    pub fn failed(error: impl std::fmt::Display, warnings: Vec<String>) -> Self {
        Self {
            metadata: RecommendationMetadata {
                fallback_level: 1,
                warnings,
                error: Some(error.to_string()),
                ..RecommendationMetadata::default()
            },
            ..Self::default()
        }
    }

    /// Whether nothing was recommended.
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty() && self.suggestions.is_empty()
    }

    /// Every returned trail, exact matches first.
    pub fn trails(&self) -> impl Iterator<Item = &ScoredTrail> {
        self.exact_matches.iter().chain(&self.suggestions)
    }
}
