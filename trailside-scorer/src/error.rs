//! Errors raised while scoring and ranking trails.

use thiserror::Error;
use trailside_core::CriterionKind;

/// A criterion could not evaluate a trail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriterionError {
    /// A numeric trail attribute was NaN or infinite.
    #[error("trail {trail_id} has a non-finite {attribute}")]
    NonFinite {
        /// Affected trail.
        trail_id: u64,
        /// Attribute that failed the check.
        attribute: &'static str,
    },
    /// A configured weight was not a positive finite number.
    #[error("weight {weight} for {kind} must be positive and finite")]
    InvalidWeight {
        /// Criterion carrying the weight.
        kind: CriterionKind,
        /// Rejected value.
        weight: f64,
    },
}

/// The ranker could not order the scored trails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// A relevance value was NaN or infinite.
    #[error("trail {trail_id} has non-finite relevance {relevance}")]
    NonFiniteRelevance {
        /// Affected trail.
        trail_id: u64,
        /// Offending value.
        relevance: f64,
    },
}
