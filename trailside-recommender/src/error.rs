//! Errors surfaced by the recommendation engine.

use thiserror::Error;
use trailside_core::TrailStoreError;

/// Failures that escape the pipeline's own recovery.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Configuration rejected at construction.
    #[error("invalid recommender configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
    /// Every fallback level failed to retrieve candidates.
    #[error("trail store failed at all {levels} fallback levels")]
    StoreUnavailable {
        /// Levels attempted.
        levels: u8,
        /// Last store failure.
        #[source]
        source: TrailStoreError,
    },
}
