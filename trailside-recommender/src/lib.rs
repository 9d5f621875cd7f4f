//! Recommendation orchestration for the Trailside engine.
//!
//! A [`Recommender`] builds a filter set from the hiker's profile and the
//! request, then walks up to seven fallback levels until the trail store
//! returns candidates. Candidates are scored, the best of them are enriched
//! with forecasts, and the ranker splits the survivors of the hard filters
//! into exact matches and suggestions. Every stage recovers from its own
//! faults, so [`Recommender::recommend`] always returns a well-formed
//! [`Recommendation`].

#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod explain;
mod fallback;
mod recommendation;
mod weather;

pub use config::{
    DEFAULT_THRESHOLDS, MAX_FALLBACK_LEVEL, RecommenderConfig, WeatherEnrichmentConfig,
};
pub use engine::Recommender;
pub use error::RecommendError;
pub use explain::Explanation;
pub use fallback::relax;
pub use recommendation::{Recommendation, RecommendationMetadata};
pub use weather::{Enrichment, ForecastKey, WeatherEnricher};

#[cfg(test)]
mod tests;
