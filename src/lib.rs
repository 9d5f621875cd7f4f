//! Facade crate for the Trailside trail recommender.
//!
//! This crate re-exports the domain types, the rule engine, the scorer and
//! the archetype classifier. The request orchestrator and the SQLite trail
//! store sit behind feature flags.

#![forbid(unsafe_code)]

pub use trailside_core::{
    Archetype, CompletedActivity, CriterionKind, CriterionResult, DisplayMode, DisplaySettings,
    ExperienceLevel, FilterSet, FitnessLevel, MemoryTrailStore, OfflineWeatherProvider, Rule,
    ScoredTrail, SearchContext, Season, Trail, TrailStore, TrailStoreError, TrailType,
    UserProfile, WeatherCategory, WeatherError, WeatherProvider,
};

#[cfg(feature = "store-sqlite")]
pub use trailside_core::{SqliteTrailStore, SqliteTrailStoreError};

pub use trailside_profile::{ClassifierTuning, ProfileClassification, ProfileClassifier};
pub use trailside_rules::{FilterBuildError, FilterBuilder, default_rules};
pub use trailside_scorer::{CriteriaSet, CriterionWeights, Ranker, Scorer};

#[cfg(feature = "recommender")]
pub use trailside_recommender::{
    Explanation, Recommendation, RecommendationMetadata, RecommendError, Recommender,
    RecommenderConfig, WeatherEnrichmentConfig,
};
