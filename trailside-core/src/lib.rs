//! Core domain types for the Trailside engine.
//!
//! Trails, hiker profiles and request context flow through the rule
//! evaluator, the scorer and the recommender. This crate defines those
//! records together with the two external seams, [`TrailStore`] for
//! candidate retrieval and [`WeatherProvider`] for forecasts.

mod activity;
mod context;
mod filter;
pub mod multi_day;
mod profile;
mod rule;
mod scored;
mod season;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod trail;
mod weather;

pub use activity::CompletedActivity;
pub use context::{Device, SearchContext};
pub use filter::{DisplayMode, DisplaySettings, FilterSet};
pub use multi_day::MINUTES_PER_DAY;
pub use profile::{Archetype, ExperienceLevel, FitnessLevel, PerformanceRecord, UserProfile};
pub use rule::Rule;
pub use scored::{CriterionKind, CriterionResult, RankedResult, ScoredTrail};
pub use season::Season;
pub use store::{MemoryTrailStore, TrailStore, TrailStoreError};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteTrailStore, SqliteTrailStoreError};
pub use trail::{HEIGHTS_EXPOSURE, MILD_RISK_TAGS, Trail, TrailType};
pub use weather::{OfflineWeatherProvider, WeatherCategory, WeatherError, WeatherProvider};
