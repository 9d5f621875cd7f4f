//! Multi-criteria scoring and ranking for the Trailside engine.
//!
//! Eight criteria judge each candidate trail against the hiker and the
//! request. The [`Scorer`] folds them into a weighted relevance in
//! `0.0..=100.0`, and the [`Ranker`] drops trails that fail a hard filter
//! before splitting the rest into exact matches and suggestions.
//!
//! ```
//! use geo::Coord;
//! use trailside_core::{
//!     ExperienceLevel, FilterSet, FitnessLevel, SearchContext, Trail, UserProfile,
//! };
//! use trailside_scorer::{Ranker, Scorer};
//!
//! let user = UserProfile::new(ExperienceLevel::Intermediate, FitnessLevel::Medium);
//! let context = SearchContext::default().with_time_available(180);
//! let trails = vec![
//!     Trail::new(1, "Short loop", Coord { x: 7.0, y: 46.0 })
//!         .with_difficulty(4.0)
//!         .with_duration_minutes(150),
//!     Trail::new(2, "Long traverse", Coord { x: 7.1, y: 46.1 })
//!         .with_difficulty(4.0)
//!         .with_duration_minutes(400),
//! ];
//!
//! let scored = Scorer::for_user(&user).score_all(trails, &user, &context);
//! let ranked = Ranker::default().rank(scored, &FilterSet::default(), &user, &context, 60.0)?;
//! assert_eq!(ranked.exact_matches.len(), 1);
//! assert_eq!(ranked.suggestions.len(), 1);
//! # Ok::<(), trailside_scorer::RankingError>(())
//! ```

#![forbid(unsafe_code)]

mod criteria;
mod error;
mod ranker;
mod scorer;

pub use criteria::{
    CriteriaSet, Criterion, CriterionWeights, DifficultyCriterion, DistanceCriterion,
    DurationCriterion, ElevationCriterion, LandscapeCriterion, NEUTRAL_SCORE, SafetyCriterion,
    SeasonCriterion, WeatherCriterion,
};
pub use error::{CriterionError, RankingError};
pub use ranker::{MULTI_DAY_DISTANCE_LENIENCY, Ranker};
pub use scorer::{FALLBACK_RELEVANCE, Scorer};
