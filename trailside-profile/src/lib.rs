//! Behavioural archetype classification from activity history.
//!
//! At least three completed hikes are summarised into [`HistoryStatistics`],
//! seven independent heuristics score the archetypes, and
//! [`select_archetype`] picks one winner deterministically: ties resolve in
//! the order of [`Archetype::ALL`](trailside_core::Archetype::ALL).

#![forbid(unsafe_code)]

mod classifier;
mod heuristics;
mod statistics;
mod summary;

pub use classifier::{ClassifyError, ProfileClassification, ProfileClassifier, select_archetype};
pub use heuristics::{ClassifierTuning, score_archetypes};
pub use statistics::{Hike, HistoryStatistics};
pub use summary::Summary;
