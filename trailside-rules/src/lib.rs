//! Rule evaluation and filter building for the Trailside engine.
//!
//! Rules pair a condition over the user profile and request context with
//! an adaptation that tightens the search. Both halves are parsed once into
//! small ASTs when a [`RuleSet`] is compiled; [`FilterBuilder::build`]
//! evaluates them per request, merges the adaptations that fire into a
//! [`FilterSet`](trailside_core::FilterSet) and normalises durations for
//! single- and multi-day trips.

#![forbid(unsafe_code)]

mod adaptation;
mod attributes;
mod builder;
mod condition;
mod defaults;
mod error;
mod rule_set;

pub use adaptation::{Adaptation, Assignment, DIFFICULTY_MAX, DIFFICULTY_MIN};
pub use attributes::{AttributePath, AttributeValue, Attributes};
pub use builder::{BuildOutcome, FilterBuilder};
pub use condition::Condition;
pub use defaults::default_rules;
pub use error::{FilterBuildError, RuleEvaluationError, RuleParseError};
pub use rule_set::{CompiledRule, RuleSet};
