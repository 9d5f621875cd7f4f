//! Error types raised while compiling and evaluating adaptation rules.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while parsing a rule's condition or adaptation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    /// A clause had no recognised operator.
    #[error("clause '{clause}' has no operator")]
    MissingOperator {
        /// Offending clause text.
        clause: String,
    },
    /// A clause or assignment had an empty side.
    #[error("clause '{clause}' is incomplete")]
    Incomplete {
        /// Offending clause text.
        clause: String,
    },
    /// An attribute path contained characters outside `[a-z0-9_.]`.
    #[error("invalid attribute path '{path}'")]
    InvalidPath {
        /// Offending path.
        path: String,
    },
    /// The attribute path names nothing the evaluator can resolve.
    #[error("unknown attribute '{path}'")]
    UnknownAttribute {
        /// Offending path.
        path: String,
    },
    /// A numeric comparison was given a non-numeric or non-finite value.
    #[error("'{value}' is not a finite number in '{clause}'")]
    InvalidNumber {
        /// Clause or assignment containing the value.
        clause: String,
        /// Offending value.
        value: String,
    },
    /// An adaptation assignment named an unsupported key.
    #[error("unknown adaptation key '{key}'")]
    UnknownAdaptationKey {
        /// Offending key.
        key: String,
    },
    /// An adaptation value did not fit its key.
    #[error("invalid value '{value}' for adaptation key '{key}'")]
    InvalidAdaptationValue {
        /// Adaptation key.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// Errors raised while evaluating a compiled condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleEvaluationError {
    /// The attribute's type does not support the clause's operator or value.
    #[error("attribute '{path}' of type {actual} cannot be compared with '{value}'")]
    TypeMismatch {
        /// Attribute path.
        path: String,
        /// Type of the resolved attribute.
        actual: &'static str,
        /// Literal in the clause.
        value: String,
    },
}

/// Errors that prevent a filter set from being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterBuildError {
    /// The hike date range ends before it starts.
    #[error("hike ends on {end} before it starts on {start}")]
    InvertedDates {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
    /// Merged rules produced a lower bound above its upper bound.
    #[error("conflicting {field} bounds: minimum {min} exceeds maximum {max}")]
    ConflictingBounds {
        /// Bounded attribute.
        field: &'static str,
        /// Merged lower bound.
        min: f64,
        /// Merged upper bound.
        max: f64,
    },
}
