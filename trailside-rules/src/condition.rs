//! Condition expressions, parsed once into an AST.
//!
//! ```text
//! condition := clause ( "AND" clause )*
//! clause    := path "<=" number | path ">=" number | path "=" value
//!            | path "CONTAINS" value
//! ```
//!
//! Keywords are case-insensitive. An empty condition always holds.
//!
//! # Examples
//! ```
//! use trailside_core::{ExperienceLevel, FitnessLevel, SearchContext, UserProfile};
//! use trailside_rules::{Attributes, Condition};
//!
//! let condition = Condition::parse("fitness_level=low AND time_available<=60")?;
//! let user = UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low);
//! let context = SearchContext::default().with_time_available(45);
//!
//! assert!(condition.evaluate(&Attributes::new(&user, &context))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::attributes::{AttributePath, AttributeValue, Attributes, is_known};
use crate::error::{RuleEvaluationError, RuleParseError};

/// Parsed condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Holds unconditionally.
    Always,
    /// Attribute equals a literal.
    Equals {
        /// Attribute tested.
        path: AttributePath,
        /// Literal compared against, unquoted.
        value: String,
    },
    /// Numeric attribute is at most `value`.
    LessOrEqual {
        /// Attribute tested.
        path: AttributePath,
        /// Upper bound.
        value: f64,
    },
    /// Numeric attribute is at least `value`.
    GreaterOrEqual {
        /// Attribute tested.
        path: AttributePath,
        /// Lower bound.
        value: f64,
    },
    /// List attribute contains `value`, or text attribute contains it as a
    /// substring.
    Contains {
        /// Attribute tested.
        path: AttributePath,
        /// Member or substring sought, unquoted.
        value: String,
    },
    /// Every inner condition holds.
    And(Vec<Condition>),
}

impl Condition {
    /// Parse a condition expression.
    pub fn parse(input: &str) -> Result<Self, RuleParseError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Self::Always);
        }
        let mut clauses = tokens
            .split(|token| token.eq_ignore_ascii_case("and"))
            .map(|clause| parse_clause(&clause.join(" ")))
            .collect::<Result<Vec<_>, _>>()?;
        if clauses.len() == 1
            && let Some(single) = clauses.pop()
        {
            return Ok(single);
        }
        Ok(Self::And(clauses))
    }

    /// Evaluate against the resolved attributes.
    ///
    /// A clause whose attribute is absent does not hold. Conjunctions stop
    /// at the first clause that does not hold.
    pub fn evaluate(&self, attributes: &Attributes<'_>) -> Result<bool, RuleEvaluationError> {
        match self {
            Self::Always => Ok(true),
            Self::And(clauses) => {
                for clause in clauses {
                    if !clause.evaluate(attributes)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Equals { path, value } => attributes
                .resolve(path)
                .map_or(Ok(false), |actual| equals(path, &actual, value)),
            Self::LessOrEqual { path, value } => attributes
                .resolve(path)
                .map_or(Ok(false), |actual| {
                    as_number(path, &actual, *value).map(|n| n <= *value)
                }),
            Self::GreaterOrEqual { path, value } => attributes
                .resolve(path)
                .map_or(Ok(false), |actual| {
                    as_number(path, &actual, *value).map(|n| n >= *value)
                }),
            Self::Contains { path, value } => attributes
                .resolve(path)
                .map_or(Ok(false), |actual| contains(path, &actual, value)),
        }
    }
}

fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

fn parse_path(raw: &str) -> Result<AttributePath, RuleParseError> {
    let path = AttributePath::parse(raw).ok_or_else(|| RuleParseError::InvalidPath {
        path: raw.trim().to_owned(),
    })?;
    if is_known(&path) {
        Ok(path)
    } else {
        Err(RuleParseError::UnknownAttribute {
            path: path.to_string(),
        })
    }
}

fn parse_number(clause: &str, raw: &str) -> Result<f64, RuleParseError> {
    let value = unquote(raw);
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RuleParseError::InvalidNumber {
            clause: clause.to_owned(),
            value: value.to_owned(),
        })
}

fn split_operands<'a>(
    clause: &str,
    lhs: &'a str,
    rhs: &'a str,
) -> Result<(&'a str, &'a str), RuleParseError> {
    let value = unquote(rhs);
    if lhs.trim().is_empty() || value.is_empty() {
        return Err(RuleParseError::Incomplete {
            clause: clause.to_owned(),
        });
    }
    Ok((lhs, value))
}

fn parse_clause(clause: &str) -> Result<Condition, RuleParseError> {
    let words: Vec<&str> = clause.split(' ').collect();
    if let Some(position) = words
        .iter()
        .position(|word| word.eq_ignore_ascii_case("contains"))
    {
        let lhs = words.get(..position).unwrap_or_default().join(" ");
        let rhs = words.get(position + 1..).unwrap_or_default().join(" ");
        let (lhs, value) = split_operands(clause, &lhs, &rhs)?;
        return Ok(Condition::Contains {
            path: parse_path(lhs)?,
            value: value.to_owned(),
        });
    }
    if let Some((lhs, rhs)) = clause.split_once("<=") {
        let (lhs, value) = split_operands(clause, lhs, rhs)?;
        return Ok(Condition::LessOrEqual {
            path: parse_path(lhs)?,
            value: parse_number(clause, value)?,
        });
    }
    if let Some((lhs, rhs)) = clause.split_once(">=") {
        let (lhs, value) = split_operands(clause, lhs, rhs)?;
        return Ok(Condition::GreaterOrEqual {
            path: parse_path(lhs)?,
            value: parse_number(clause, value)?,
        });
    }
    if let Some((lhs, rhs)) = clause.split_once('=') {
        let (lhs, value) = split_operands(clause, lhs, rhs)?;
        return Ok(Condition::Equals {
            path: parse_path(lhs)?,
            value: value.to_owned(),
        });
    }
    Err(RuleParseError::MissingOperator {
        clause: clause.to_owned(),
    })
}

fn mismatch(
    path: &AttributePath,
    actual: &AttributeValue,
    value: impl ToString,
) -> RuleEvaluationError {
    RuleEvaluationError::TypeMismatch {
        path: path.to_string(),
        actual: actual.type_name(),
        value: value.to_string(),
    }
}

fn as_number(
    path: &AttributePath,
    actual: &AttributeValue,
    literal: f64,
) -> Result<f64, RuleEvaluationError> {
    match actual {
        AttributeValue::Number(n) => Ok(*n),
        other => Err(mismatch(path, other, literal)),
    }
}

fn equals(
    path: &AttributePath,
    actual: &AttributeValue,
    literal: &str,
) -> Result<bool, RuleEvaluationError> {
    match actual {
        AttributeValue::Text(text) => Ok(text.eq_ignore_ascii_case(literal)),
        AttributeValue::Number(n) => literal
            .parse::<f64>()
            .map(|expected| (n - expected).abs() <= f64::EPSILON)
            .map_err(|_| mismatch(path, actual, literal)),
        AttributeValue::Bool(flag) => match literal.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(*flag),
            "false" | "no" | "0" => Ok(!*flag),
            _ => Err(mismatch(path, actual, literal)),
        },
        AttributeValue::List(_) => Err(mismatch(path, actual, literal)),
    }
}

fn contains(
    path: &AttributePath,
    actual: &AttributeValue,
    needle: &str,
) -> Result<bool, RuleEvaluationError> {
    match actual {
        AttributeValue::List(items) => {
            Ok(items.iter().any(|item| item.eq_ignore_ascii_case(needle)))
        }
        AttributeValue::Text(text) => Ok(text.to_lowercase().contains(&needle.to_lowercase())),
        AttributeValue::Number(_) | AttributeValue::Bool(_) => {
            Err(mismatch(path, actual, needle))
        }
    }
}
