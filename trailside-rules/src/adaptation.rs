//! Adaptation assignments, parsed once and merged into a [`FilterSet`].
//!
//! An adaptation is a list of `key=value` assignments separated by `;`.
//! When several rules fire, upper bounds keep the smallest value, lower
//! bounds keep the largest, flags are OR-ed together, and the landscape
//! filter and display hints take the last value written.

use std::str::FromStr;

use trailside_core::{DisplayMode, DisplaySettings, FilterSet};

use crate::error::RuleParseError;

/// Upper difficulty bound for each named bucket.
pub const DIFFICULTY_MAX: [(&str, f64); 3] = [("easy", 3.0), ("medium", 6.0), ("hard", 10.0)];

/// Lower difficulty bound for each named bucket.
pub const DIFFICULTY_MIN: [(&str, f64); 3] = [("easy", 0.0), ("medium", 3.0), ("hard", 6.0)];

/// One parsed assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// Lower difficulty bound.
    MinDifficulty(f64),
    /// Upper difficulty bound.
    MaxDifficulty(f64),
    /// Lower distance bound in kilometres.
    MinDistance(f64),
    /// Upper distance bound in kilometres.
    MaxDistance(f64),
    /// Lower duration bound in minutes.
    MinDuration(u32),
    /// Upper duration bound in minutes.
    MaxDuration(u32),
    /// Lower elevation-gain bound in metres.
    MinElevation(f64),
    /// Upper elevation-gain bound in metres.
    MaxElevation(f64),
    /// Landscape substring.
    Landscape(String),
    /// Exclude risky trails.
    AvoidRisky(bool),
    /// Surface safety notes.
    ShowSafetyWarnings(bool),
    /// Display density.
    DisplayMode(DisplayMode),
    /// Suggested number of trails to show.
    MaxTrails(u32),
    /// Suppress imagery.
    HideImages(bool),
}

/// Parsed adaptation.
///
/// # Examples
/// ```
/// use trailside_core::{DisplaySettings, FilterSet};
/// use trailside_rules::Adaptation;
///
/// let adaptation = Adaptation::parse("difficulty=medium; avoid_risky=true")?;
/// let mut filters = FilterSet::default();
/// let mut display = DisplaySettings::default();
/// adaptation.apply(&mut filters, &mut display);
///
/// assert_eq!(filters.min_difficulty, Some(3.0));
/// assert_eq!(filters.max_difficulty, Some(6.0));
/// assert!(filters.avoid_risky);
/// # Ok::<(), trailside_rules::RuleParseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adaptation {
    assignments: Vec<Assignment>,
}

impl Adaptation {
    /// Parse an adaptation string.
    pub fn parse(input: &str) -> Result<Self, RuleParseError> {
        let mut assignments = Vec::new();
        for part in input.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim()))
                .ok_or_else(|| RuleParseError::MissingOperator {
                    clause: part.to_owned(),
                })?;
            if key.is_empty() || value.is_empty() {
                return Err(RuleParseError::Incomplete {
                    clause: part.to_owned(),
                });
            }
            parse_assignment(&key, value, &mut assignments)?;
        }
        Ok(Self { assignments })
    }

    /// Parsed assignments in source order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Merge every assignment into the accumulated filters and display hints.
    pub fn apply(&self, filters: &mut FilterSet, display: &mut DisplaySettings) {
        for assignment in &self.assignments {
            match assignment {
                Assignment::MinDifficulty(v) => raise(&mut filters.min_difficulty, *v),
                Assignment::MaxDifficulty(v) => lower(&mut filters.max_difficulty, *v),
                Assignment::MinDistance(v) => raise(&mut filters.min_distance_km, *v),
                Assignment::MaxDistance(v) => lower(&mut filters.max_distance_km, *v),
                Assignment::MinDuration(v) => raise(&mut filters.min_duration_minutes, *v),
                Assignment::MaxDuration(v) => lower(&mut filters.max_duration_minutes, *v),
                Assignment::MinElevation(v) => raise(&mut filters.min_elevation_m, *v),
                Assignment::MaxElevation(v) => lower(&mut filters.max_elevation_m, *v),
                Assignment::Landscape(tag) => filters.landscape = Some(tag.clone()),
                Assignment::AvoidRisky(flag) => filters.avoid_risky |= *flag,
                Assignment::ShowSafetyWarnings(flag) => filters.show_safety_warnings |= *flag,
                Assignment::DisplayMode(mode) => display.display_mode = *mode,
                Assignment::MaxTrails(n) => display.max_trails = Some(*n),
                Assignment::HideImages(flag) => display.hide_images = *flag,
            }
        }
    }
}

fn lower<T: PartialOrd + Copy>(slot: &mut Option<T>, value: T) {
    *slot = Some(match *slot {
        Some(current) if current <= value => current,
        _ => value,
    });
}

fn raise<T: PartialOrd + Copy>(slot: &mut Option<T>, value: T) {
    *slot = Some(match *slot {
        Some(current) if current >= value => current,
        _ => value,
    });
}

fn invalid(key: &str, value: &str) -> RuleParseError {
    RuleParseError::InvalidAdaptationValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

fn number(key: &str, value: &str) -> Result<f64, RuleParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| invalid(key, value))
}

fn minutes(key: &str, value: &str) -> Result<u32, RuleParseError> {
    value.parse::<u32>().map_err(|_| invalid(key, value))
}

fn flag(key: &str, value: &str) -> Result<bool, RuleParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn bucket(table: &[(&str, f64)], value: &str) -> Option<f64> {
    let lowered = value.to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, bound)| *bound)
}

fn difficulty(table: &[(&str, f64)], key: &str, value: &str) -> Result<f64, RuleParseError> {
    bucket(table, value).map_or_else(
        || {
            number(key, value).and_then(|n| {
                if n <= 10.0 {
                    Ok(n)
                } else {
                    Err(invalid(key, value))
                }
            })
        },
        Ok,
    )
}

fn parse_assignment(
    key: &str,
    value: &str,
    out: &mut Vec<Assignment>,
) -> Result<(), RuleParseError> {
    let assignment = match key {
        "difficulty" => {
            let min = bucket(&DIFFICULTY_MIN, value).ok_or_else(|| invalid(key, value))?;
            let max = bucket(&DIFFICULTY_MAX, value).ok_or_else(|| invalid(key, value))?;
            out.push(Assignment::MinDifficulty(min));
            Assignment::MaxDifficulty(max)
        }
        "min_difficulty" => Assignment::MinDifficulty(difficulty(&DIFFICULTY_MIN, key, value)?),
        "max_difficulty" => Assignment::MaxDifficulty(difficulty(&DIFFICULTY_MAX, key, value)?),
        "min_distance" => Assignment::MinDistance(number(key, value)?),
        "max_distance" => Assignment::MaxDistance(number(key, value)?),
        "min_duration" => Assignment::MinDuration(minutes(key, value)?),
        "max_duration" => Assignment::MaxDuration(minutes(key, value)?),
        "min_elevation" => Assignment::MinElevation(number(key, value)?),
        "max_elevation" => Assignment::MaxElevation(number(key, value)?),
        "landscape" => Assignment::Landscape(value.to_owned()),
        "avoid_risky" => Assignment::AvoidRisky(flag(key, value)?),
        "show_safety_warnings" | "show_warnings" => {
            Assignment::ShowSafetyWarnings(flag(key, value)?)
        }
        "display_mode" => Assignment::DisplayMode(
            DisplayMode::from_str(value).map_err(|_| invalid(key, value))?,
        ),
        "max_trails" => match minutes(key, value)? {
            0 => return Err(invalid(key, value)),
            n => Assignment::MaxTrails(n),
        },
        "hide_images" => Assignment::HideImages(flag(key, value)?),
        _ => {
            return Err(RuleParseError::UnknownAdaptationKey {
                key: key.to_owned(),
            });
        }
    };
    out.push(assignment);
    Ok(())
}
