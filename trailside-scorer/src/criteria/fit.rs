//! Criteria judging how well a trail's effort fits the hiker.

use trailside_core::{
    CriterionKind, CriterionResult, ExperienceLevel, FitnessLevel, SearchContext, Trail,
    UserProfile, WeatherCategory, multi_day,
};

use super::{Criterion, NEUTRAL_SCORE, finite, result};
use crate::CriterionError;

/// Difficulty tier derived from experience and fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Novice,
    Intermediate,
    Advanced,
}

impl Tier {
    fn of(user: &UserProfile) -> Self {
        match (user.experience, user.fitness) {
            (ExperienceLevel::Beginner, _) | (_, FitnessLevel::Low) => Self::Novice,
            (ExperienceLevel::Expert, FitnessLevel::High) => Self::Advanced,
            _ => Self::Intermediate,
        }
    }

    const fn range(self) -> (f64, f64) {
        match self {
            Self::Novice => (0.0, 3.5),
            Self::Intermediate => (2.5, 6.5),
            Self::Advanced => (5.0, 10.0),
        }
    }
}

/// Compares trail difficulty with the range suited to the hiker's tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyCriterion {
    weight: f64,
}

impl DifficultyCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for DifficultyCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Difficulty
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        _context: &SearchContext,
        _forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let difficulty = finite(trail, "difficulty", trail.difficulty)?;
        let (low, high) = Tier::of(user).range();
        let kind = self.kind();
        Ok(if difficulty < low {
            let gap = low - difficulty;
            result(
                kind,
                self.weight,
                false,
                (0.6 - 0.1 * gap).max(0.3),
                format!("Too easy: difficulty {difficulty:.1} is below {low:.1}"),
            )
        } else if difficulty > high {
            let gap = difficulty - high;
            result(
                kind,
                self.weight,
                false,
                (0.4 - 0.1 * gap).max(0.0),
                format!("Too hard: difficulty {difficulty:.1} is above {high:.1}"),
            )
        } else {
            result(
                kind,
                self.weight,
                true,
                1.0,
                format!("Difficulty {difficulty:.1} suits your level"),
            )
        })
    }
}

/// Checks the trail fits in the time available.
///
/// Multi-day requests allow up to the end of the last whole day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationCriterion {
    weight: f64,
}

impl DurationCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for DurationCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Duration
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        trail: &Trail,
        _user: &UserProfile,
        context: &SearchContext,
        _forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let kind = self.kind();
        let Some(time_available) = context.time_available else {
            return Ok(result(
                kind,
                self.weight,
                true,
                NEUTRAL_SCORE,
                "No time limit given",
            ));
        };
        let allowance = if context.is_multi_day() {
            multi_day::day_aligned_ceiling(time_available)
        } else {
            time_available
        };
        let duration = trail.duration_minutes;
        if duration > allowance {
            return Ok(result(
                kind,
                self.weight,
                false,
                0.0,
                format!("Takes {duration} min, more than the {allowance} min available"),
            ));
        }
        let utilisation = if allowance == 0 {
            1.0
        } else {
            f64::from(duration) / f64::from(allowance)
        };
        Ok(result(
            kind,
            self.weight,
            true,
            0.5 + 0.5 * utilisation,
            format!("Fits in {allowance} min"),
        ))
    }
}

/// Persistence score assumed when the profile has none.
const DEFAULT_PERSISTENCE: f64 = 0.5;

fn distance_allowance_km(persistence: f64) -> f64 {
    if persistence >= 0.8 {
        25.0
    } else if persistence >= 0.6 {
        18.0
    } else if persistence >= 0.4 {
        12.0
    } else {
        8.0
    }
}

/// Checks the trail length against what the hiker usually sees through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceCriterion {
    weight: f64,
}

impl DistanceCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for DistanceCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Distance
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        context: &SearchContext,
        _forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let distance = finite(trail, "distance", trail.distance_km)?;
        let persistence = user
            .performance
            .persistence_score
            .filter(|score| score.is_finite())
            .unwrap_or(DEFAULT_PERSISTENCE);
        let days = context.trip_days().unwrap_or(1);
        let allowance = distance_allowance_km(persistence) * f64::from(days);
        let kind = self.kind();
        Ok(if distance <= allowance {
            result(
                kind,
                self.weight,
                true,
                1.0,
                format!("{distance:.1} km is within your {allowance:.0} km range"),
            )
        } else {
            result(
                kind,
                self.weight,
                false,
                0.0,
                format!("{distance:.1} km is beyond your {allowance:.0} km range"),
            )
        })
    }
}

/// Checks the climb against the hiker's fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationCriterion {
    weight: f64,
}

impl ElevationCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for ElevationCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Elevation
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        _context: &SearchContext,
        _forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let gain = finite(trail, "elevation gain", trail.elevation_gain_m)?;
        let (matches, score, message) = match user.fitness {
            FitnessLevel::Low => upper_bands(gain, 300.0, 600.0, 0.6),
            FitnessLevel::Medium => upper_bands(gain, 800.0, 1200.0, 0.7),
            FitnessLevel::High if gain < 300.0 => {
                (false, 0.0, format!("Too low: {gain:.0} m of climbing"))
            }
            FitnessLevel::High if gain < 500.0 => {
                (true, 0.7, format!("{gain:.0} m is a modest climb"))
            }
            FitnessLevel::High => (true, 1.0, format!("{gain:.0} m is a proper climb")),
        };
        Ok(result(self.kind(), self.weight, matches, score, message))
    }
}

fn upper_bands(gain: f64, comfortable: f64, tolerable: f64, partial: f64) -> (bool, f64, String) {
    if gain <= comfortable {
        (true, 1.0, format!("{gain:.0} m of climbing is comfortable"))
    } else if gain <= tolerable {
        (true, partial, format!("{gain:.0} m of climbing is demanding"))
    } else {
        (false, 0.0, format!("Too high: {gain:.0} m of climbing"))
    }
}
