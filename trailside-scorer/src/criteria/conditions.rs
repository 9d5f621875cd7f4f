//! Criteria judging trail conditions: exposure, season, scenery and weather.

use trailside_core::{
    CriterionKind, CriterionResult, SearchContext, Trail, UserProfile, WeatherCategory,
};

use super::{Criterion, NEUTRAL_SCORE, result};
use crate::CriterionError;

/// Rejects exposure the hiker fears and risky trails in bad weather.
///
/// The forecast takes precedence over the weather the hiker asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyCriterion {
    weight: f64,
}

impl SafetyCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for SafetyCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Safety
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let kind = self.kind();
        if user.fear_of_heights && trail.has_heights_exposure() {
            return Ok(result(
                kind,
                self.weight,
                false,
                0.0,
                "Exposed sections with a drop",
            ));
        }
        let mild = trail.has_only_mild_risks();
        if let Some(weather) = forecast.or(context.weather)
            && weather.is_adverse()
            && !mild
        {
            return Ok(result(
                kind,
                self.weight,
                false,
                0.0,
                format!("Risky in {weather} weather"),
            ));
        }
        Ok(if mild {
            result(kind, self.weight, true, 1.0, "Low risk")
        } else {
            result(kind, self.weight, true, 0.7, "Some risks, acceptable")
        })
    }
}

/// Fails trails closed during the hike season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonCriterion {
    weight: f64,
}

impl SeasonCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for SeasonCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Season
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
        Ok(match context.effective_season() {
            None => result(kind, self.weight, true, 1.0, "No season given"),
            Some(season) if trail.is_closed_in(season) => {
                result(kind, self.weight, false, 0.0, format!("Closed in {season}"))
            }
            Some(season) => result(kind, self.weight, true, 1.0, format!("Open in {season}")),
        })
    }
}

/// Rewards overlap with the hiker's landscape preferences.
///
/// Two or more shared tags earn a bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandscapeCriterion {
    weight: f64,
}

impl LandscapeCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Criterion for LandscapeCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Landscape
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "tag counts are tiny and exact in f64"
    )]
    fn evaluate(
        &self,
        trail: &Trail,
        user: &UserProfile,
        _context: &SearchContext,
        _forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let kind = self.kind();
        if user.preferences.is_empty() {
            return Ok(result(
                kind,
                self.weight,
                true,
                NEUTRAL_SCORE,
                "No landscape preferences",
            ));
        }
        let shared: Vec<&str> = user
            .preferences
            .iter()
            .filter(|pref| {
                trail
                    .landscapes
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(pref))
            })
            .map(String::as_str)
            .collect();
        if shared.is_empty() {
            return Ok(result(
                kind,
                self.weight,
                false,
                0.0,
                "None of your preferred landscapes",
            ));
        }
        let overlap = shared.len() as f64;
        let mut score = overlap / user.preferences.len() as f64;
        if shared.len() >= 2 {
            score *= 1.0 + 0.25 * (overlap - 1.0);
        }
        Ok(result(
            kind,
            self.weight,
            true,
            score.min(1.0),
            format!("Features {}", shared.join(", ")),
        ))
    }
}

/// Compares the forecast with the weather the hiker hopes for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherCriterion {
    weight: f64,
}

impl WeatherCriterion {
    /// Criterion with `weight`.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

fn compatibility(desired: WeatherCategory, forecast: WeatherCategory) -> f64 {
    use WeatherCategory::{Cloudy, Rainy, Sunny};
    match (desired, forecast) {
        _ if desired == forecast => 1.0,
        (Sunny, Cloudy) | (Cloudy, Sunny) => 0.7,
        (Rainy, Cloudy) | (Cloudy, Rainy) => 0.4,
        _ => 0.0,
    }
}

impl Criterion for WeatherCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Weather
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(
        &self,
        _trail: &Trail,
        _user: &UserProfile,
        context: &SearchContext,
        forecast: Option<WeatherCategory>,
    ) -> Result<CriterionResult, CriterionError> {
        let kind = self.kind();
        let (Some(desired), Some(forecast)) = (context.weather, forecast) else {
            return Ok(result(
                kind,
                self.weight,
                true,
                NEUTRAL_SCORE,
                "No forecast to compare",
            ));
        };
        let score = compatibility(desired, forecast);
        Ok(if score > 0.0 {
            result(
                kind,
                self.weight,
                true,
                score,
                format!("Forecast {forecast}, hoped for {desired}"),
            )
        } else {
            result(
                kind,
                self.weight,
                false,
                0.0,
                format!("Forecast {forecast} instead of {desired}"),
            )
        })
    }
}
