//! Tunables for the recommendation pipeline.

use std::num::NonZeroUsize;

use crate::RecommendError;

/// Relevance threshold for exact matches at each fallback level.
pub const DEFAULT_THRESHOLDS: [f64; 7] = [60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 0.0];

/// Highest fallback level.
pub const MAX_FALLBACK_LEVEL: u8 = 7;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Last fallback level to try, `1..=7`.
    pub max_level: u8,
    /// Exact-match threshold per level; the last entry repeats for deeper
    /// levels.
    pub thresholds: Vec<f64>,
    /// Suggestions returned when ranking fails.
    pub top_n: usize,
    /// Multiplier on the distance upper bound for multi-day trips.
    pub distance_leniency: f64,
    /// Keep lowering the threshold until an exact match appears, and fall
    /// back to raw scores when ranking fails.
    pub always_return: bool,
    /// Forecast fan-out.
    pub weather: WeatherEnrichmentConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_level: MAX_FALLBACK_LEVEL,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            top_n: 10,
            distance_leniency: trailside_scorer::MULTI_DAY_DISTANCE_LENIENCY,
            always_return: true,
            weather: WeatherEnrichmentConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidConfig`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), RecommendError> {
        let invalid = |reason: &str| {
            Err(RecommendError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };
        if !(1..=MAX_FALLBACK_LEVEL).contains(&self.max_level) {
            return invalid("max_level must be between 1 and 7");
        }
        if self.thresholds.is_empty() {
            return invalid("at least one threshold is required");
        }
        if self
            .thresholds
            .iter()
            .any(|t| !(0.0..=100.0).contains(t))
        {
            return invalid("thresholds must lie in 0..=100");
        }
        if !(self.distance_leniency.is_finite() && self.distance_leniency >= 1.0) {
            return invalid("distance_leniency must be at least 1");
        }
        if self.weather.max_in_flight == 0 {
            return invalid("weather.max_in_flight must be positive");
        }
        Ok(())
    }

    /// Threshold at position `index`, clamped to the last configured entry.
    pub fn threshold_at(&self, index: usize) -> f64 {
        self.thresholds
            .get(index)
            .or_else(|| self.thresholds.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Forecast enrichment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherEnrichmentConfig {
    /// Number of best-scored trails that receive a forecast.
    pub top_k: usize,
    /// Requests allowed in flight at once.
    pub max_in_flight: usize,
    /// Cached forecasts kept for the engine's lifetime.
    pub cache_capacity: NonZeroUsize,
}

impl Default for WeatherEnrichmentConfig {
    fn default() -> Self {
        Self {
            top_k: 20,
            max_in_flight: 10,
            cache_capacity: NonZeroUsize::new(1024).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
