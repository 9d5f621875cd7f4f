//! Weather categories and the forecast provider seam.
//!
//! Forecasts are coarse: a provider reduces whatever its upstream service
//! reports to one [`WeatherCategory`] per location and day. A provider that
//! cannot answer returns `Ok(None)`; callers treat that as neutral.

use async_trait::async_trait;
use chrono::NaiveDate;
use geo::Coord;
use thiserror::Error;

/// Coarse weather condition for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum WeatherCategory {
    /// Clear skies.
    Sunny,
    /// Overcast or partly cloudy.
    Cloudy,
    /// Rain, drizzle or showers.
    Rainy,
    /// Snow or sleet.
    Snowy,
    /// Thunderstorms or storm warnings.
    Stormy,
}

impl WeatherCategory {
    /// Return the category as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Stormy => "stormy",
        }
    }

    /// Whether the condition makes exposed or risky terrain unsafe.
    pub const fn is_adverse(self) -> bool {
        matches!(self, Self::Rainy | Self::Snowy | Self::Stormy)
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeatherCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunny" => Ok(Self::Sunny),
            "cloudy" => Ok(Self::Cloudy),
            "rainy" => Ok(Self::Rainy),
            "snowy" => Ok(Self::Snowy),
            "stormy" | "storm" => Ok(Self::Stormy),
            _ => Err(format!("unknown weather category '{s}'")),
        }
    }
}

/// Errors raised while fetching a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The request did not complete before the configured timeout.
    #[error("forecast request to {url} timed out")]
    Timeout {
        /// Endpoint that timed out.
        url: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("forecast service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint that failed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("forecast request to {url} failed: {message}")]
    Network {
        /// Endpoint that failed.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to decode forecast response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service reported an error in its payload.
    #[error("forecast service error {status}: {message}")]
    Service {
        /// Status string reported by the service.
        status: String,
        /// Accompanying message.
        message: String,
    },
}

/// Fetch a coarse forecast for a location and day.
///
/// Coordinates use WGS84 with `x = longitude` and `y = latitude`.
/// Implementations must be shareable across the concurrent fan-out the
/// recommender performs.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use trailside_core::{WeatherCategory, WeatherError, WeatherProvider};
///
/// struct AlwaysSunny;
///
/// #[async_trait]
/// impl WeatherProvider for AlwaysSunny {
///     async fn forecast(
///         &self,
///         _location: Coord<f64>,
///         _date: NaiveDate,
///     ) -> Result<Option<WeatherCategory>, WeatherError> {
///         Ok(Some(WeatherCategory::Sunny))
///     }
/// }
/// ```
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Return the forecast category, or `None` when the service has no data.
    async fn forecast(
        &self,
        location: Coord<f64>,
        date: NaiveDate,
    ) -> Result<Option<WeatherCategory>, WeatherError>;
}

#[async_trait]
impl<T: WeatherProvider + ?Sized> WeatherProvider for Box<T> {
    async fn forecast(
        &self,
        location: Coord<f64>,
        date: NaiveDate,
    ) -> Result<Option<WeatherCategory>, WeatherError> {
        (**self).forecast(location, date).await
    }
}

/// Provider that never has forecast data.
///
/// Used when no forecast service is configured; every trail is scored with
/// a neutral weather outlook.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineWeatherProvider;

#[async_trait]
impl WeatherProvider for OfflineWeatherProvider {
    async fn forecast(
        &self,
        _location: Coord<f64>,
        _date: NaiveDate,
    ) -> Result<Option<WeatherCategory>, WeatherError> {
        Ok(None)
    }
}
