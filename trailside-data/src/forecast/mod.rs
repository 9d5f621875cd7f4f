//! HTTP forecast provider.
//!
//! [`HttpWeatherProvider`] implements [`trailside_core::WeatherProvider`]
//! against a JSON forecast service:
//!
//! ```text
//! GET {base_url}/forecast?lat={lat}&lon={lon}&date={yyyy-mm-dd}
//! {"status": "ok", "condition": "light rain"}
//! ```
//!
//! The free-text condition is reduced to a
//! [`WeatherCategory`](trailside_core::WeatherCategory); conditions that fit
//! no category are reported as "no data".
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use chrono::NaiveDate;
//! use geo::Coord;
//! use trailside_core::WeatherProvider;
//! use trailside_data::forecast::{HttpWeatherProvider, HttpWeatherProviderConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpWeatherProviderConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(5));
//! let provider = HttpWeatherProvider::with_config(config)?;
//! let date = NaiveDate::from_ymd_opt(2024, 7, 14).ok_or("bad date")?;
//! let forecast = provider.forecast(Coord { x: 7.1, y: 46.2 }, date).await?;
//! # let _ = forecast;
//! # Ok(())
//! # }
//! ```

mod provider;
mod response;

pub use provider::{
    DEFAULT_USER_AGENT, HttpWeatherProvider, HttpWeatherProviderConfig, ProviderBuildError,
};
pub use response::categorise;
