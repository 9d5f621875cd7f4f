//! `WeatherProvider` backed by an HTTP forecast service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use geo::Coord;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use trailside_core::{WeatherCategory, WeatherError, WeatherProvider};
use url::Url;

use super::response::{ForecastResponse, categorise};

/// Error type for [`HttpWeatherProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The base URL is not an absolute URL.
    #[error("invalid forecast service URL '{url}': {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Default user agent for forecast requests.
pub const DEFAULT_USER_AGENT: &str = "trailside-forecast/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpWeatherProvider`].
#[derive(Debug, Clone)]
pub struct HttpWeatherProviderConfig {
    /// Base URL for the forecast service (e.g., `"http://localhost:8080"`).
    pub base_url: String,
    /// Connect and read timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpWeatherProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpWeatherProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP forecast provider.
///
/// The provider is async and holds no runtime of its own; the recommender's
/// weather enrichment drives it. Timeouts surface as
/// [`WeatherError::Timeout`], which callers treat as a missing forecast.
#[derive(Debug, Clone)]
pub struct HttpWeatherProvider {
    client: Client,
    endpoint: Url,
    config: HttpWeatherProviderConfig,
}

impl HttpWeatherProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpWeatherProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpWeatherProviderConfig) -> Result<Self, ProviderBuildError> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/forecast")).map_err(|source| {
            ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Build the forecast URL for a location and day.
    fn forecast_url(&self, location: Coord<f64>, date: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &location.y.to_string())
            .append_pair("lon", &location.x.to_string())
            .append_pair("date", &date.format("%Y-%m-%d").to_string());
        url
    }

    fn convert_reqwest_error(error: &reqwest::Error, url: &Url) -> WeatherError {
        if error.is_timeout() {
            return WeatherError::Timeout {
                url: url.to_string(),
            };
        }
        if let Some(status) = error.status() {
            return WeatherError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        WeatherError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    fn convert_response(
        response: ForecastResponse,
    ) -> Result<Option<WeatherCategory>, WeatherError> {
        if response.is_no_data() {
            return Ok(None);
        }
        if !response.is_ok() {
            return Err(WeatherError::Service {
                status: response.status,
                message: response.message.unwrap_or_default(),
            });
        }
        let Some(condition) = response.condition else {
            return Err(WeatherError::Parse {
                message: "forecast response missing condition".to_owned(),
            });
        };
        let category = categorise(&condition);
        if category.is_none() {
            debug!("no category for forecast condition '{condition}'");
        }
        Ok(category)
    }

    /// Active configuration.
    pub const fn config(&self) -> &HttpWeatherProviderConfig {
        &self.config
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn forecast(
        &self,
        location: Coord<f64>,
        date: NaiveDate,
    ) -> Result<Option<WeatherCategory>, WeatherError> {
        let url = self.forecast_url(location, date);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| Self::convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| Self::convert_reqwest_error(&err, &url))?;
        let body: ForecastResponse =
            response
                .json()
                .await
                .map_err(|err| WeatherError::Parse {
                    message: err.to_string(),
                })?;
        Self::convert_response(body)
    }
}
