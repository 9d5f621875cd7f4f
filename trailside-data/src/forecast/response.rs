//! Forecast service response types.

use serde::Deserialize;
use trailside_core::WeatherCategory;

/// Forecast endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    /// `"ok"`, `"no_data"` or an error code.
    pub status: String,
    /// Error description when `status` is not `"ok"`.
    #[serde(default)]
    pub message: Option<String>,
    /// Free-text condition, e.g. `"light rain"`.
    #[serde(default)]
    pub condition: Option<String>,
}

impl ForecastResponse {
    pub(crate) fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    pub(crate) fn is_no_data(&self) -> bool {
        self.status.eq_ignore_ascii_case("no_data")
    }
}

/// Keywords per category, most severe first so "rain and thunder" is a
/// storm rather than rain.
const KEYWORDS: [(WeatherCategory, &[&str]); 5] = [
    (WeatherCategory::Stormy, &["thunder", "storm"]),
    (WeatherCategory::Snowy, &["snow", "sleet", "blizzard"]),
    (WeatherCategory::Rainy, &["rain", "drizzle", "shower"]),
    (WeatherCategory::Cloudy, &["cloud", "overcast", "fog", "mist"]),
    (WeatherCategory::Sunny, &["clear", "sun", "fair"]),
];

/// Reduce a free-text condition to a category.
///
/// # Examples
/// ```
/// use trailside_core::WeatherCategory;
/// use trailside_data::forecast::categorise;
///
/// assert_eq!(categorise("Light rain showers"), Some(WeatherCategory::Rainy));
/// assert_eq!(categorise("Rain with thunder"), Some(WeatherCategory::Stormy));
/// assert_eq!(categorise("volcanic ash"), None);
/// ```
pub fn categorise(condition: &str) -> Option<WeatherCategory> {
    let condition = condition.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| condition.contains(word)))
        .map(|(category, _)| *category)
}
