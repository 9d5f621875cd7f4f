//! Situational context of a single recommendation request.

use chrono::NaiveDate;

use crate::{Season, WeatherCategory, multi_day};

/// Device the request was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Device {
    /// Desktop browser.
    Desktop,
    /// Phone.
    Mobile,
    /// Tablet.
    Tablet,
}

impl Device {
    /// Return the device as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ephemeral per-request context.
///
/// # Examples
/// ```
/// use trailside_core::{SearchContext, WeatherCategory};
///
/// let context = SearchContext::default()
///     .with_time_available(2880)
///     .with_weather(WeatherCategory::Sunny);
/// assert!(context.is_multi_day());
/// assert_eq!(context.trip_days(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchContext {
    /// Minutes the hiker has available.
    pub time_available: Option<u32>,
    /// Requesting device.
    pub device: Option<Device>,
    /// Weather the hiker hopes for.
    pub weather: Option<WeatherCategory>,
    /// Season of the hike.
    pub season: Option<Season>,
    /// First day of the hike.
    pub hike_start: Option<NaiveDate>,
    /// Last day of the hike.
    pub hike_end: Option<NaiveDate>,
}

impl SearchContext {
    /// Set the available time in minutes.
    #[must_use]
    pub const fn with_time_available(mut self, minutes: u32) -> Self {
        self.time_available = Some(minutes);
        self
    }

    /// Set the desired weather.
    #[must_use]
    pub const fn with_weather(mut self, weather: WeatherCategory) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Set the season explicitly.
    #[must_use]
    pub const fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    /// Set the requesting device.
    #[must_use]
    pub const fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Set the hike dates.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.hike_start = Some(start);
        self.hike_end = Some(end);
        self
    }

    /// Explicit season, or the season of the hike start date.
    pub fn effective_season(&self) -> Option<Season> {
        self.season.or_else(|| self.hike_start.map(Season::from_date))
    }

    /// Whether the request spans at least one full day.
    pub fn is_multi_day(&self) -> bool {
        self.trip_days().is_some()
    }

    /// Whole days available for a multi-day request.
    pub fn trip_days(&self) -> Option<u32> {
        self.time_available.and_then(multi_day::trip_days)
    }

    /// Whether the date range ends before it starts.
    pub fn has_inverted_dates(&self) -> bool {
        matches!((self.hike_start, self.hike_end), (Some(start), Some(end)) if end < start)
    }
}
