//! Seasons used for trail closures and seasonal matching.
//!
//! # Examples
//! ```
//! use chrono::NaiveDate;
//! use trailside_core::Season;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 7, 14).expect("valid date");
//! assert_eq!(Season::from_date(date), Season::Summer);
//! assert_eq!(Season::Winter.as_str(), "winter");
//! ```

use chrono::{Datelike, NaiveDate};

/// Meteorological season of the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    #[cfg_attr(feature = "serde", serde(alias = "fall"))]
    Autumn,
    /// December to February.
    Winter,
}

impl Season {
    /// Return the season as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    /// Derive the season a calendar date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" | "fall" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(format!("unknown season '{s}'")),
        }
    }
}
