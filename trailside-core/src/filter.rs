//! Constraint records produced by rule evaluation and widened by fallback.

use crate::Trail;

/// Named, typed bounds used to retrieve and classify trails.
///
/// Every bound is inclusive. A `None` bound is not applied.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailside_core::{FilterSet, Trail};
///
/// let filters = FilterSet {
///     max_difficulty: Some(3.0),
///     max_duration_minutes: Some(60),
///     ..FilterSet::default()
/// };
/// let easy = Trail::new(1, "Meadow", Coord { x: 0.0, y: 0.0 })
///     .with_difficulty(2.0)
///     .with_duration_minutes(45);
/// assert!(filters.admits(&easy));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FilterSet {
    /// Lowest acceptable difficulty.
    pub min_difficulty: Option<f64>,
    /// Highest acceptable difficulty.
    pub max_difficulty: Option<f64>,
    /// Shortest acceptable distance in kilometres.
    pub min_distance_km: Option<f64>,
    /// Longest acceptable distance in kilometres.
    pub max_distance_km: Option<f64>,
    /// Shortest acceptable duration in minutes.
    pub min_duration_minutes: Option<u32>,
    /// Longest acceptable duration in minutes.
    pub max_duration_minutes: Option<u32>,
    /// Lowest acceptable elevation gain in metres.
    pub min_elevation_m: Option<f64>,
    /// Highest acceptable elevation gain in metres.
    pub max_elevation_m: Option<f64>,
    /// Substring one landscape tag must contain.
    pub landscape: Option<String>,
    /// Exclude trails with risks beyond `none` or `low`.
    pub avoid_risky: bool,
    /// Ask the presentation layer to surface safety notes.
    pub show_safety_warnings: bool,
    /// Exclude records that failed data-quality checks.
    pub require_valid: bool,
}

impl FilterSet {
    /// A set that only excludes invalid records.
    pub fn validity_only() -> Self {
        Self {
            require_valid: true,
            ..Self::default()
        }
    }

    /// Whether a distance bound is present.
    pub const fn has_distance_bound(&self) -> bool {
        self.min_distance_km.is_some() || self.max_distance_km.is_some()
    }

    /// Retrieval predicate: every bound, the landscape substring, the risk
    /// and validity flags.
    pub fn admits(&self, trail: &Trail) -> bool {
        if self.require_valid && !trail.valid {
            return false;
        }
        if self.avoid_risky && !trail.has_only_mild_risks() {
            return false;
        }
        self.bounds_satisfied(trail, 1.0)
    }

    /// Classification predicate: numeric bounds and the landscape substring.
    ///
    /// `distance_leniency` multiplies the distance upper bound.
    pub fn bounds_satisfied(&self, trail: &Trail, distance_leniency: f64) -> bool {
        let max_distance = self.max_distance_km.map(|max| max * distance_leniency);
        within(trail.difficulty, self.min_difficulty, self.max_difficulty)
            && within(trail.distance_km, self.min_distance_km, max_distance)
            && within(
                trail.duration_minutes,
                self.min_duration_minutes,
                self.max_duration_minutes,
            )
            && within(
                trail.elevation_gain_m,
                self.min_elevation_m,
                self.max_elevation_m,
            )
            && self
                .landscape
                .as_deref()
                .is_none_or(|needle| trail.landscape_contains(needle))
    }
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Density of the result presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DisplayMode {
    /// Default layout.
    #[default]
    Standard,
    /// Condensed cards, typically on phones.
    Compact,
    /// Full detail.
    Detailed,
}

impl DisplayMode {
    /// Return the mode as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Compact => "compact",
            Self::Detailed => "detailed",
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            "detailed" => Ok(Self::Detailed),
            _ => Err(format!("unknown display mode '{s}'")),
        }
    }
}

/// Presentation hints extracted from rule adaptations.
///
/// These never influence retrieval or scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DisplaySettings {
    /// Layout density.
    pub display_mode: DisplayMode,
    /// Suggested cap on the number of trails shown.
    pub max_trails: Option<u32>,
    /// Suppress imagery.
    pub hide_images: bool,
}
