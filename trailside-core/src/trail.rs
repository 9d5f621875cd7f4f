use std::collections::BTreeSet;

use geo::Coord;

use crate::{MINUTES_PER_DAY, Season};

/// Safety tag marking exposed sections with a drop.
pub const HEIGHTS_EXPOSURE: &str = "heights_exposure";

/// Safety tags that do not count as a risk.
pub const MILD_RISK_TAGS: [&str; 2] = ["none", "low"];

/// Shape of a trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TrailType {
    /// Returns to its starting point.
    #[default]
    Loop,
    /// Ends away from its starting point.
    OneWay,
}

impl TrailType {
    /// Return the trail type as a `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::OneWay => "one_way",
        }
    }
}

impl std::fmt::Display for TrailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrailType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "one_way" | "one-way" | "oneway" => Ok(Self::OneWay),
            _ => Err(format!("unknown trail type '{s}'")),
        }
    }
}

/// A hiking trail as retrieved from a [`TrailStore`](crate::TrailStore).
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Tags are
/// lowercase free-form strings such as `lake` or `heights_exposure`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailside_core::Trail;
///
/// let trail = Trail::new(1, "Lac Bleu", Coord { x: 7.4, y: 46.1 })
///     .with_difficulty(4.0)
///     .with_duration_minutes(180)
///     .with_landscape("lake");
///
/// assert!(!trail.is_multi_day());
/// assert!(trail.landscapes.contains("lake"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trail {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Difficulty on a 0–10 scale.
    pub difficulty: f64,
    /// Length in kilometres.
    pub distance_km: f64,
    /// Expected walking time in minutes.
    pub duration_minutes: u32,
    /// Cumulative ascent in metres.
    pub elevation_gain_m: f64,
    /// Landscape tags such as `lake`, `forest` or `peaks`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landscapes: BTreeSet<String>,
    /// Loop or one-way.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trail_type: TrailType,
    /// Safety tags such as `none`, `low` or `heights_exposure`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub safety_risks: BTreeSet<String>,
    /// Relative popularity in `0.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: f64,
    /// Seasons during which the trail is closed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closed_seasons: BTreeSet<Season>,
    /// Trailhead position.
    pub location: Coord<f64>,
    /// Whether the record passed data-quality checks.
    #[cfg_attr(feature = "serde", serde(default = "default_valid"))]
    pub valid: bool,
}

#[cfg(feature = "serde")]
const fn default_valid() -> bool {
    true
}

impl Trail {
    /// Construct a valid trail with zeroed measurements and no tags.
    pub fn new(id: u64, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            difficulty: 0.0,
            distance_km: 0.0,
            duration_minutes: 0,
            elevation_gain_m: 0.0,
            landscapes: BTreeSet::new(),
            trail_type: TrailType::Loop,
            safety_risks: BTreeSet::new(),
            popularity: 0.0,
            closed_seasons: BTreeSet::new(),
            location,
            valid: true,
        }
    }

    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the distance in kilometres.
    #[must_use]
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Set the duration in minutes.
    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the elevation gain in metres.
    #[must_use]
    pub fn with_elevation_gain_m(mut self, metres: f64) -> Self {
        self.elevation_gain_m = metres;
        self
    }

    /// Add a landscape tag.
    #[must_use]
    pub fn with_landscape(mut self, tag: impl Into<String>) -> Self {
        self.landscapes.insert(tag.into());
        self
    }

    /// Add a safety tag.
    #[must_use]
    pub fn with_safety_risk(mut self, tag: impl Into<String>) -> Self {
        self.safety_risks.insert(tag.into());
        self
    }

    /// Set the trail type.
    #[must_use]
    pub fn with_trail_type(mut self, trail_type: TrailType) -> Self {
        self.trail_type = trail_type;
        self
    }

    /// Set the popularity.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    /// Mark the trail closed during `season`.
    #[must_use]
    pub fn with_closed_season(mut self, season: Season) -> Self {
        self.closed_seasons.insert(season);
        self
    }

    /// Mark the record as failing data-quality checks.
    #[must_use]
    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    /// Whether the trail takes at least a full day.
    pub const fn is_multi_day(&self) -> bool {
        self.duration_minutes >= MINUTES_PER_DAY
    }

    /// Whether the trail has exposed sections.
    pub fn has_heights_exposure(&self) -> bool {
        self.safety_risks.contains(HEIGHTS_EXPOSURE)
    }

    /// Whether every safety tag is `none` or `low`. Untagged trails count as
    /// mild.
    pub fn has_only_mild_risks(&self) -> bool {
        self.safety_risks
            .iter()
            .all(|tag| MILD_RISK_TAGS.contains(&tag.as_str()))
    }

    /// Whether the trail is closed during `season`.
    pub fn is_closed_in(&self, season: Season) -> bool {
        self.closed_seasons.contains(&season)
    }

    /// Whether any landscape tag contains `needle`, ignoring case.
    pub fn landscape_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.landscapes
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Whether every numeric attribute is finite.
    pub const fn is_finite(&self) -> bool {
        self.difficulty.is_finite()
            && self.distance_km.is_finite()
            && self.elevation_gain_m.is_finite()
            && self.popularity.is_finite()
    }
}
