//! Hiker profiles and the archetypes they are classified into.

use std::collections::{BTreeMap, BTreeSet};

/// Self-reported hiking experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ExperienceLevel {
    /// New to hiking.
    Beginner,
    /// Hikes regularly.
    #[default]
    Intermediate,
    /// Comfortable on demanding terrain.
    Expert,
}

impl ExperienceLevel {
    /// Return the level as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "expert" => Ok(Self::Expert),
            _ => Err(format!("unknown experience level '{s}'")),
        }
    }
}

/// Self-reported fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FitnessLevel {
    /// Short, gentle outings.
    Low,
    /// Half-day hikes.
    #[default]
    Medium,
    /// Long or steep days.
    High,
}

impl FitnessLevel {
    /// Return the level as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("unknown fitness level '{s}'")),
        }
    }
}

/// Behavioural hiker persona derived from activity history.
///
/// Variants are declared in tie-break priority order: when two archetypes
/// score the same, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Archetype {
    /// Safe, varied outings suitable for children.
    Family,
    /// Short and easy walks.
    Casual,
    /// Quiet scenery around lakes, peaks and glaciers.
    Contemplative,
    /// Scenic one-way routes with time for pictures.
    Photographer,
    /// Remote, rarely visited and unusual terrain.
    Explorer,
    /// Big climbs and steep terrain.
    ElevationSeeker,
    /// Long, steady distance and pace.
    PerformanceAthlete,
}

impl Archetype {
    /// Every archetype in tie-break priority order.
    pub const ALL: [Self; 7] = [
        Self::Family,
        Self::Casual,
        Self::Contemplative,
        Self::Photographer,
        Self::Explorer,
        Self::ElevationSeeker,
        Self::PerformanceAthlete,
    ];

    /// Return the archetype as a snake-case `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Casual => "casual",
            Self::Contemplative => "contemplative",
            Self::Photographer => "photographer",
            Self::Explorer => "explorer",
            Self::ElevationSeeker => "elevation_seeker",
            Self::PerformanceAthlete => "performance_athlete",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Family => "Family hiker",
            Self::Casual => "Casual walker",
            Self::Contemplative => "Contemplative hiker",
            Self::Photographer => "Landscape photographer",
            Self::Explorer => "Explorer",
            Self::ElevationSeeker => "Elevation seeker",
            Self::PerformanceAthlete => "Performance athlete",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|archetype| archetype.as_str() == normalised)
            .ok_or_else(|| format!("unknown archetype '{s}'"))
    }
}

/// Aggregate performance figures tracked for a hiker.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PerformanceRecord {
    /// How reliably the hiker completes what they start, `0.0..=1.0`.
    pub persistence_score: Option<f64>,
    /// Mean moving speed.
    pub average_speed_kmh: Option<f64>,
    /// Number of completed hikes on record.
    pub completed_hikes: u32,
}

/// A hiker's profile.
///
/// # Examples
/// ```
/// use trailside_core::{ExperienceLevel, FitnessLevel, UserProfile};
///
/// let user = UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low)
///     .with_fear_of_heights(true)
///     .with_preference("lake");
/// assert!(user.fear_of_heights);
/// assert!(user.archetype.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct UserProfile {
    /// Experience tier.
    pub experience: ExperienceLevel,
    /// Fitness tier.
    pub fitness: FitnessLevel,
    /// Avoid exposed sections.
    pub fear_of_heights: bool,
    /// Preferred landscape tags.
    pub preferences: BTreeSet<String>,
    /// Classified archetype, if enough history exists.
    pub archetype: Option<Archetype>,
    /// Score of every archetype at the last classification.
    pub archetype_scores: BTreeMap<Archetype, f64>,
    /// Performance figures.
    pub performance: PerformanceRecord,
}

impl UserProfile {
    /// Construct a profile with no preferences or history.
    pub fn new(experience: ExperienceLevel, fitness: FitnessLevel) -> Self {
        Self {
            experience,
            fitness,
            ..Self::default()
        }
    }

    /// Set the fear-of-heights flag.
    #[must_use]
    pub fn with_fear_of_heights(mut self, fear: bool) -> Self {
        self.fear_of_heights = fear;
        self
    }

    /// Add a landscape preference.
    #[must_use]
    pub fn with_preference(mut self, tag: impl Into<String>) -> Self {
        self.preferences.insert(tag.into());
        self
    }

    /// Set the archetype.
    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    /// Set the persistence score.
    #[must_use]
    pub fn with_persistence_score(mut self, score: f64) -> Self {
        self.performance.persistence_score = Some(score);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn archetype_order_is_priority_order() {
        let mut sorted = Archetype::ALL;
        sorted.sort();
        assert_eq!(sorted, Archetype::ALL);
        assert!(Archetype::Family < Archetype::PerformanceAthlete);
    }

    #[rstest]
    #[case("elevation_seeker", Archetype::ElevationSeeker)]
    #[case("Performance Athlete", Archetype::PerformanceAthlete)]
    #[case("family", Archetype::Family)]
    fn parses_archetype_spellings(#[case] input: &str, #[case] expected: Archetype) {
        assert_eq!(Archetype::from_str(input), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_levels() {
        assert!(ExperienceLevel::from_str("legend").is_err());
        assert!(FitnessLevel::from_str("extreme").is_err());
    }
}
