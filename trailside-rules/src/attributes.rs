//! Resolution of condition attribute paths against a user and context.

use std::fmt;

use trailside_core::{SearchContext, UserProfile};

/// Dotted attribute path such as `performance.persistence_score`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath(Vec<String>);

impl AttributePath {
    /// Split `raw` on `.` after lowercasing. Segments must be non-empty and
    /// contain only ASCII letters, digits and underscores.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        let segments: Vec<String> = lowered.split('.').map(str::to_owned).collect();
        let well_formed = segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        well_formed.then_some(Self(segments))
    }

    /// Path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Resolved value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Case-insensitive text.
    Text(String),
    /// Finite number.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// Set of tags.
    List(Vec<String>),
}

impl AttributeValue {
    /// Name of the value's type for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Experience,
    Fitness,
    FearOfHeights,
    Preferences,
    Archetype,
    Persistence,
    AverageSpeed,
    CompletedHikes,
    TimeAvailable,
    Device,
    Weather,
    Season,
    MultiDay,
    TripDays,
}

impl Attribute {
    fn lookup(path: &AttributePath) -> Option<Self> {
        let attribute = match path.segments() {
            [name] => match name.as_str() {
                "experience_level" | "experience" => Self::Experience,
                "fitness_level" | "fitness" => Self::Fitness,
                "fear_of_heights" | "vertigo" => Self::FearOfHeights,
                "preferences" | "landscape_preference" => Self::Preferences,
                "archetype" => Self::Archetype,
                "time_available" => Self::TimeAvailable,
                "device" => Self::Device,
                "weather" => Self::Weather,
                "season" => Self::Season,
                "multi_day" => Self::MultiDay,
                "trip_days" => Self::TripDays,
                _ => return None,
            },
            [record, field] if record == "performance" => match field.as_str() {
                "persistence_score" => Self::Persistence,
                "average_speed_kmh" | "average_speed" => Self::AverageSpeed,
                "completed_hikes" => Self::CompletedHikes,
                _ => return None,
            },
            _ => return None,
        };
        Some(attribute)
    }
}

/// Whether `path` names an attribute [`Attributes::resolve`] understands.
pub fn is_known(path: &AttributePath) -> bool {
    Attribute::lookup(path).is_some()
}

/// Read-only view of the facts a condition can test.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    user: &'a UserProfile,
    context: &'a SearchContext,
}

impl<'a> Attributes<'a> {
    /// Bundle a user and a request context.
    pub const fn new(user: &'a UserProfile, context: &'a SearchContext) -> Self {
        Self { user, context }
    }

    /// Resolve `path`. Unknown paths and absent optional facts both yield
    /// `None`; compiled rules never contain unknown paths.
    pub fn resolve(&self, path: &AttributePath) -> Option<AttributeValue> {
        let text = |s: &str| Some(AttributeValue::Text(s.to_owned()));
        let number = |n: f64| Some(AttributeValue::Number(n));
        match Attribute::lookup(path)? {
            Attribute::Experience => text(self.user.experience.as_str()),
            Attribute::Fitness => text(self.user.fitness.as_str()),
            Attribute::FearOfHeights => Some(AttributeValue::Bool(self.user.fear_of_heights)),
            Attribute::Preferences => Some(AttributeValue::List(
                self.user.preferences.iter().cloned().collect(),
            )),
            Attribute::Archetype => self.user.archetype.and_then(|a| text(a.as_str())),
            Attribute::Persistence => self.user.performance.persistence_score.and_then(number),
            Attribute::AverageSpeed => self.user.performance.average_speed_kmh.and_then(number),
            Attribute::CompletedHikes => number(f64::from(self.user.performance.completed_hikes)),
            Attribute::TimeAvailable => self
                .context
                .time_available
                .and_then(|t| number(f64::from(t))),
            Attribute::Device => self.context.device.and_then(|d| text(d.as_str())),
            Attribute::Weather => self.context.weather.and_then(|w| text(w.as_str())),
            Attribute::Season => self.context.effective_season().and_then(|s| text(s.as_str())),
            Attribute::MultiDay => Some(AttributeValue::Bool(self.context.is_multi_day())),
            Attribute::TripDays => self.context.trip_days().and_then(|d| number(f64::from(d))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use trailside_core::{ExperienceLevel, FitnessLevel, WeatherCategory};

    fn path(raw: &str) -> AttributePath {
        AttributePath::parse(raw).unwrap_or_else(|| panic!("valid path {raw}"))
    }

    #[rstest]
    #[case("performance.persistence_score", true)]
    #[case("landscape_preference", true)]
    #[case("performance.unknown", false)]
    #[case("shoe_size", false)]
    fn recognises_known_paths(#[case] raw: &str, #[case] known: bool) {
        assert_eq!(is_known(&path(raw)), known);
    }

    #[rstest]
    #[case("")]
    #[case("a..b")]
    #[case("fitness level")]
    #[case("fitness-level")]
    fn rejects_malformed_paths(#[case] raw: &str) {
        assert!(AttributePath::parse(raw).is_none());
    }

    #[rstest]
    fn resolves_nested_and_optional_attributes() {
        let user = UserProfile::new(ExperienceLevel::Expert, FitnessLevel::High)
            .with_persistence_score(0.9)
            .with_preference("lake");
        let context = SearchContext::default().with_weather(WeatherCategory::Rainy);
        let attributes = Attributes::new(&user, &context);

        assert_eq!(
            attributes.resolve(&path("performance.persistence_score")),
            Some(AttributeValue::Number(0.9))
        );
        assert_eq!(
            attributes.resolve(&path("landscape_preference")),
            Some(AttributeValue::List(vec!["lake".to_owned()]))
        );
        assert_eq!(
            attributes.resolve(&path("weather")),
            Some(AttributeValue::Text("rainy".to_owned()))
        );
        assert_eq!(attributes.resolve(&path("time_available")), None);
        assert_eq!(
            attributes.resolve(&path("multi_day")),
            Some(AttributeValue::Bool(false))
        );
    }
}
