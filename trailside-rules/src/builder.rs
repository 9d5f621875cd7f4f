//! Filter building: rule evaluation followed by temporal normalisation.

use log::{debug, warn};
use trailside_core::{
    DisplaySettings, FilterSet, Rule, SearchContext, UserProfile, multi_day,
};

use crate::{Attributes, FilterBuildError, RuleSet, default_rules};

/// Everything a build produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    /// Constraints for retrieval and classification. Invalid trails are
    /// always excluded.
    pub filters: FilterSet,
    /// Presentation hints extracted from the adaptations.
    pub display: DisplaySettings,
    /// Rules whose condition held, in evaluation order.
    pub activated_rules: Vec<Rule>,
    /// Rules skipped because their condition could not be evaluated.
    pub warnings: Vec<String>,
}

/// Derives a [`FilterSet`] from a user profile and request context.
///
/// # Examples
/// ```
/// use trailside_core::{ExperienceLevel, FitnessLevel, Rule, SearchContext, UserProfile};
/// use trailside_rules::FilterBuilder;
///
/// let builder = FilterBuilder::from_rules([Rule::new(
///     "fitness_level=low",
///     "max_difficulty=easy",
///     "Low fitness keeps to easy trails",
/// )]);
/// let user = UserProfile::new(ExperienceLevel::Intermediate, FitnessLevel::Low);
/// let context = SearchContext::default().with_time_available(90);
///
/// let outcome = builder.build(&user, &context)?;
/// assert_eq!(outcome.filters.max_difficulty, Some(3.0));
/// assert_eq!(outcome.filters.max_duration_minutes, Some(90));
/// assert_eq!(outcome.activated_rules.len(), 1);
/// # Ok::<(), trailside_rules::FilterBuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    rules: RuleSet,
}

impl FilterBuilder {
    /// Use an already compiled rule set.
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Compile `rules` and use them.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        Self::new(RuleSet::compile(rules))
    }

    /// Use the built-in rule set.
    pub fn with_default_rules() -> Self {
        Self::from_rules(default_rules())
    }

    /// Compiled rules.
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate every rule, merge the adaptations that fire, then normalise
    /// durations against the available time.
    ///
    /// # Errors
    ///
    /// Returns [`FilterBuildError`] when the hike dates are inverted or the
    /// merged bounds contradict each other.
    pub fn build(
        &self,
        user: &UserProfile,
        context: &SearchContext,
    ) -> Result<BuildOutcome, FilterBuildError> {
        if context.has_inverted_dates()
            && let (Some(start), Some(end)) = (context.hike_start, context.hike_end)
        {
            return Err(FilterBuildError::InvertedDates { start, end });
        }

        let attributes = Attributes::new(user, context);
        let mut outcome = BuildOutcome {
            filters: FilterSet::validity_only(),
            ..BuildOutcome::default()
        };
        for compiled in self.rules.rules() {
            match compiled.condition().evaluate(&attributes) {
                Ok(true) => {
                    compiled
                        .adaptation()
                        .apply(&mut outcome.filters, &mut outcome.display);
                    outcome.activated_rules.push(compiled.rule().clone());
                }
                Ok(false) => {}
                Err(err) => {
                    let description = &compiled.rule().description;
                    warn!("skipping rule '{description}': {err}");
                    outcome
                        .warnings
                        .push(format!("rule '{description}' skipped: {err}"));
                }
            }
        }

        normalise_durations(&mut outcome.filters, context);
        check_bounds(&outcome.filters)?;
        debug!(
            "built filters from {} of {} rules",
            outcome.activated_rules.len(),
            self.rules.len()
        );
        Ok(outcome)
    }
}

fn normalise_durations(filters: &mut FilterSet, context: &SearchContext) {
    let Some(time_available) = context.time_available else {
        return;
    };
    if filters.max_duration_minutes.is_none() {
        filters.max_duration_minutes = Some(time_available);
    }
    if let Some(days) = multi_day::trip_days(time_available) {
        filters.min_distance_km = None;
        filters.max_distance_km = None;
        filters.max_duration_minutes = Some(multi_day::day_aligned_ceiling(time_available));
        filters.min_duration_minutes = Some(multi_day::initial_min_duration(days));
    }
}

fn check_bounds(filters: &FilterSet) -> Result<(), FilterBuildError> {
    let pairs = [
        ("difficulty", filters.min_difficulty, filters.max_difficulty),
        ("distance", filters.min_distance_km, filters.max_distance_km),
        (
            "duration",
            filters.min_duration_minutes.map(f64::from),
            filters.max_duration_minutes.map(f64::from),
        ),
        ("elevation", filters.min_elevation_m, filters.max_elevation_m),
    ];
    for (field, min, max) in pairs {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(FilterBuildError::ConflictingBounds { field, min, max });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use trailside_core::{ExperienceLevel, FitnessLevel, WeatherCategory};

    #[fixture]
    fn builder() -> FilterBuilder {
        FilterBuilder::from_rules([
            Rule::new("fitness_level=low", "max_difficulty=easy", "low fitness"),
            Rule::new("time_available<=90", "max_distance=6", "short outing"),
            Rule::new("", "min_distance=1; max_duration=600", "baseline"),
            Rule::new(
                "performance.persistence_score>=0.5",
                "min_difficulty=2",
                "persistent",
            ),
        ])
    }

    fn user(fitness: FitnessLevel) -> UserProfile {
        UserProfile::new(ExperienceLevel::Intermediate, fitness)
    }

    #[rstest]
    fn derives_max_duration_from_time(builder: FilterBuilder) {
        let outcome = builder
            .build(
                &user(FitnessLevel::Medium),
                &SearchContext::default().with_time_available(120),
            )
            .expect("build succeeds");
        // The baseline rule's 600 minutes is explicit, so it is kept.
        assert_eq!(outcome.filters.max_duration_minutes, Some(600));

        let unbounded = FilterBuilder::from_rules(Vec::<Rule>::new());
        let outcome = unbounded
            .build(
                &user(FitnessLevel::Medium),
                &SearchContext::default().with_time_available(120),
            )
            .expect("build succeeds");
        assert_eq!(outcome.filters.max_duration_minutes, Some(120));
    }

    #[rstest]
    fn absent_optional_attribute_does_not_fire(builder: FilterBuilder) {
        let outcome = builder
            .build(&user(FitnessLevel::Low), &SearchContext::default())
            .expect("build succeeds");
        let fired: Vec<_> = outcome
            .activated_rules
            .iter()
            .map(|r| r.description.as_str())
            .collect();
        assert_eq!(fired, vec!["low fitness", "baseline"]);
    }

    #[rstest]
    #[case(1440, 1440, 720)]
    #[case(2880, 2880, 1680)]
    #[case(3000, 4320, 1680)]
    #[case(4320, 4320, 2160)]
    #[case(10080, 10080, 2880)]
    fn multi_day_drops_distance_and_sets_duration_window(
        builder: FilterBuilder,
        #[case] time_available: u32,
        #[case] max_duration: u32,
        #[case] min_duration: u32,
    ) {
        let outcome = builder
            .build(
                &user(FitnessLevel::Medium),
                &SearchContext::default().with_time_available(time_available),
            )
            .expect("build succeeds");
        assert!(!outcome.filters.has_distance_bound());
        assert_eq!(outcome.filters.max_duration_minutes, Some(max_duration));
        assert_eq!(outcome.filters.min_duration_minutes, Some(min_duration));
    }

    #[rstest]
    fn evaluation_faults_skip_the_rule() {
        let builder = FilterBuilder::from_rules([
            Rule::new("fitness_level>=2", "max_difficulty=easy", "typed wrongly"),
            Rule::new("", "avoid_risky=true", "always"),
        ]);
        let outcome = builder
            .build(&user(FitnessLevel::Low), &SearchContext::default())
            .expect("build succeeds");
        assert_eq!(outcome.filters.max_difficulty, None);
        assert!(outcome.filters.avoid_risky);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("typed wrongly"));
    }

    #[rstest]
    fn inverted_dates_fail_the_build(builder: FilterBuilder) {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let err = builder
            .build(
                &user(FitnessLevel::Low),
                &SearchContext::default().with_dates(start, end),
            )
            .expect_err("inverted dates");
        assert!(matches!(err, FilterBuildError::InvertedDates { .. }));
    }

    #[rstest]
    fn contradictory_rules_fail_the_build() {
        let builder = FilterBuilder::from_rules([
            Rule::new("", "min_difficulty=hard", "hard only"),
            Rule::new("", "max_difficulty=easy", "easy only"),
        ]);
        let err = builder
            .build(&user(FitnessLevel::High), &SearchContext::default())
            .expect_err("conflicting bounds");
        assert!(matches!(
            err,
            FilterBuildError::ConflictingBounds {
                field: "difficulty",
                ..
            }
        ));
    }

    #[rstest]
    fn default_rules_restrict_low_fitness_beginners() {
        let outcome = FilterBuilder::with_default_rules()
            .build(
                &UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low),
                &SearchContext::default()
                    .with_time_available(45)
                    .with_weather(WeatherCategory::Sunny),
            )
            .expect("build succeeds");
        assert_eq!(outcome.filters.max_difficulty, Some(3.0));
        assert_eq!(outcome.filters.max_duration_minutes, Some(45));
        assert!(outcome.filters.avoid_risky);
    }
}
