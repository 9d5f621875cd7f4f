//! Unit tests for request orchestration.

use chrono::NaiveDate;
use geo::Coord;
use rstest::{fixture, rstest};
use trailside_core::test_support::{RecordingTrailStore, StubWeatherProvider};
use trailside_core::{
    ExperienceLevel, FitnessLevel, MemoryTrailStore, OfflineWeatherProvider, Rule, SearchContext,
    Trail, UserProfile, WeatherCategory,
};
use trailside_rules::FilterBuilder;

use crate::{RecommendError, Recommender, RecommenderConfig};

fn trail(id: u64, x: f64) -> Trail {
    Trail::new(id, format!("Trail {id}"), Coord { x, y: 46.0 })
        .with_difficulty(4.0)
        .with_distance_km(8.0)
        .with_duration_minutes(150)
        .with_elevation_gain_m(400.0)
}

fn ids<'a>(trails: impl IntoIterator<Item = &'a trailside_core::ScoredTrail>) -> Vec<u64> {
    trails.into_iter().map(|t| t.trail.id).collect()
}

#[fixture]
fn hiker() -> UserProfile {
    UserProfile::new(ExperienceLevel::Intermediate, FitnessLevel::Medium)
}

fn no_rules() -> FilterBuilder {
    FilterBuilder::from_rules(Vec::<Rule>::new())
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, day).expect("valid date")
}

#[rstest]
fn low_fitness_beginners_only_get_short_easy_trails() {
    let store = MemoryTrailStore::with_trails([
        trail(1, 7.1)
            .with_difficulty(2.0)
            .with_duration_minutes(40)
            .with_distance_km(3.0)
            .with_elevation_gain_m(100.0),
        trail(2, 7.2)
            .with_difficulty(5.0)
            .with_duration_minutes(40)
            .with_distance_km(3.0),
        trail(3, 7.3)
            .with_difficulty(2.0)
            .with_duration_minutes(120)
            .with_distance_km(3.0),
    ]);
    let recommender = Recommender::new(store, OfflineWeatherProvider);
    let user = UserProfile::new(ExperienceLevel::Beginner, FitnessLevel::Low);
    let context = SearchContext::default()
        .with_time_available(45)
        .with_weather(WeatherCategory::Sunny);

    let recommendation = recommender.recommend(&user, &context);

    assert_eq!(ids(&recommendation.exact_matches), vec![1]);
    assert!(
        recommendation
            .exact_matches
            .iter()
            .all(|t| t.trail.difficulty <= 3.0 && t.trail.duration_minutes <= 45)
    );
    assert_eq!(recommendation.metadata.fallback_level, 1);
    assert_eq!(recommendation.metadata.candidate_count, 1);
    assert!(!recommendation.activated_rules.is_empty());
    assert_eq!(recommendation.explanations.len(), 1);
}

#[rstest]
fn relaxes_filters_until_candidates_appear(hiker: UserProfile) {
    let store = RecordingTrailStore::with_trails([trail(1, 7.1)]);
    let builder = FilterBuilder::from_rules([Rule::new("", "min_difficulty=8", "hard only")]);
    let recommender =
        Recommender::with_config(store, OfflineWeatherProvider, builder, RecommenderConfig::default())
            .expect("default config is valid");

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(180));

    // Only the relaxed filters admit the trail, so it stays a suggestion
    // all the way down the threshold sequence.
    assert_eq!(recommendation.metadata.fallback_level, 3);
    assert!(recommendation.metadata.threshold.abs() < f64::EPSILON);
    assert!(recommendation.exact_matches.is_empty());
    assert_eq!(ids(&recommendation.suggestions), vec![1]);
    assert_eq!(recommender.store().queries().len(), 3);
}

#[rstest]
fn store_faults_advance_the_level(hiker: UserProfile) {
    let store = RecordingTrailStore::with_trails([trail(1, 7.1)]).failing_first(1);
    let recommender = Recommender::new(store, OfflineWeatherProvider);

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(180));

    assert_eq!(recommendation.metadata.error, None);
    assert_eq!(recommendation.metadata.fallback_level, 2);
    assert!(
        recommendation
            .metadata
            .warnings
            .iter()
            .any(|w| w.contains("level 1"))
    );
    assert_eq!(recommendation.trails().count(), 1);
}

#[rstest]
fn store_failing_at_every_level_yields_an_error_result(hiker: UserProfile) {
    let store = RecordingTrailStore::with_trails([trail(1, 7.1)]).failing_first(7);
    let recommender = Recommender::new(store, OfflineWeatherProvider);

    let recommendation = recommender.recommend(&hiker, &SearchContext::default());

    assert!(recommendation.is_empty());
    let error = recommendation.metadata.error.expect("error is reported");
    assert!(error.contains("all 7 fallback levels"), "{error}");
    assert!(recommendation.metadata.warnings.len() >= 7);
}

#[rstest]
fn empty_store_stops_at_the_last_level(hiker: UserProfile) {
    let recommender = Recommender::new(
        MemoryTrailStore::with_trails(Vec::<Trail>::new()),
        OfflineWeatherProvider,
    );

    let recommendation = recommender.recommend(&hiker, &SearchContext::default());

    assert!(recommendation.is_empty());
    assert_eq!(recommendation.metadata.fallback_level, 7);
    assert_eq!(recommendation.metadata.error, None);
}

/// Too hard, too far and too steep, but well timed: relevance lands
/// between 50 and 60.
fn mediocre_trail() -> Trail {
    trail(1, 7.1)
        .with_difficulty(9.0)
        .with_distance_km(30.0)
        .with_duration_minutes(170)
        .with_elevation_gain_m(1500.0)
}

#[rstest]
fn threshold_descends_until_an_exact_match(hiker: UserProfile) {
    let recommender = Recommender::with_config(
        MemoryTrailStore::with_trails([mediocre_trail()]),
        OfflineWeatherProvider,
        no_rules(),
        RecommenderConfig::default(),
    )
    .expect("default config is valid");

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(180));

    assert_eq!(recommendation.metadata.fallback_level, 1);
    assert!((recommendation.metadata.threshold - 50.0).abs() < f64::EPSILON);
    assert_eq!(ids(&recommendation.exact_matches), vec![1]);
}

#[rstest]
fn without_always_return_the_threshold_stays_put(hiker: UserProfile) {
    let config = RecommenderConfig {
        always_return: false,
        ..RecommenderConfig::default()
    };
    let recommender = Recommender::with_config(
        MemoryTrailStore::with_trails([mediocre_trail()]),
        OfflineWeatherProvider,
        no_rules(),
        config,
    )
    .expect("config is valid");

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(180));

    assert!((recommendation.metadata.threshold - 60.0).abs() < f64::EPSILON);
    assert!(recommendation.exact_matches.is_empty());
    assert_eq!(ids(&recommendation.suggestions), vec![1]);
}

#[rstest]
fn forecasts_rescore_and_storms_exclude(hiker: UserProfile) {
    let stormy = Coord { x: 7.5, y: 46.0 };
    let provider =
        StubWeatherProvider::always(WeatherCategory::Sunny).with_forecast_at(stormy, WeatherCategory::Stormy);
    let recommender = Recommender::with_config(
        MemoryTrailStore::with_trails([trail(1, 7.1), trail(2, 7.5)]),
        provider,
        no_rules(),
        RecommenderConfig::default(),
    )
    .expect("default config is valid");
    let context = SearchContext::default()
        .with_time_available(180)
        .with_weather(WeatherCategory::Sunny)
        .with_dates(date(14), date(14));

    let recommendation = recommender.recommend(&hiker, &context);

    assert_eq!(recommendation.metadata.weather_fetched_count, 2);
    assert_eq!(ids(recommendation.trails()), vec![1]);
    assert_eq!(
        recommendation.exact_matches[0].forecast,
        Some(WeatherCategory::Sunny)
    );
}

#[rstest]
fn no_hike_date_means_no_lookups(hiker: UserProfile) {
    let recommender = Recommender::with_config(
        MemoryTrailStore::with_trails([trail(1, 7.1)]),
        StubWeatherProvider::always(WeatherCategory::Rainy),
        no_rules(),
        RecommenderConfig::default(),
    )
    .expect("default config is valid");

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(180));

    assert_eq!(recommendation.metadata.weather_fetched_count, 0);
    assert_eq!(recommendation.exact_matches[0].forecast, None);
}

#[rstest]
fn scoring_faults_use_the_neutral_relevance(hiker: UserProfile) {
    let recommender = Recommender::with_config(
        MemoryTrailStore::with_trails([trail(1, 7.1).with_difficulty(f64::NAN)]),
        OfflineWeatherProvider,
        no_rules(),
        RecommenderConfig::default(),
    )
    .expect("default config is valid");

    let recommendation = recommender.recommend(&hiker, &SearchContext::default());

    assert!(recommendation.exact_matches.is_empty());
    let scored = &recommendation.suggestions[0];
    assert!(scored.scoring_error.is_some());
    assert!((scored.relevance - 50.0).abs() < f64::EPSILON);
    assert!(recommendation.explanations[0].summary.contains("(estimated)"));
}

#[rstest]
fn filter_build_faults_fall_back_to_validity_only(hiker: UserProfile) {
    let recommender = Recommender::new(
        MemoryTrailStore::with_trails([trail(1, 7.1), trail(2, 7.2).invalid()]),
        OfflineWeatherProvider,
    );
    let context = SearchContext::default().with_dates(date(20), date(10));

    let recommendation = recommender.recommend(&hiker, &context);

    assert!(
        recommendation
            .metadata
            .warnings
            .iter()
            .any(|w| w.starts_with("filter building failed"))
    );
    assert!(recommendation.activated_rules.is_empty());
    assert_eq!(ids(recommendation.trails()), vec![1]);
}

#[rstest]
fn two_day_trips_never_return_short_trails(hiker: UserProfile) {
    let store = RecordingTrailStore::with_trails([
        trail(1, 7.1).with_duration_minutes(600),
        trail(2, 7.2).with_duration_minutes(1000),
    ]);
    let recommender = Recommender::new(store, OfflineWeatherProvider);

    let recommendation =
        recommender.recommend(&hiker, &SearchContext::default().with_time_available(2880));

    assert_eq!(recommendation.metadata.fallback_level, 3);
    assert_eq!(ids(recommendation.trails()), vec![2]);
    for filters in recommender.store().queries() {
        assert!(filters.min_duration_minutes.is_some_and(|m| m >= 960));
        assert!(!filters.has_distance_bound());
    }
}

#[rstest]
fn invalid_config_is_rejected() {
    let config = RecommenderConfig {
        max_level: 9,
        ..RecommenderConfig::default()
    };
    let err = Recommender::with_config(
        MemoryTrailStore::default(),
        OfflineWeatherProvider,
        no_rules(),
        config,
    )
    .expect_err("max level out of range");
    assert!(matches!(err, RecommendError::InvalidConfig { .. }));
}
