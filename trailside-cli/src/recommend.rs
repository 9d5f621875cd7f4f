//! Recommend command implementation for the Trailside CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use trailside_core::{OfflineWeatherProvider, WeatherProvider};
use trailside_data::forecast::HttpWeatherProvider;
use trailside_data::{RecommendationRequest, load_activities, load_request, load_rules};
use trailside_profile::ProfileClassifier;
use trailside_recommender::{Recommendation, Recommender, RecommenderConfig};
use trailside_rules::FilterBuilder;

use crate::{
    ARG_ACTIVITIES, ARG_REQUEST, ARG_RULES, ARG_TRAILS, ARG_WEATHER_BASE_URL, CliError,
    ENV_RECOMMEND_REQUEST, ENV_RECOMMEND_TRAILS, open_trail_store, require_existing, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend trails for the hiker and context described in a \
                 JSON request. Trails come from a JSON catalogue or a SQLite \
                 database; rules default to the built-in set. Forecasts are \
                 fetched only when a weather service URL is configured.",
    about = "Recommend trails for a hiker"
)]
#[ortho_config(prefix = "TRAILSIDE")]
pub(crate) struct RecommendArgs {
    /// Trail catalogue: a JSON array or a SQLite database (`.db`).
    #[arg(long = ARG_TRAILS, value_name = "path")]
    #[serde(default)]
    pub(crate) trails: Option<Utf8PathBuf>,
    /// JSON array of rules replacing the built-in rule set.
    #[arg(long = ARG_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) rules: Option<Utf8PathBuf>,
    /// JSON request holding the user profile and search context.
    #[arg(long = ARG_REQUEST, value_name = "path")]
    #[serde(default)]
    pub(crate) request: Option<Utf8PathBuf>,
    /// Completed activities used to classify the hiker first.
    #[arg(long = ARG_ACTIVITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) activities: Option<Utf8PathBuf>,
    /// Base URL of the forecast service (e.g. "http://localhost:8080").
    #[arg(long = ARG_WEATHER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) weather_base_url: Option<String>,
    /// Deepest fallback level to try (1-7).
    #[arg(long = "max-level", value_name = "level")]
    #[serde(default)]
    pub(crate) max_level: Option<u8>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) trails: Utf8PathBuf,
    pub(crate) rules: Option<Utf8PathBuf>,
    pub(crate) request: Utf8PathBuf,
    pub(crate) activities: Option<Utf8PathBuf>,
    pub(crate) weather_base_url: Option<String>,
    pub(crate) max_level: Option<u8>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.trails, ARG_TRAILS)?;
        require_existing(&self.request, ARG_REQUEST)?;
        if let Some(rules) = &self.rules {
            require_existing(rules, ARG_RULES)?;
        }
        if let Some(activities) = &self.activities {
            require_existing(activities, ARG_ACTIVITIES)?;
        }
        Ok(())
    }

    fn recommender_config(&self) -> RecommenderConfig {
        let defaults = RecommenderConfig::default();
        RecommenderConfig {
            max_level: self.max_level.unwrap_or(defaults.max_level),
            ..defaults
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let trails = args.trails.ok_or(CliError::MissingArgument {
            field: ARG_TRAILS,
            env: ENV_RECOMMEND_TRAILS,
        })?;
        let request = args.request.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        Ok(Self {
            trails,
            rules: args.rules,
            request,
            activities: args.activities,
            weather_base_url: args.weather_base_url.filter(|url| !url.trim().is_empty()),
            max_level: args.max_level,
        })
    }
}

/// Builds the forecast provider for a `recommend` invocation.
pub(crate) trait WeatherSource {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn WeatherProvider>, CliError>;
}

/// HTTP forecasts when a base URL is configured, none otherwise.
pub(crate) struct DefaultWeatherSource;

impl WeatherSource for DefaultWeatherSource {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn WeatherProvider>, CliError> {
        let Some(base_url) = &config.weather_base_url else {
            return Ok(Box::new(OfflineWeatherProvider));
        };
        let provider = HttpWeatherProvider::new(base_url.clone()).map_err(|source| {
            CliError::BuildWeatherProvider {
                base_url: base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &DefaultWeatherSource, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    weather: &dyn WeatherSource,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let recommendation = execute_recommend(args, weather)?;
    write_json(writer, &recommendation)
}

fn execute_recommend(
    args: RecommendArgs,
    weather: &dyn WeatherSource,
) -> Result<Recommendation, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;

    let RecommendationRequest { mut user, context } = load_request(&config.request)?;
    let builder = match &config.rules {
        Some(path) => FilterBuilder::from_rules(load_rules(path)?),
        None => FilterBuilder::with_default_rules(),
    };
    let store = open_trail_store(&config.trails)?;

    if let Some(path) = &config.activities {
        let activities = load_activities(path)?;
        match ProfileClassifier::default().classify(&activities, &store)? {
            Some(classification) => {
                info!("classified hiker as {}", classification.archetype);
                classification.apply_to(&mut user);
            }
            None => info!("activity history too short to classify"),
        }
    }

    let provider = weather.build(&config)?;
    let recommender =
        Recommender::with_config(store, provider, builder, config.recommender_config())?;
    let recommendation = recommender.recommend(&user, &context);
    info!(
        "{} exact matches and {} suggestions at fallback level {}",
        recommendation.exact_matches.len(),
        recommendation.suggestions.len(),
        recommendation.metadata.fallback_level
    );
    Ok(recommendation)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
