//! Classify command implementation for the Trailside CLI.

use std::collections::BTreeMap;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use trailside_core::Archetype;
use trailside_data::load_activities;
use trailside_profile::ProfileClassifier;

use crate::{
    ARG_ACTIVITIES, ARG_TRAILS, CliError, ENV_CLASSIFY_ACTIVITIES, ENV_CLASSIFY_TRAILS,
    open_trail_store, require_existing, write_json,
};

/// CLI arguments for the `classify` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Classify a hiker's behavioural archetype from a JSON list of \
                 completed activities. Each activity is resolved against the \
                 trail catalogue; at least three known hikes are required.",
    about = "Classify a hiker from completed activities"
)]
#[ortho_config(prefix = "TRAILSIDE")]
pub(crate) struct ClassifyArgs {
    /// Trail catalogue: a JSON array or a SQLite database (`.db`).
    #[arg(long = ARG_TRAILS, value_name = "path")]
    #[serde(default)]
    pub(crate) trails: Option<Utf8PathBuf>,
    /// JSON array of completed activities.
    #[arg(long = ARG_ACTIVITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) activities: Option<Utf8PathBuf>,
}

impl ClassifyArgs {
    fn into_config(self) -> Result<ClassifyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClassifyConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassifyConfig {
    pub(crate) trails: Utf8PathBuf,
    pub(crate) activities: Utf8PathBuf,
}

impl TryFrom<ClassifyArgs> for ClassifyConfig {
    type Error = CliError;

    fn try_from(args: ClassifyArgs) -> Result<Self, Self::Error> {
        let trails = args.trails.ok_or(CliError::MissingArgument {
            field: ARG_TRAILS,
            env: ENV_CLASSIFY_TRAILS,
        })?;
        let activities = args.activities.ok_or(CliError::MissingArgument {
            field: ARG_ACTIVITIES,
            env: ENV_CLASSIFY_ACTIVITIES,
        })?;
        Ok(Self { trails, activities })
    }
}

/// JSON written by `classify`. `archetype` is null when the history is too
/// short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ClassifyReport {
    pub(crate) archetype: Option<Archetype>,
    pub(crate) hikes: usize,
    pub(crate) scores: BTreeMap<Archetype, f64>,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_classify_with(args, &mut stdout)
}

pub(crate) fn run_classify_with(args: ClassifyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let report = execute_classify(args)?;
    write_json(writer, &report)
}

fn execute_classify(args: ClassifyArgs) -> Result<ClassifyReport, CliError> {
    let config = args.into_config()?;
    require_existing(&config.trails, ARG_TRAILS)?;
    require_existing(&config.activities, ARG_ACTIVITIES)?;

    let store = open_trail_store(&config.trails)?;
    let activities = load_activities(&config.activities)?;
    let classification = ProfileClassifier::default().classify(&activities, &store)?;
    Ok(classification.map_or_else(
        || ClassifyReport {
            archetype: None,
            hikes: 0,
            scores: BTreeMap::new(),
        },
        |found| ClassifyReport {
            archetype: Some(found.archetype),
            hikes: found.statistics.hike_count,
            scores: found.scores,
        },
    ))
}
