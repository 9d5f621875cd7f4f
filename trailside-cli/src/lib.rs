//! Command-line interface for the Trailside recommender.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use trailside_core::{MemoryTrailStore, TrailStore};

mod classify;
mod error;
mod logging;
mod recommend;

pub use error::CliError;
pub use logging::init_logging;

use classify::{ClassifyArgs, run_classify};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_TRAILS: &str = "trails";
pub(crate) const ARG_RULES: &str = "rules";
pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_ACTIVITIES: &str = "activities";
pub(crate) const ARG_WEATHER_BASE_URL: &str = "weather-base-url";
pub(crate) const ENV_RECOMMEND_TRAILS: &str = "TRAILSIDE_CMDS_RECOMMEND_TRAILS";
pub(crate) const ENV_RECOMMEND_REQUEST: &str = "TRAILSIDE_CMDS_RECOMMEND_REQUEST";
pub(crate) const ENV_CLASSIFY_TRAILS: &str = "TRAILSIDE_CMDS_CLASSIFY_TRAILS";
pub(crate) const ENV_CLASSIFY_ACTIVITIES: &str = "TRAILSIDE_CMDS_CLASSIFY_ACTIVITIES";

/// Run the Trailside CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Classify(args) => run_classify(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "trailside",
    about = "Personalised hiking trail recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend trails for a hiker and request context.
    Recommend(RecommendArgs),
    /// Classify a hiker's archetype from completed activities.
    Classify(ClassifyArgs),
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match trailside_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn is_sqlite_path(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("db" | "sqlite" | "sqlite3"))
}

/// Open the trail catalogue: SQLite for `.db` files, JSON otherwise.
pub(crate) fn open_trail_store(path: &Utf8Path) -> Result<Box<dyn TrailStore>, CliError> {
    if is_sqlite_path(path) {
        return open_sqlite_store(path);
    }
    let trails = trailside_data::load_trails(path)?;
    Ok(Box::new(MemoryTrailStore::with_trails(trails)))
}

#[cfg(feature = "store-sqlite")]
fn open_sqlite_store(path: &Utf8Path) -> Result<Box<dyn TrailStore>, CliError> {
    let store = trailside_core::SqliteTrailStore::open(path.as_std_path())?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "store-sqlite"))]
fn open_sqlite_store(_path: &Utf8Path) -> Result<Box<dyn TrailStore>, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "reading a SQLite trail catalogue",
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
