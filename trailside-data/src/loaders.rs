//! JSON loaders for the engine's inputs.

use std::collections::HashSet;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use trailside_core::{CompletedActivity, Rule, SearchContext, Trail, UserProfile};

use crate::fs::read_to_string;

/// Errors raised while loading input files.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse {what} from {path}: {source}")]
    Parse {
        /// Kind of record being loaded.
        what: &'static str,
        /// File that failed.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Two trails share an identifier.
    #[error("trail id {id} appears more than once in {path}")]
    DuplicateTrail {
        /// Repeated identifier.
        id: u64,
        /// File holding the trails.
        path: Utf8PathBuf,
    },
}

/// A recommendation request as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendationRequest {
    /// Hiker profile.
    pub user: UserProfile,
    /// Request context.
    #[serde(default)]
    pub context: SearchContext,
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, what: &'static str) -> Result<T, DataError> {
    let contents = read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DataError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of trails.
///
/// # Errors
///
/// Returns [`DataError`] when the file cannot be read or parsed, or when
/// two trails share an id.
pub fn load_trails(path: &Utf8Path) -> Result<Vec<Trail>, DataError> {
    let trails: Vec<Trail> = load_json(path, "trails")?;
    let mut seen = HashSet::with_capacity(trails.len());
    if let Some(trail) = trails.iter().find(|trail| !seen.insert(trail.id)) {
        return Err(DataError::DuplicateTrail {
            id: trail.id,
            path: path.to_path_buf(),
        });
    }
    debug!("loaded {} trails from {path}", trails.len());
    Ok(trails)
}

/// Load a JSON array of rules.
///
/// # Errors
///
/// Returns [`DataError`] when the file cannot be read or parsed.
pub fn load_rules(path: &Utf8Path) -> Result<Vec<Rule>, DataError> {
    let rules: Vec<Rule> = load_json(path, "rules")?;
    debug!("loaded {} rules from {path}", rules.len());
    Ok(rules)
}

/// Load a JSON array of completed activities.
///
/// # Errors
///
/// Returns [`DataError`] when the file cannot be read or parsed.
pub fn load_activities(path: &Utf8Path) -> Result<Vec<CompletedActivity>, DataError> {
    load_json(path, "activities")
}

/// Load a recommendation request.
///
/// # Errors
///
/// Returns [`DataError`] when the file cannot be read or parsed.
pub fn load_request(path: &Utf8Path) -> Result<RecommendationRequest, DataError> {
    load_json(path, "request")
}
