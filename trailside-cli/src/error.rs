//! Error types emitted by the Trailside CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
#[cfg(feature = "store-sqlite")]
use trailside_core::SqliteTrailStoreError;
use trailside_data::DataError;
use trailside_data::forecast::ProviderBuildError;
use trailside_profile::ClassifyError;
use trailside_recommender::RecommendError;

/// Errors emitted by the Trailside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An input file could not be loaded.
    #[error(transparent)]
    LoadInput(#[from] Box<DataError>),
    /// Opening the SQLite trail store failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenTrailStore(#[from] SqliteTrailStoreError),
    /// Constructing the forecast provider failed.
    #[error("failed to build forecast provider for {base_url:?}: {source}")]
    BuildWeatherProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The recommender configuration was rejected.
    #[error(transparent)]
    BuildRecommender(#[from] RecommendError),
    /// Classifying the activity history failed.
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<DataError> for CliError {
    fn from(error: DataError) -> Self {
        Self::LoadInput(Box::new(error))
    }
}
