//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use roadmap_core::model::{ProgressParseError, RoadmapError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the `Result`-returning `ProgressTracker` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Parse(#[from] ProgressParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading a roadmap definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoadmapConfigError {
    #[error("cannot read roadmap file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roadmap JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    RoadmapConfig(#[from] RoadmapConfigError),
}
