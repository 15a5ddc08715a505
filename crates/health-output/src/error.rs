//! Error types for the sinks.

use std::path::PathBuf;

use health_model::ConfigError;
use health_transform::TransformError;
use thiserror::Error;

/// Errors raised while writing or verifying an output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to write CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, OutputError>;
