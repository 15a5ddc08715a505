//! Error types for the transformation stages.

use health_ingest::IngestError;
use thiserror::Error;

/// Errors raised by a pipeline stage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A stage was handed a frame without a column it works on.
    #[error("column '{column}' not found in frame")]
    MissingColumn { column: String },

    /// A column had an unexpected physical type.
    #[error("column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: String,
        found: String,
        expected: &'static str,
    },

    /// The merged output broke one of its guarantees.
    #[error("merged output invariant violated: {message}")]
    InvariantViolation { message: String },

    /// Type coercion of a source column failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
