//! Error types for loading and splitting datasets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a dataset.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Column was not found in the table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Feature matrix and label vector have a different number of rows.
    #[error("Sample counts do not align! Try again! ({features} feature rows, {labels} labels)")]
    SampleCountMismatch { features: usize, labels: usize },

    /// A feature column cannot be converted to a numeric matrix.
    #[error("Feature column '{column}' is not numeric ({dtype})")]
    NonNumericFeature { column: String, dtype: String },

    /// Labels were requested as numbers but the label column is not numeric.
    #[error("Label column '{column}' is not numeric ({dtype})")]
    NonNumericLabel { column: String, dtype: String },

    /// Not enough rows to produce the requested number of folds.
    #[error("Cannot have number of splits {n_splits} greater than the number of samples {n_samples}")]
    InsufficientSamples { n_splits: usize, n_samples: usize },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    /// Short code identifying the error kind, used in log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::SampleCountMismatch { .. } => "SAMPLE_COUNT_MISMATCH",
            Self::NonNumericFeature { .. } => "NON_NUMERIC_FEATURE",
            Self::NonNumericLabel { .. } => "NON_NUMERIC_LABEL",
            Self::InsufficientSamples { .. } => "INSUFFICIENT_SAMPLES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

/// Result type alias for dataset preparation.
pub type Result<T> = std::result::Result<T, PrepError>;
