//! Error types for launchboard.
//!
//! Every failure that can stop the dashboard from starting is represented
//! here. The chart transformations themselves are infallible.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// Failed to open or read the dataset file.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetOpen {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// A required column is missing from the dataset header.
    #[error("dataset {path} is missing required column '{column}'")]
    DatasetMissingColumn {
        /// Path to the dataset file.
        path: PathBuf,
        /// Header name that could not be found.
        column: &'static str,
    },

    /// A data row could not be turned into a launch record.
    #[error("invalid record in {path} at row {row}: {message}")]
    DatasetRow {
        /// Path to the dataset file.
        path: PathBuf,
        /// One-based data row number (the header is row 0).
        row: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The dataset contains a header but no records.
    #[error("dataset {path} contains no records")]
    DatasetEmpty {
        /// Path to the dataset file.
        path: PathBuf,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The HTTP listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    ServerBind {
        /// Address the server tried to listen on.
        address: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A static asset configured for the page could not be read.
    #[error("failed to read asset {path}: {source}")]
    AssetRead {
        /// Path to the asset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for launchboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid-row error for the given dataset.
    #[must_use]
    pub fn dataset_row(path: impl Into<PathBuf>, row: u64, message: impl Into<String>) -> Self {
        Self::DatasetRow {
            path: path.into(),
            row,
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the dataset source.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetOpen { .. }
                | Self::DatasetMissingColumn { .. }
                | Self::DatasetRow { .. }
                | Self::DatasetEmpty { .. }
        )
    }
}
