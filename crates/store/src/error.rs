//! Data source errors.

use std::path::PathBuf;

use tallybook_shared::AppError;
use thiserror::Error;

/// Errors raised while fetching finance data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON.
    #[error("Failed to decode {path}: {source}")]
    Decode {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for writing.
    #[error("Failed to encode {path}: {source}")]
    Encode {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The source cannot serve the resource.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if the resource simply does not exist yet.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::DataSource(err.to_string())
    }
}
