//! Coverage reference loading errors.

use std::path::PathBuf;

use thiserror::Error;

pub type CoverageResult<T> = Result<T, CoverageError>;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Failed to read coverage reference {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid coverage GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid coverage geometry: {0}")]
    InvalidGeometry(String),
}
