//! CMR client errors.
//!
//! All of these mean "existence could not be determined"; none of them mean
//! a granule does not exist.

use thiserror::Error;

pub type CmrResult<T> = Result<T, CmrError>;

#[derive(Debug, Error)]
pub enum CmrError {
    #[error("CMR request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMR returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid CMR response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid CMR point list: {0}")]
    InvalidPoints(String),

    #[error("CMR entry {0} has no footprint polygon")]
    MissingFootprint(String),

    #[error("CMR entry has neither producer_granule_id nor title")]
    MissingName,
}
