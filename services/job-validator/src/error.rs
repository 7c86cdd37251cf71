//! Validation service errors.

use cmr_client::CmrError;
use granule_common::GranuleValidationError;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Why a batch of jobs was not accepted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The jobs themselves are inadmissible.
    #[error(transparent)]
    Granules(#[from] GranuleValidationError),

    /// Granule existence could not be determined.
    #[error("Unable to query granule metadata: {0}")]
    Metadata(#[from] CmrError),
}

impl ValidationError {
    /// True when the submitter must change the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ValidationError::Granules(_))
    }

    /// Get the HTTP status code a hosting API should answer with.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ValidationError::Granules(_) => 400,
            ValidationError::Metadata(_) => 503,
        }
    }
}
