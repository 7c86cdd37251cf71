//! Error types for granule validation.

use thiserror::Error;

/// Which check rejected a set of granules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Native granules the metadata service does not know about.
    NotFound,
    /// Granules whose footprint lacks enough DEM coverage.
    InsufficientDemCoverage,
}

/// Rejection of one or more requested granules.
///
/// The message lists every offending granule and nothing else, so callers
/// can surface it to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .kind.describe(), .granules.join(", "))]
pub struct GranuleValidationError {
    pub kind: ValidationKind,
    pub granules: Vec<String>,
}

impl ValidationKind {
    fn describe(&self) -> &'static str {
        match self {
            ValidationKind::NotFound => "Some requested scenes could not be found",
            ValidationKind::InsufficientDemCoverage => {
                "Some requested scenes do not have DEM coverage"
            }
        }
    }
}

impl GranuleValidationError {
    /// Build an error for granules missing from the metadata service.
    pub fn not_found(granules: Vec<String>) -> Self {
        Self {
            kind: ValidationKind::NotFound,
            granules,
        }
    }

    /// Build an error for granules with insufficient DEM coverage.
    pub fn insufficient_coverage(granules: Vec<String>) -> Self {
        Self {
            kind: ValidationKind::InsufficientDemCoverage,
            granules,
        }
    }

    /// Returns `Err` naming `granules` if there are any, `Ok` otherwise.
    pub fn check(kind: ValidationKind, granules: Vec<String>) -> Result<(), Self> {
        if granules.is_empty() {
            Ok(())
        } else {
            Err(Self { kind, granules })
        }
    }
}
