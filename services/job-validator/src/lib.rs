//! Job submission validation service library.
//!
//! Decides whether a batch of processing jobs is admissible: every native
//! granule must exist in CMR, and jobs that process full scenes against a
//! DEM need enough DEM coverage under each granule footprint.

pub mod config;
pub mod error;
pub mod metrics;
pub mod validator;

pub use config::{CoverageConfig, ValidatorConfig};
pub use error::{ValidationError, ValidationResult};
pub use validator::{check_dem_coverage, check_granules_exist, JobValidator};
