//! Common types and utilities shared across the granule validation crates.

pub mod bbox;
pub mod error;
pub mod footprint;
pub mod granule;
pub mod job;

pub use bbox::BoundingBox;
pub use error::{GranuleValidationError, ValidationKind};
pub use footprint::Footprint;
pub use granule::{classify, is_third_party, GranuleMetadata, Provenance, Provider};
pub use job::{granule_names, requires_coverage, Job, JobParameters, JobType};
