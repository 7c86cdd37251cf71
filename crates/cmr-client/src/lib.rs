//! Client for NASA's Common Metadata Repository (CMR).
//!
//! Resolves granule names to footprint polygons. The [`CmrClient`] trait is
//! the seam validators depend on; [`HttpCmrClient`] is the production
//! implementation talking to the CMR search API.

pub mod error;
pub mod http;
pub mod points;
mod response;

use async_trait::async_trait;
use granule_common::GranuleMetadata;

pub use error::{CmrError, CmrResult};
pub use http::{CmrConfig, HttpCmrClient, DEFAULT_CMR_URL};
pub use points::{format_points, parse_footprint};

/// Source of granule metadata.
#[async_trait]
pub trait CmrClient: Send + Sync {
    /// Fetch metadata for `names` in one request.
    ///
    /// Only granules the service recognizes are returned; unknown names are
    /// silently absent. Transport and service failures are errors.
    async fn fetch_metadata(&self, names: &[String]) -> CmrResult<Vec<GranuleMetadata>>;
}
