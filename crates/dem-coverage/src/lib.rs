//! DEM coverage analysis for granule footprints.
//!
//! Decides whether a footprint has enough digital elevation model coverage
//! to be processed:
//!
//! 1. normalize the footprint across the antimeridian ([`antimeridian`])
//! 2. buffer it outward by a small tolerance, keeping concavities ([`buffer`])
//! 3. intersect it with the [`CoverageReference`] and compare the covered
//!    fraction against a threshold
//!
//! Everything here is pure and re-entrant; a [`CoverageReference`] can be
//! shared behind an `Arc` by any number of concurrent validations.

pub mod antimeridian;
pub mod buffer;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod overlay;
pub mod reference;

use serde::{Deserialize, Serialize};

pub use error::{CoverageError, CoverageResult};
pub use reference::{CoveragePolygon, CoverageReference};

/// Default outward buffer in degrees.
///
/// Absorbs coastline and tile-edge approximation in the reference so
/// scenes just off mapped DEM tiles are not rejected. Larger values let more
/// borderline coastal scenes through.
pub const DEFAULT_BUFFER: f64 = 0.15;

/// Default minimum fraction of the buffered footprint that must be covered.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Tunable parameters of the coverage decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageParams {
    /// Outward buffer in degrees.
    #[serde(default = "default_buffer")]
    pub buffer: f64,
    /// Minimum covered fraction, in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_buffer() -> f64 {
    DEFAULT_BUFFER
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for CoverageParams {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl CoverageParams {
    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Whether `footprint` has sufficient DEM coverage in `reference`.
pub fn has_sufficient_coverage(
    reference: &CoverageReference,
    footprint: &granule_common::Footprint,
    params: &CoverageParams,
) -> bool {
    reference.has_sufficient_coverage(footprint, params)
}
