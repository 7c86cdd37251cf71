//! Granule provenance classification and resolved granule metadata.
//!
//! Native granules (Sentinel-1 radar scenes and anything unrecognized) are
//! checked for existence and DEM coverage. Third-party optical granules are
//! validated by their own providers and pass through untouched.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;

/// Third-party imagery providers recognized by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Sentinel2,
    Landsat8,
}

/// Where a granule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Radar scene served by the metadata service.
    Native,
    /// Optical scene from an external provider.
    ThirdParty(Provider),
}

/// Name prefixes of third-party product naming schemes.
///
/// Adding a provider family means adding a row here.
pub const THIRD_PARTY_PREFIXES: &[(&str, Provider)] = &[
    // S2A_MSIL1C_... (ESA) and S2B_22WEB_... (AWS COG)
    ("S2", Provider::Sentinel2),
    // LC08_L1TP_...
    ("LC08", Provider::Landsat8),
];

/// Classify a granule by name. Unrecognized names are native.
pub fn classify(name: &str) -> Provenance {
    THIRD_PARTY_PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, provider)| Provenance::ThirdParty(*provider))
        .unwrap_or(Provenance::Native)
}

/// True for granules from a recognized third-party provider.
pub fn is_third_party(name: &str) -> bool {
    matches!(classify(name), Provenance::ThirdParty(_))
}

/// A granule resolved by the metadata service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranuleMetadata {
    pub name: String,
    pub polygon: Footprint,
}

impl GranuleMetadata {
    pub fn new(name: impl Into<String>, polygon: Footprint) -> Self {
        Self {
            name: name.into(),
            polygon,
        }
    }
}
