//! CMR `granules.json` response body.

use granule_common::GranuleMetadata;
use serde::Deserialize;

use crate::error::{CmrError, CmrResult};
use crate::points::parse_footprint;

#[derive(Debug, Deserialize)]
pub(crate) struct CmrResponse {
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    producer_granule_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    /// Polygons, each a list of rings encoded as point lists.
    #[serde(default)]
    polygons: Vec<Vec<String>>,
}

impl CmrResponse {
    /// Convert entries to granule metadata, using the first ring of the
    /// first polygon as the footprint.
    pub(crate) fn into_granules(self) -> CmrResult<Vec<GranuleMetadata>> {
        self.feed
            .entry
            .into_iter()
            .map(|entry| -> CmrResult<GranuleMetadata> {
                let name = entry
                    .producer_granule_id
                    .or(entry.title)
                    .ok_or(CmrError::MissingName)?;

                let ring = entry
                    .polygons
                    .first()
                    .and_then(|rings| rings.first())
                    .ok_or_else(|| CmrError::MissingFootprint(name.clone()))?;

                Ok(GranuleMetadata::new(name, parse_footprint(ring)?))
            })
            .collect()
    }
}
