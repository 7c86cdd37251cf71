//! CMR point-list decoding.
//!
//! CMR encodes a polygon ring as a flat, whitespace-separated list of
//! `lat lon` pairs. Footprints use `[lon, lat]`, so every pair is swapped;
//! order and ring closure are kept as received.

use granule_common::Footprint;

use crate::error::{CmrError, CmrResult};

/// Decode a CMR point list into `[lon, lat]` vertices.
pub fn format_points(point_string: &str) -> CmrResult<Vec<[f64; 2]>> {
    let values = point_string
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| CmrError::InvalidPoints(format!("not a number: {token:?}")))
        })
        .collect::<CmrResult<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        return Err(CmrError::InvalidPoints(format!(
            "odd number of coordinates ({})",
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| [pair[1], pair[0]])
        .collect())
}

/// Decode a CMR point list into a footprint.
pub fn parse_footprint(point_string: &str) -> CmrResult<Footprint> {
    format_points(point_string).map(Footprint::new)
}
