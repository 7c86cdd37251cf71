//! Common test fixtures for coverage and validation tests.
//!
//! The fixture reference mimics a tiled global DEM: a set of covered 1x1
//! degree tiles. Everything not listed is open ocean or uncovered.

use std::io::Write;

use dem_coverage::CoverageReference;
use granule_common::{Footprint, GranuleMetadata};
use tempfile::NamedTempFile;

/// Rectangle footprint from its edges. `east < west` straddles the
/// antimeridian.
pub fn rectangle(north: f64, south: f64, east: f64, west: f64) -> Footprint {
    Footprint::rectangle(north, south, east, west)
}

/// Covered tile regions as `(min_lon, max_lon, min_lat, max_lat)` of tile
/// south-west corners, inclusive.
pub mod regions {
    /// Western North America; the coastline is the -125 meridian.
    pub const NORTH_AMERICA_WEST: (i32, i32, i32, i32) = (-125, -101, 32, 48);

    /// Central America around the Guatemalan coast.
    pub const CENTRAL_AMERICA: (i32, i32, i32, i32) = (-95, -88, 13, 17);

    /// Aleutian island tiles on both sides of the antimeridian.
    pub const ALEUTIANS_EAST: (i32, i32, i32, i32) = (179, 179, 51, 51);
    pub const ALEUTIANS_WEST: (i32, i32, i32, i32) = (-180, -180, 51, 51);

    /// A single island tile in the Atlantic.
    pub const ASCENSION: (i32, i32, i32, i32) = (-15, -15, -8, -8);

    pub const ALL: [(i32, i32, i32, i32); 5] = [
        NORTH_AMERICA_WEST,
        CENTRAL_AMERICA,
        ALEUTIANS_EAST,
        ALEUTIANS_WEST,
        ASCENSION,
    ];
}

/// South-west corners of every covered fixture tile.
pub fn fixture_tiles() -> Vec<(i32, i32)> {
    regions::ALL
        .iter()
        .flat_map(|&(x0, x1, y0, y1)| (x0..=x1).flat_map(move |x| (y0..=y1).map(move |y| (x, y))))
        .collect()
}

/// The fixture DEM coverage reference.
pub fn fixture_reference() -> CoverageReference {
    CoverageReference::from_tiles(fixture_tiles())
}

/// The fixture reference as a GeoJSON FeatureCollection.
pub fn fixture_reference_geojson() -> String {
    let features: Vec<serde_json::Value> = fixture_tiles()
        .into_iter()
        .map(|(lon, lat)| {
            let (x, y) = (lon as f64, lat as f64);
            serde_json::json!({
                "type": "Feature",
                "properties": {"tile": format!("{lon}_{lat}")},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]]
                }
            })
        })
        .collect();

    serde_json::json!({"type": "FeatureCollection", "features": features}).to_string()
}

/// Write the fixture reference GeoJSON to a temporary file.
pub fn fixture_reference_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(fixture_reference_geojson().as_bytes())
        .expect("Failed to write fixture reference");
    file
}

/// Named footprints relative to the fixture reference.
pub mod footprints {
    use super::rectangle;
    use granule_common::Footprint;

    /// Well inside covered land.
    pub fn wyoming() -> Footprint {
        rectangle(45.0, 41.0, -104.0, -111.0)
    }

    /// Aleutian tiles straddling the antimeridian, fully covered.
    pub fn aleutians_antimeridian() -> Footprint {
        rectangle(51.7, 51.3, -179.3, 179.7)
    }

    /// Same longitudes as [`aleutians_antimeridian`], stretched south over
    /// ocean so only a sliver is covered.
    pub fn aleutians_mostly_ocean() -> Footprint {
        rectangle(51.7, 41.3, -179.3, 179.7)
    }

    /// Ocean straddling the antimeridian, same shape as the Aleutian one.
    pub fn ocean_antimeridian() -> Footprint {
        rectangle(-40.0, -41.0, -179.3, 179.7)
    }

    /// Encloses the Ascension tile with ocean around it.
    pub fn ascension() -> Footprint {
        rectangle(-6.0, -9.0, -14.0, -15.0)
    }

    /// Just off the coast; reaches 20% coverage only through the default
    /// buffer (ratio ~0.206 at 0.15, ~0.198 at 0.14, ~0.213 at 0.16).
    pub fn coast_minimum() -> Footprint {
        rectangle(40.1, 40.0, -125.0, -125.36)
    }

    /// [`coast_minimum`] moved 0.01 degrees offshore (ratio ~0.19).
    pub fn coast_too_far() -> Footprint {
        rectangle(40.1, 40.0, -125.01, -125.37)
    }

    pub fn southern_greenland() -> Footprint {
        rectangle(62.0, 61.0, -44.0, -45.0)
    }

    /// Full-width polar cap.
    pub fn antarctica() -> Footprint {
        rectangle(-62.0, -90.0, 180.0, -180.0)
    }

    pub fn open_pacific() -> Footprint {
        rectangle(1.0, -1.0, -139.0, -141.0)
    }
}

/// Sentinel-1 granules used in end-to-end tests.
pub mod granules {
    use super::*;

    /// Covered by the Central America tiles.
    pub const WITH_DEM_COVERAGE: &str =
        "S1A_IW_SLC__1SSV_20150621T120220_20150621T120232_006471_008934_72D8";

    /// Footprint over the Southern Ocean.
    pub const WITHOUT_DEM_COVERAGE: &str =
        "S1A_IW_SLC__1SSH_20190326T081759_20190326T081831_026506_02F822_52F9";

    pub const SENTINEL2: &str = "S2A_MSIL1C_20200627T150921_N0209_R025_T22WEB_20200627T170912";
    pub const LANDSAT8: &str = "LC08_L1TP_009011_20200820_20200905_02_T1";

    pub fn with_dem_coverage() -> GranuleMetadata {
        GranuleMetadata::new(
            WITH_DEM_COVERAGE,
            Footprint::new(vec![
                [-91.927132, 13.705972],
                [-91.773392, 14.452647],
                [-94.065727, 14.888498],
                [-94.211563, 14.143632],
                [-91.927132, 13.705972],
            ]),
        )
    }

    pub fn without_dem_coverage() -> GranuleMetadata {
        GranuleMetadata::new(
            WITHOUT_DEM_COVERAGE,
            Footprint::new(vec![
                [-60.0, -70.0],
                [-60.0, -72.0],
                [-66.0, -72.0],
                [-66.0, -70.0],
                [-60.0, -70.0],
            ]),
        )
    }

    /// Catalogue of every granule the stub CMR knows about.
    pub fn catalogue() -> Vec<GranuleMetadata> {
        vec![with_dem_coverage(), without_dem_coverage()]
    }
}
