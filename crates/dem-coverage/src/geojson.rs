//! GeoJSON input for the coverage reference.
//!
//! Only a FeatureCollection of `Polygon` / `MultiPolygon` features is
//! accepted. Other geometry types are skipped; positions may carry a third
//! (elevation) ordinate, which is ignored.

use serde::Deserialize;

use crate::error::{CoverageError, CoverageResult};
use crate::geometry::Point;
use crate::reference::CoveragePolygon;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Parse a FeatureCollection into coverage polygons.
pub fn parse_feature_collection(json: &str) -> CoverageResult<Vec<CoveragePolygon>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    let mut polygons = Vec::new();
    let mut skipped = 0usize;
    for feature in collection.features {
        match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                polygons.push(polygon_from_rings(coordinates)?);
            }
            Some(Geometry::MultiPolygon { coordinates }) => {
                for rings in coordinates {
                    polygons.push(polygon_from_rings(rings)?);
                }
            }
            Some(Geometry::Unsupported) | None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped coverage features without polygon geometry");
    }

    Ok(polygons)
}

fn polygon_from_rings(rings: Vec<Vec<Position>>) -> CoverageResult<CoveragePolygon> {
    let mut rings = rings.into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| CoverageError::InvalidGeometry("polygon has no rings".to_string()))?;

    let exterior = ring_from_positions(exterior)?;
    let holes = rings
        .map(ring_from_positions)
        .collect::<CoverageResult<Vec<_>>>()?;

    CoveragePolygon::new(exterior, holes)
}

fn ring_from_positions(positions: Vec<Position>) -> CoverageResult<Vec<Point>> {
    positions
        .into_iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok([*x, *y]),
            _ => Err(CoverageError::InvalidGeometry(format!(
                "position needs at least 2 ordinates, got {}",
                p.len()
            ))),
        })
        .collect()
}
