//! Granule footprint geometry.

use serde::{Deserialize, Serialize};

/// A granule footprint: one ring of `[longitude, latitude]` vertices in
/// WGS84 degrees.
///
/// The ring may be stored closed (first vertex repeated last) or open; both
/// describe the same polygon. Rings that cross the antimeridian keep their raw
/// longitudes here and are normalized by the coverage engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Footprint {
    vertices: Vec<[f64; 2]>,
}

impl Footprint {
    /// Create a footprint from `[lon, lat]` vertices.
    pub fn new(vertices: Vec<[f64; 2]>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle, listed north-west, north-east, south-east,
    /// south-west.
    ///
    /// `east < west` is allowed and describes a rectangle straddling the
    /// antimeridian.
    pub fn rectangle(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self::new(vec![
            [west, north],
            [east, north],
            [east, south],
            [west, south],
        ])
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Vertices without the closing duplicate, if any.
    pub fn open_ring(&self) -> &[[f64; 2]] {
        if self.is_closed() {
            &self.vertices[..self.vertices.len() - 1]
        } else {
            &self.vertices
        }
    }

    /// True when the last vertex repeats the first.
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.vertices.first() == self.vertices.last()
    }
}

impl From<Vec<[f64; 2]>> for Footprint {
    fn from(vertices: Vec<[f64; 2]>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_vertex_order() {
        let fp = Footprint::rectangle(45.0, 41.0, -104.0, -111.0);
        assert_eq!(
            fp.vertices(),
            &[[-111.0, 45.0], [-104.0, 45.0], [-104.0, 41.0], [-111.0, 41.0]]
        );
        assert!(!fp.is_closed());
    }

    #[test]
    fn test_open_ring_drops_closing_vertex() {
        let fp = Footprint::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        assert!(fp.is_closed());
        assert_eq!(fp.open_ring().len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_ring() {
        let fp = Footprint::new(vec![[25.04, -31.43], [25.54, -29.76]]);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "[[25.04,-31.43],[25.54,-29.76]]");
    }
}
