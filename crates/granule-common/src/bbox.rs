//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in geographic degrees.
///
/// Longitudes are not wrapped: a box produced from an antimeridian-normalized
/// ring may extend past 180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every `[x, y]` vertex, or `None` when empty.
    pub fn from_vertices(vertices: &[[f64; 2]]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let mut bbox = Self::new(first[0], first[1], first[0], first[1]);
        for v in rest {
            bbox.min_x = bbox.min_x.min(v[0]);
            bbox.min_y = bbox.min_y.min(v[1]);
            bbox.max_x = bbox.max_x.max(v[0]);
            bbox.max_y = bbox.max_y.max(v[1]);
        }
        Some(bbox)
    }

    /// Parse a "west,south,east,north" string.
    pub fn from_wsen_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Check if this bbox overlaps another (touching edges do not count).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Shift the box along the longitude axis.
    pub fn translate_x(&self, dx: f64) -> BoundingBox {
        BoundingBox::new(self.min_x + dx, self.min_y, self.max_x + dx, self.max_y)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'west,south,east,north'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
