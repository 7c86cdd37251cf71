//! The DEM coverage reference: every area with usable DEM data.
//!
//! The reference is a set of non-overlapping polygons in `[-180, 180]`
//! longitude, indexed by a uniform grid of [`INDEX_CELL_DEGREES`] cells. It is
//! built once at start-up and shared read-only between validations.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use granule_common::{BoundingBox, Footprint};
use tracing::{debug, info};

use crate::antimeridian;
use crate::buffer::buffer_polygon;
use crate::error::{CoverageError, CoverageResult};
use crate::geojson;
use crate::geometry::{self, Point};
use crate::overlay;
use crate::CoverageParams;

/// Size of a spatial index cell in degrees.
pub const INDEX_CELL_DEGREES: f64 = 1.0;

const WORLD: BoundingBox = BoundingBox {
    min_x: -180.0,
    min_y: -90.0,
    max_x: 180.0,
    max_y: 90.0,
};

/// Longitude frames a query is evaluated in. A normalized footprint may sit
/// past 180 (or a buffered one past -180); shifting it by 360 brings that part
/// back over the reference.
const FRAME_SHIFTS: [f64; 3] = [-360.0, 0.0, 360.0];

/// Buffered full-width bands are cut back to this strip so no longitude is
/// counted twice.
const LONGITUDE_STRIP: [Point; 4] = [
    [-180.0, -360.0],
    [180.0, -360.0],
    [180.0, 360.0],
    [-180.0, 360.0],
];

/// One polygon of DEM coverage, with optional holes.
#[derive(Debug, Clone)]
pub struct CoveragePolygon {
    exterior: Vec<Point>,
    holes: Vec<Vec<Point>>,
    bbox: BoundingBox,
}

impl CoveragePolygon {
    /// Build a polygon from its exterior ring and hole rings.
    pub fn new(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> CoverageResult<Self> {
        if exterior.len() < 3 {
            return Err(CoverageError::InvalidGeometry(format!(
                "exterior ring needs at least 3 vertices, got {}",
                exterior.len()
            )));
        }
        if exterior
            .iter()
            .chain(holes.iter().flatten())
            .any(|p| !(p[0].is_finite() && p[1].is_finite()))
        {
            return Err(CoverageError::InvalidGeometry(
                "non-finite coordinate".to_string(),
            ));
        }

        let bbox = BoundingBox::from_vertices(&exterior).ok_or_else(|| {
            CoverageError::InvalidGeometry("empty exterior ring".to_string())
        })?;

        Ok(Self {
            exterior,
            holes,
            bbox,
        })
    }

    /// The 1x1 degree tile whose south-west corner is `(lon, lat)`.
    pub fn tile(lon: i32, lat: i32) -> Self {
        let (x, y) = (lon as f64, lat as f64);
        let exterior = vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0]];
        Self {
            bbox: BoundingBox::new(x, y, x + 1.0, y + 1.0),
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    /// Exterior ring followed by the hole rings.
    fn rings(&self) -> Vec<&[Point]> {
        std::iter::once(self.exterior.as_slice())
            .chain(self.holes.iter().map(Vec::as_slice))
            .collect()
    }

    /// Area of this polygon inside the convex counter-clockwise ring `clip`.
    fn intersection_area(&self, clip: &[Point]) -> f64 {
        let outer = geometry::intersection_area(&self.exterior, clip);
        if outer == 0.0 {
            return 0.0;
        }

        let holes: f64 = self
            .holes
            .iter()
            .map(|hole| geometry::intersection_area(hole, clip))
            .sum();
        (outer - holes).max(0.0)
    }
}

/// Indexed, read-only DEM coverage geometry.
#[derive(Debug, Clone, Default)]
pub struct CoverageReference {
    polygons: Vec<CoveragePolygon>,
    index: HashMap<(i32, i32), Vec<usize>>,
}

impl CoverageReference {
    /// Build and index a reference from polygons.
    pub fn new(polygons: Vec<CoveragePolygon>) -> Self {
        let mut index: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (id, polygon) in polygons.iter().enumerate() {
            for cell in cells_for(&polygon.bbox) {
                index.entry(cell).or_default().push(id);
            }
        }

        Self { polygons, index }
    }

    /// Build a reference from 1x1 degree tiles given by south-west corner.
    pub fn from_tiles<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        Self::new(
            tiles
                .into_iter()
                .map(|(lon, lat)| CoveragePolygon::tile(lon, lat))
                .collect(),
        )
    }

    /// Parse a GeoJSON FeatureCollection.
    pub fn from_geojson_str(json: &str) -> CoverageResult<Self> {
        Ok(Self::new(geojson::parse_feature_collection(json)?))
    }

    /// Load a GeoJSON FeatureCollection from disk.
    pub fn load(path: impl AsRef<Path>) -> CoverageResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoverageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reference = Self::from_geojson_str(&json)?;
        info!(
            path = %path.display(),
            polygons = reference.len(),
            cells = reference.index.len(),
            "Loaded DEM coverage reference"
        );
        Ok(reference)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Area of the convex counter-clockwise ring `clip` covered by DEM data,
    /// in square degrees.
    pub fn intersection_area(&self, clip: &[Point]) -> f64 {
        let Some(bbox) = BoundingBox::from_vertices(clip) else {
            return 0.0;
        };

        let mut total = 0.0;
        for shift in FRAME_SHIFTS {
            let frame_bbox = bbox.translate_x(shift);
            if !frame_bbox.intersects(&WORLD) {
                continue;
            }

            let ring = geometry::translate_x(clip, shift);
            for id in self.candidates(&frame_bbox) {
                let polygon = &self.polygons[id];
                if polygon.bbox.intersects(&frame_bbox) {
                    total += polygon.intersection_area(&ring);
                }
            }
        }
        total
    }

    /// Area of the union of convex `pieces` covered by DEM data, in square
    /// degrees.
    fn union_intersection_area(&self, pieces: &[Vec<Point>]) -> f64 {
        let vertices: Vec<Point> = pieces.iter().flatten().copied().collect();
        let Some(bbox) = BoundingBox::from_vertices(&vertices) else {
            return 0.0;
        };

        let mut total = 0.0;
        for shift in FRAME_SHIFTS {
            let frame_bbox = bbox.translate_x(shift);
            if !frame_bbox.intersects(&WORLD) {
                continue;
            }

            let polygons: Vec<Vec<&[Point]>> = self
                .candidates(&frame_bbox)
                .into_iter()
                .map(|id| &self.polygons[id])
                .filter(|polygon| polygon.bbox.intersects(&frame_bbox))
                .map(CoveragePolygon::rings)
                .collect();
            if polygons.is_empty() {
                continue;
            }

            let shifted: Vec<Vec<Point>> = pieces
                .iter()
                .map(|piece| geometry::translate_x(piece, shift))
                .collect();
            total += overlay::union_intersection_area(&shifted, &polygons);
        }
        total
    }

    /// Fraction of the buffered footprint that has DEM coverage, in `[0, 1]`.
    ///
    /// The footprint is normalized across the antimeridian, then buffered
    /// outward by `buffer` degrees with its concavities kept. A full-width
    /// band is cut back to `[-180, 180]` after buffering. A footprint whose
    /// buffered area is zero has ratio 0.
    pub fn coverage_ratio(&self, footprint: &Footprint, buffer: f64) -> f64 {
        let ring = antimeridian::normalize(footprint.open_ring());
        let mut pieces = buffer_polygon(&ring, buffer);
        if antimeridian::is_full_band(&ring) {
            pieces = pieces
                .iter()
                .map(|piece| geometry::clip_to_convex(piece, &LONGITUDE_STRIP))
                .filter(|piece| piece.len() >= 3)
                .collect();
        }

        let total_area = match pieces.as_slice() {
            [single] => geometry::area(single),
            _ => overlay::union_area(&pieces),
        };
        if total_area <= f64::EPSILON {
            return 0.0;
        }

        let covered = match pieces.as_slice() {
            [single] => self.intersection_area(single),
            _ => self.union_intersection_area(&pieces),
        };
        let ratio = (covered / total_area).clamp(0.0, 1.0);
        debug!(
            buffer,
            pieces = pieces.len(),
            total_area,
            covered,
            ratio,
            "Computed DEM coverage ratio"
        );
        ratio
    }

    /// Whether the footprint's coverage ratio reaches `params.threshold`.
    pub fn has_sufficient_coverage(&self, footprint: &Footprint, params: &CoverageParams) -> bool {
        self.coverage_ratio(footprint, params.buffer) >= params.threshold
    }

    fn candidates(&self, bbox: &BoundingBox) -> BTreeSet<usize> {
        cells_for(bbox)
            .filter_map(|cell| self.index.get(&cell))
            .flatten()
            .copied()
            .collect()
    }
}

/// Index cells overlapped by `bbox`, clamped to the world.
fn cells_for(bbox: &BoundingBox) -> impl Iterator<Item = (i32, i32)> {
    let (x0, x1) = cell_range(bbox.min_x, bbox.max_x, -180, 179);
    let (y0, y1) = cell_range(bbox.min_y, bbox.max_y, -90, 89);
    (x0..=x1).flat_map(move |x| (y0..=y1).map(move |y| (x, y)))
}

fn cell_range(min: f64, max: f64, lower: i32, upper: i32) -> (i32, i32) {
    let start = (min / INDEX_CELL_DEGREES).floor();
    let end = ((max / INDEX_CELL_DEGREES).ceil() - 1.0).max(start);
    let start = (start.max(lower as f64)) as i32;
    let end = (end.min(upper as f64)) as i32;
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_range() {
        assert_eq!(cell_range(0.0, 1.0, -180, 179), (0, 0));
        assert_eq!(cell_range(0.5, 1.5, -180, 179), (0, 1));
        assert_eq!(cell_range(-0.5, -0.5, -180, 179), (-1, -1));
        assert_eq!(cell_range(179.5, 181.0, -180, 179), (179, 179));
    }

    #[test]
    fn test_cells_outside_world_empty() {
        let bbox = BoundingBox::new(200.0, 0.0, 210.0, 1.0);
        assert_eq!(cells_for(&bbox).count(), 0);
    }

    #[test]
    fn test_index_lookup() {
        let reference = CoverageReference::from_tiles([(0, 0), (5, 5)]);
        let hits = reference.candidates(&BoundingBox::new(-0.5, -0.5, 0.5, 0.5));
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_intersection_area_tiles() {
        let reference = CoverageReference::from_tiles([(0, 0), (1, 0)]);
        let clip = vec![[0.5, 0.0], [1.5, 0.0], [1.5, 1.0], [0.5, 1.0]];
        assert!((reference.intersection_area(&clip) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_wraps_past_180() {
        let reference = CoverageReference::from_tiles([(179, 0), (-180, 0)]);
        let clip = vec![[179.5, 0.0], [180.5, 0.0], [180.5, 1.0], [179.5, 1.0]];
        assert!((reference.intersection_area(&clip) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_holes_subtracted() {
        let polygon = CoveragePolygon::new(
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
            vec![vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]]],
        )
        .unwrap();
        let reference = CoverageReference::new(vec![polygon]);
        let clip = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];
        assert!((reference.intersection_area(&clip) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_polygon_rejected() {
        assert!(CoveragePolygon::new(vec![[0.0, 0.0], [1.0, 0.0]], vec![]).is_err());
        assert!(CoveragePolygon::new(
            vec![[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0]],
            vec![]
        )
        .is_err());
    }

    fn u_shape() -> Footprint {
        // 3x3 square with a 1x2 notch open to the north
        Footprint::new(vec![
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
            [0.0, 0.0],
        ])
    }

    #[test]
    fn test_concave_footprint_notch_not_counted() {
        let reference = CoverageReference::from_tiles([(1, 2)]);
        let footprint = u_shape();

        assert_eq!(reference.coverage_ratio(&footprint, 0.0), 0.0);
        assert!(!reference.has_sufficient_coverage(
            &footprint,
            &CoverageParams::default().with_buffer(0.0).with_threshold(0.1)
        ));
    }

    #[test]
    fn test_concave_footprint_buffered_notch() {
        // Only the buffered notch walls reach the tile: 2 x 0.15 x 1
        let reference = CoverageReference::from_tiles([(1, 2)]);
        let r: f64 = 0.15;
        let total = 7.0 + 16.0 * r + 1.5 * std::f64::consts::PI * r * r - 2.0 * r * r;

        let ratio = reference.coverage_ratio(&u_shape(), r);
        assert!((ratio - 0.3 / total).abs() < 1e-4, "got {ratio}");
    }

    #[test]
    fn test_concave_footprint_full_coverage() {
        let reference =
            CoverageReference::from_tiles((0..3).flat_map(|x| (0..3).map(move |y| (x, y))));
        assert!((reference.coverage_ratio(&u_shape(), 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_buffered_band_counts_each_longitude_once() {
        let reference = CoverageReference::from_tiles([(-180, -70)]);
        let band = Footprint::rectangle(-69.5, -70.5, 180.0, -180.0);

        // Buffered band is 360 x 1.3 once cut back to [-180, 180]; the tile
        // holds 1 x 0.65 of it
        let ratio = reference.coverage_ratio(&band, 0.15);
        assert!((ratio * 468.0 - 0.65).abs() < 1e-6, "got {ratio}");
    }

    #[test]
    fn test_degenerate_footprint_has_zero_ratio() {
        let reference = CoverageReference::from_tiles([(0, 0)]);
        let line = Footprint::new(vec![[0.2, 0.2], [0.8, 0.8]]);
        assert_eq!(reference.coverage_ratio(&line, 0.0), 0.0);
    }
}
