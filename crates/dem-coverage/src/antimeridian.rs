//! Antimeridian normalization.
//!
//! A footprint crossing ±180° arrives with vertices on both sides of the
//! line, e.g. `179.7` and `-179.3`. Planar algorithms read that ring as a
//! polygon wrapping the other way around the globe. Detection is by raw
//! longitude span: no real scene footprint is wider than
//! [`ANTIMERIDIAN_SPAN_THRESHOLD`] degrees, so a wider ring must be wrapping.
//! Normalization moves negative longitudes into `[180, 360)` so the ring is
//! continuous; the coverage reference is then queried in shifted frames.

use granule_common::BoundingBox;

use crate::geometry::Point;

/// Raw longitude span above which a ring is taken to cross the antimeridian.
pub const ANTIMERIDIAN_SPAN_THRESHOLD: f64 = 180.0;

/// True when the ring wraps across ±180°.
///
/// A ring touching both -180 and 180 is a full-width band (e.g. a polar cap)
/// and does not count as crossing.
pub fn crosses_antimeridian(ring: &[Point]) -> bool {
    match BoundingBox::from_vertices(ring) {
        Some(bbox) => bbox.width() > ANTIMERIDIAN_SPAN_THRESHOLD && !is_full_band(ring),
        None => false,
    }
}

/// True when the ring spans every longitude from -180 to 180.
pub fn is_full_band(ring: &[Point]) -> bool {
    BoundingBox::from_vertices(ring)
        .map(|bbox| bbox.min_x <= -180.0 && bbox.max_x >= 180.0)
        .unwrap_or(false)
}

/// Return the ring in one continuous longitude frame.
///
/// Rings that do not cross are returned unchanged.
pub fn normalize(ring: &[Point]) -> Vec<Point> {
    if !crosses_antimeridian(ring) {
        return ring.to_vec();
    }

    ring.iter()
        .map(|p| if p[0] < 0.0 { [p[0] + 360.0, p[1]] } else { *p })
        .collect()
}
