//! Outward buffering of footprints.
//!
//! A buffered ring is returned as convex pieces whose union is the buffered
//! polygon. Convex rings give a single piece. Concave rings are triangulated
//! and each triangle is buffered on its own, which gives the same union since
//! the Minkowski sum distributes over union.

use std::f64::consts::PI;

use crate::geometry::{convex_hull, is_convex, triangulate, Point};

/// Vertices used to approximate the buffer circle.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Expand the convex hull of `points` by `distance` degrees in every
/// direction.
///
/// Computed as the hull of the Minkowski sum with a regular
/// [`CIRCLE_SEGMENTS`]-gon, so corners are rounded. A non-positive or
/// non-finite distance returns the hull itself.
pub fn buffer_convex(points: &[Point], distance: f64) -> Vec<Point> {
    let hull = convex_hull(points);
    if !(distance.is_finite() && distance > 0.0) {
        return hull;
    }

    let offsets: Vec<Point> = (0..CIRCLE_SEGMENTS)
        .map(|k| {
            let theta = 2.0 * PI * k as f64 / CIRCLE_SEGMENTS as f64;
            [distance * theta.cos(), distance * theta.sin()]
        })
        .collect();

    let expanded: Vec<Point> = hull
        .iter()
        .flat_map(|p| offsets.iter().map(move |o| [p[0] + o[0], p[1] + o[1]]))
        .collect();

    convex_hull(&expanded)
}

/// Expand `ring` by `distance` degrees, keeping its concavities.
///
/// Self-intersecting rings cannot be triangulated and fall back to their
/// convex hull.
pub fn buffer_polygon(ring: &[Point], distance: f64) -> Vec<Vec<Point>> {
    if is_convex(ring) {
        return vec![buffer_convex(ring, distance)];
    }

    match triangulate(ring) {
        Some(triangles) => triangles
            .iter()
            .map(|triangle| buffer_convex(triangle, distance))
            .collect(),
        None => {
            tracing::debug!(vertices = ring.len(), "Ring not simple, buffering its hull");
            vec![buffer_convex(ring, distance)]
        }
    }
}
