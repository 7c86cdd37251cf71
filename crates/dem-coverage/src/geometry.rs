//! Planar polygon primitives on `[lon, lat]` degree coordinates.
//!
//! Rings are slices of vertices and may be open or closed; a repeated
//! closing vertex contributes nothing to any computation here.

/// A `[x, y]` vertex, longitude first.
pub type Point = [f64; 2];

/// Cross product of `oa` and `ob`. Positive when `b` is left of `o -> a`.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a[0] * b[1] - b[0] * a[1];
    }
    sum / 2.0
}

/// Unsigned ring area in square degrees.
pub fn area(ring: &[Point]) -> f64 {
    signed_area(ring).abs()
}

/// Convex hull in counter-clockwise order, open (no repeated vertex).
///
/// Collinear and non-finite points are dropped. Fewer than three distinct
/// input points come back as-is (sorted), which has zero area.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .collect();
    pts.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    // Andrew's monotone chain
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Clip `subject` to the convex, counter-clockwise ring `clip`
/// (Sutherland-Hodgman).
///
/// `subject` may be concave. The result can then contain zero-width bridges
/// along the clip boundary; they add no area, so `area()` of the result is the
/// exact intersection area.
pub fn clip_to_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    if clip.len() < 3 || subject.len() < 3 {
        return Vec::new();
    }

    let mut output: Vec<Point> = subject.to_vec();

    for i in 0..clip.len() {
        if output.is_empty() {
            break;
        }

        let a = clip[i];
        let b = clip[(i + 1) % clip.len()];
        let input = std::mem::take(&mut output);

        let mut prev = input[input.len() - 1];
        for &cur in &input {
            let d_prev = cross(a, b, prev);
            let d_cur = cross(a, b, cur);

            if d_cur >= 0.0 {
                if d_prev < 0.0 {
                    output.push(edge_crossing(prev, cur, d_prev, d_cur));
                }
                output.push(cur);
            } else if d_prev >= 0.0 {
                output.push(edge_crossing(prev, cur, d_prev, d_cur));
            }
            prev = cur;
        }
    }

    output
}

/// Point where segment `p -> q` meets the clip line, given the signed
/// distances (cross products) of both ends. The signs differ.
fn edge_crossing(p: Point, q: Point, d_p: f64, d_q: f64) -> Point {
    let t = d_p / (d_p - d_q);
    [p[0] + t * (q[0] - p[0]), p[1] + t * (q[1] - p[1])]
}

/// Area of the intersection of a (possibly concave) ring with a convex ring.
pub fn intersection_area(subject: &[Point], convex: &[Point]) -> f64 {
    area(&clip_to_convex(subject, convex))
}

/// Shift every vertex along the longitude axis.
pub fn translate_x(ring: &[Point], dx: f64) -> Vec<Point> {
    ring.iter().map(|p| [p[0] + dx, p[1]]).collect()
}

/// True when the ring encloses the same area as its convex hull.
///
/// Degenerate rings (no area) count as convex.
pub fn is_convex(ring: &[Point]) -> bool {
    let hull = area(&convex_hull(ring));
    hull - area(ring) <= 1e-12 * hull.max(1.0)
}

/// Split a simple ring into triangles by ear clipping.
///
/// Either orientation is accepted; triangles come back counter-clockwise.
/// Returns `None` when no ear can be found, which happens for
/// self-intersecting rings.
pub fn triangulate(ring: &[Point]) -> Option<Vec<[Point; 3]>> {
    let mut pts: Vec<Point> = ring.to_vec();
    pts.dedup();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if signed_area(&pts) < 0.0 {
        pts.reverse();
    }

    let mut remaining: Vec<usize> = (0..pts.len()).collect();
    let mut triangles = Vec::with_capacity(pts.len().saturating_sub(2));

    while remaining.len() > 3 {
        let m = remaining.len();
        let corner = |i: usize| {
            (
                pts[remaining[(i + m - 1) % m]],
                pts[remaining[i]],
                pts[remaining[(i + 1) % m]],
            )
        };

        let ear = (0..m).find(|&i| {
            let (a, b, c) = corner(i);
            cross(a, b, c) > 0.0
                && remaining.iter().all(|&j| {
                    let p = pts[j];
                    p == a || p == b || p == c || !in_triangle(p, a, b, c)
                })
        });

        match ear {
            Some(i) => {
                let (a, b, c) = corner(i);
                triangles.push([a, b, c]);
                remaining.remove(i);
            }
            None => {
                // Collinear vertices add no area and can block every ear
                let flat = (0..m).find(|&i| {
                    let (a, b, c) = corner(i);
                    cross(a, b, c).abs() <= f64::EPSILON
                })?;
                remaining.remove(flat);
            }
        }
    }

    if let &[a, b, c] = remaining.as_slice() {
        if cross(pts[a], pts[b], pts[c]) > 0.0 {
            triangles.push([pts[a], pts[b], pts[c]]);
        }
    }
    Some(triangles)
}

/// Whether `p` lies inside or on the counter-clockwise triangle `abc`.
fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = unit_square();
        let mut cw = ccw.clone();
        cw.reverse();

        assert!((signed_area(&ccw) - 1.0).abs() < 1e-12);
        assert!((signed_area(&cw) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_ring_same_area() {
        let mut closed = unit_square();
        closed.push([0.0, 0.0]);
        assert!((area(&closed) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convex_hull_drops_interior_and_collinear() {
        let points = vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 2.0],
            [0.0, 2.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(signed_area(&hull) > 0.0);
        assert!((area(&hull) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_convex_hull_degenerate() {
        assert_eq!(convex_hull(&[[1.0, 1.0], [1.0, 1.0]]).len(), 1);
        assert_eq!(area(&convex_hull(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]])), 0.0);
    }

    #[test]
    fn test_clip_overlapping_squares() {
        let subject = translate_x(&unit_square(), 0.5);
        let clipped = clip_to_convex(&subject, &unit_square());
        assert!((area(&clipped) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clip_disjoint_is_empty() {
        let subject = translate_x(&unit_square(), 3.0);
        assert!(clip_to_convex(&subject, &unit_square()).is_empty());
    }

    #[test]
    fn test_clip_concave_subject() {
        // U shape: 3x3 square with a 1x2 notch cut from the top middle
        let u_shape = u_shape();
        // Band across the upper part cuts the U into two separate pieces
        let band = vec![[-1.0, 2.0], [4.0, 2.0], [4.0, 2.5], [-1.0, 2.5]];

        assert!((intersection_area(&u_shape, &band) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clip_clockwise_subject() {
        let mut subject = translate_x(&unit_square(), 0.25);
        subject.reverse();
        assert!((intersection_area(&subject, &unit_square()) - 0.75).abs() < 1e-12);
    }

    fn u_shape() -> Vec<Point> {
        vec![
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
        ]
    }

    #[test]
    fn test_is_convex() {
        assert!(is_convex(&unit_square()));
        assert!(is_convex(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]));
        assert!(is_convex(&[[0.0, 0.0], [1.0, 1.0]]));
        assert!(!is_convex(&u_shape()));
    }

    #[test]
    fn test_triangulate_concave_ring() {
        let triangles = triangulate(&u_shape()).unwrap();
        let total: f64 = triangles.iter().map(|t| signed_area(t)).sum();
        assert!((total - 7.0).abs() < 1e-12);
        assert!(triangles.iter().all(|t| signed_area(t) > 0.0));
    }

    #[test]
    fn test_triangulate_clockwise_closed_with_collinear() {
        let ring = vec![
            [0.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
            [2.0, 1.0],
            [2.0, 0.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ];
        let triangles = triangulate(&ring).unwrap();
        let total: f64 = triangles.iter().map(|t| area(t)).sum();
        assert!((total - 4.0).abs() < 1e-12);
    }
}
