//! Exact areas over a union of convex pieces, by vertical slab sweep.
//!
//! Slab boundaries are every vertex longitude and every longitude where a
//! piece edge crosses another piece edge or a reference edge. Inside a slab
//! no edges cross, so the covered length along a vertical line varies
//! linearly and its value on the slab midline gives the exact slab area.
//!
//! Reference polygons are filled even-odd, so hole rings can be passed along
//! with the exterior. Distinct reference polygons must not overlap.

use crate::geometry::Point;

type Segment = (Point, Point);
type Span = (f64, f64);

/// Area of the union of convex `pieces`.
pub fn union_area(pieces: &[Vec<Point>]) -> f64 {
    sweep(pieces, None)
}

/// Area of the union of convex `pieces` inside `polygons`, each given as its
/// rings (exterior first, then holes).
pub fn union_intersection_area(pieces: &[Vec<Point>], polygons: &[Vec<&[Point]>]) -> f64 {
    sweep(pieces, Some(polygons))
}

fn sweep(pieces: &[Vec<Point>], polygons: Option<&[Vec<&[Point]>]>) -> f64 {
    let piece_edges: Vec<Vec<Segment>> = pieces.iter().map(|p| edges(p)).collect();
    let polygon_edges: Option<Vec<Vec<Segment>>> = polygons.map(|polygons| {
        polygons
            .iter()
            .map(|rings| rings.iter().flat_map(|ring| edges(ring)).collect())
            .collect()
    });

    let (min_x, max_x) = pieces
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[0]), hi.max(p[0]))
        });
    if min_x >= max_x || !min_x.is_finite() {
        return 0.0;
    }

    let all_piece_edges: Vec<Segment> = piece_edges.iter().flatten().copied().collect();
    let reference_edges: Vec<Segment> = polygon_edges
        .iter()
        .flatten()
        .flatten()
        .copied()
        .collect();

    let mut xs: Vec<f64> = all_piece_edges
        .iter()
        .chain(&reference_edges)
        .map(|(p, _)| p[0])
        .collect();
    for (i, a) in all_piece_edges.iter().enumerate() {
        xs.extend(
            all_piece_edges[i + 1..]
                .iter()
                .chain(&reference_edges)
                .filter_map(|b| crossing_x(a, b)),
        );
    }

    xs.retain(|&x| x >= min_x && x <= max_x);
    xs.push(min_x);
    xs.push(max_x);
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let mut area = 0.0;
    for slab in xs.windows(2) {
        let (left, right) = (slab[0], slab[1]);
        let x = 0.5 * (left + right);

        let covered = merge(
            piece_edges
                .iter()
                .filter_map(|edges| convex_span(edges, x))
                .collect(),
        );
        if covered.is_empty() {
            continue;
        }

        let length = match &polygon_edges {
            None => covered.iter().map(|(lo, hi)| hi - lo).sum(),
            Some(polygon_edges) => {
                let reference = merge(
                    polygon_edges
                        .iter()
                        .flat_map(|edges| even_odd_spans(edges, x))
                        .collect(),
                );
                overlap_length(&covered, &reference)
            }
        };
        area += (right - left) * length;
    }
    area
}

fn edges(ring: &[Point]) -> Vec<Segment> {
    let n = ring.len();
    (0..n)
        .map(|i| (ring[i], ring[(i + 1) % n]))
        .filter(|(a, b)| a != b)
        .collect()
}

/// Latitude where `segment` meets the vertical line at `x`, if it spans it.
fn y_at(segment: &Segment, x: f64) -> Option<f64> {
    let (p, q) = *segment;
    let (lo, hi) = if p[0] < q[0] { (p[0], q[0]) } else { (q[0], p[0]) };
    if !(lo < x && x < hi) {
        return None;
    }
    let t = (x - p[0]) / (q[0] - p[0]);
    Some(p[1] + t * (q[1] - p[1]))
}

/// A vertical line meets a convex ring in at most one span.
fn convex_span(edges: &[Segment], x: f64) -> Option<Span> {
    let (lo, hi) = edges
        .iter()
        .filter_map(|edge| y_at(edge, x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    (lo < hi).then_some((lo, hi))
}

fn even_odd_spans(edges: &[Segment], x: f64) -> Vec<Span> {
    let mut ys: Vec<f64> = edges.iter().filter_map(|edge| y_at(edge, x)).collect();
    ys.sort_by(f64::total_cmp);
    ys.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Sort and union overlapping spans.
fn merge(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (lo, hi) in spans {
        match merged.last_mut() {
            Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// Total length shared by two sorted, disjoint span lists.
fn overlap_length(a: &[Span], b: &[Span]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut total = 0.0;
    while i < a.len() && j < b.len() {
        let lo = a[i].0.max(b[j].0);
        let hi = a[i].1.min(b[j].1);
        if hi > lo {
            total += hi - lo;
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    total
}

/// Longitude where two segments cross, if they do. Parallel segments never
/// cross here; their overlaps introduce no ordering change.
fn crossing_x(a: &Segment, b: &Segment) -> Option<f64> {
    let (p, r) = (a.0, [a.1[0] - a.0[0], a.1[1] - a.0[1]]);
    let (q, s) = (b.0, [b.1[0] - b.0[0], b.1[1] - b.0[1]]);

    let denom = r[0] * s[1] - r[1] * s[0];
    if denom == 0.0 {
        return None;
    }

    let qp = [q[0] - p[0], q[1] - p[1]];
    let t = (qp[0] * s[1] - qp[1] * s[0]) / denom;
    let u = (qp[0] * r[1] - qp[1] * r[0]) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| p[0] + t * r[0])
}
