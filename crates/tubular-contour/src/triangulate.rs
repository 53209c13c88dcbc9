//! Ear-clipping triangulation of simple polygons.

use tubular_math::{Point2, Tolerance};

use crate::{signed_area, ContourError, Result};

/// Cross products below this are treated as non-convex.
const EPSILON: f64 = 1e-30;

/// Triangulate a simple, hole-free polygon by ear clipping.
///
/// The polygon may be given in either winding; a repeated closing point is
/// ignored. Returns indices into `points`, three per triangle, always in
/// counter-clockwise order.
///
/// # Errors
///
/// Returns [`ContourError::TooFewVertices`] for fewer than three vertices and
/// [`ContourError::TriangulationFailed`] when no ear can be found (a
/// self-intersecting or degenerate input).
pub fn triangulate(points: &[Point2]) -> Result<Vec<usize>> {
    let mut n = points.len();
    if n > 1 && Tolerance::DEFAULT.points2_equal(&points[0], &points[n - 1]) {
        n -= 1;
    }
    if n < 3 {
        return Err(ContourError::TooFewVertices { min: 3, actual: n });
    }
    let pts = &points[..n];

    // Work on a counter-clockwise index list.
    let mut remaining: Vec<usize> = if signed_area(pts) > 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };

    let mut out = Vec::with_capacity(3 * (n - 2));
    while remaining.len() > 2 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let prev = (i + m - 1) % m;
            let next = (i + 1) % m;
            is_ear(pts, &remaining, prev, i, next)
        });

        let Some(i) = ear else {
            return Err(ContourError::TriangulationFailed { remaining: m });
        };
        let prev = (i + m - 1) % m;
        let next = (i + 1) % m;
        out.extend([remaining[prev], remaining[i], remaining[next]]);
        remaining.remove(i);
    }

    Ok(out)
}

/// Whether the corner `(prev, cur, next)` of the remaining ring can be
/// clipped: it must turn left and contain no other remaining vertex, with
/// points on the boundary counting as contained.
fn is_ear(pts: &[Point2], remaining: &[usize], prev: usize, cur: usize, next: usize) -> bool {
    let a = pts[remaining[prev]];
    let b = pts[remaining[cur]];
    let c = pts[remaining[next]];

    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross < EPSILON {
        return false;
    }

    !remaining.iter().enumerate().any(|(j, &idx)| {
        j != prev && j != cur && j != next && inside_triangle(a, b, c, pts[idx])
    })
}

/// Inclusive point-in-triangle test for a counter-clockwise triangle.
fn inside_triangle(a: Point2, b: Point2, c: Point2, p: Point2) -> bool {
    let edge = |from: Point2, to: Point2| {
        (to.x - from.x) * (p.y - from.y) - (to.y - from.y) * (p.x - from.x)
    };
    edge(a, b) >= 0.0 && edge(b, c) >= 0.0 && edge(c, a) >= 0.0
}
