//! Arbitrary simple polygon cross-section.

use tracing::debug;
use tubular_math::{Point2, Tolerance, Uv};

use crate::{signed_area, triangulate, ContourError, Result};

/// A simple polygon in the XY plane.
///
/// Construction copies the input, closes the ring, and reverses it when it
/// runs clockwise, so every polygon built by [`Polygon::new`] is
/// counter-clockwise. It caches per-vertex texture coordinates, the
/// arc-length `v` coordinate of each vertex, and an ear-clipped
/// triangulation for end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    coords: Vec<Point2>,
    uv: Vec<Uv>,
    v: Vec<f64>,
    length: f64,
    triangles: Vec<usize>,
}

impl Polygon {
    /// Build a polygon from vertices given in either winding, with or
    /// without a repeated closing vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 distinct vertices remain, two
    /// consecutive vertices coincide, the polygon encloses no area, or it
    /// cannot be triangulated.
    pub fn new(vertices: &[Point2]) -> Result<Self> {
        let tol = Tolerance::DEFAULT;
        let mut ring = vertices.to_vec();
        if ring.len() > 1 && tol.points2_equal(&ring[0], &ring[ring.len() - 1]) {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(ContourError::TooFewVertices {
                min: 3,
                actual: ring.len(),
            });
        }
        for i in 0..ring.len() {
            let next = (i + 1) % ring.len();
            if tol.points2_equal(&ring[i], &ring[next]) {
                return Err(ContourError::DuplicateVertex { index: next });
            }
        }

        // Relative to the bounding box, so tiny polygons are judged by shape.
        let area = signed_area(&ring);
        let extent = bounding_extent(&ring);
        if area.abs() <= tol.linear * extent * extent {
            return Err(ContourError::ZeroArea);
        }
        if area < 0.0 {
            debug!("Reversing clockwise polygon ({} vertices)", ring.len());
            ring.reverse();
        }

        let triangles = triangulate(&ring)?;
        ring.push(ring[0]);
        Ok(Self::assemble(ring, triangles))
    }

    fn assemble(coords: Vec<Point2>, triangles: Vec<usize>) -> Self {
        let uv = box_uv(&coords);
        let (v, length) = arc_v(&coords);
        Self {
            coords,
            uv,
            v,
            length,
            triangles,
        }
    }

    /// The polygon reflected across the Y axis (`x → −x`).
    ///
    /// Vertex order is kept so indices still line up with a swept grid's
    /// rows. The reflection alone turns the ring and every cached triangle
    /// clockwise, so the triangle indices are reused as they are.
    /// Mirroring twice gives back the original polygon.
    pub fn mirror(&self) -> Self {
        let coords = self.coords.iter().map(|p| Point2::new(-p.x, p.y)).collect();
        Self::assemble(coords, self.triangles.clone())
    }

    /// Number of edges.
    pub fn segments(&self) -> usize {
        self.coords.len() - 1
    }

    /// Ring points; the last repeats the first.
    pub fn coords(&self) -> &[Point2] {
        &self.coords
    }

    /// Per-vertex texture coordinates from the bounding box, mirrored in `u`.
    pub fn uv(&self) -> &[Uv] {
        &self.uv
    }

    /// Cumulative arc length to each vertex as a fraction of the perimeter.
    /// Starts at 0 and ends at 1.
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    /// Perimeter.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Cap triangulation: three indices into [`Polygon::coords`] per triangle.
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Number of cap triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Signed area; positive for a polygon built by [`Polygon::new`].
    pub fn area(&self) -> f64 {
        signed_area(&self.coords)
    }
}

/// Bounding-box texture coordinates: `u = 1 − (x − min_x)/range_x`,
/// `v = (y − min_y)/range_y`.
/// Larger side of the axis-aligned bounding box.
fn bounding_extent(points: &[Point2]) -> f64 {
    let (mut lo, mut hi) = (points[0], points[0]);
    for p in points {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    (hi - lo).amax()
}

fn box_uv(coords: &[Point2]) -> Vec<Uv> {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in coords {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let range_x = max_x - min_x;
    let range_y = max_y - min_y;
    coords
        .iter()
        .map(|p| Uv::new(1.0 - (p.x - min_x) / range_x, (p.y - min_y) / range_y))
        .collect()
}

/// Normalised cumulative arc length per vertex, and the total length.
fn arc_v(coords: &[Point2]) -> (Vec<f64>, f64) {
    let mut acc = Vec::with_capacity(coords.len());
    let mut total = 0.0;
    acc.push(0.0);
    for w in coords.windows(2) {
        total += (w[1] - w[0]).norm();
        acc.push(total);
    }
    let v = acc.iter().map(|d| d / total).collect();
    (v, total)
}
