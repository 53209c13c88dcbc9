//! Flat end caps closing off open sweeps.

use tracing::warn;
use tubular_math::{Orientation, Point3, Uv, Vec3};

/// How a cap's points are joined into triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapTopology {
    /// Point 0 is the centre; every consecutive pair of the remaining ring
    /// points forms a triangle with it.
    Fan,
    /// Explicit triangles, three indices each.
    Triangles(Vec<usize>),
}

/// A planar cap with a single face normal.
#[derive(Debug, Clone, PartialEq)]
pub struct EndCap {
    points: Vec<Point3>,
    uvs: Vec<Uv>,
    normal: Vec3,
    topology: CapTopology,
}

impl EndCap {
    /// A fan cap. `points[0]` is the centre, the rest a closed ring.
    ///
    /// Returns `None` (with a warning) when the fan encloses no area, for
    /// example when the section is scaled to zero.
    pub(crate) fn fan(points: Vec<Point3>, uvs: Vec<Uv>, label: &str) -> Option<Self> {
        Self::build(points, uvs, CapTopology::Fan, label)
    }

    /// A cap from explicit triangles. Returns `None` for zero area.
    pub(crate) fn triangles(
        points: Vec<Point3>,
        uvs: Vec<Uv>,
        indices: Vec<usize>,
        label: &str,
    ) -> Option<Self> {
        Self::build(points, uvs, CapTopology::Triangles(indices), label)
    }

    fn build(
        points: Vec<Point3>,
        uvs: Vec<Uv>,
        topology: CapTopology,
        label: &str,
    ) -> Option<Self> {
        let mut cap = Self {
            points,
            uvs,
            normal: Vec3::zeros(),
            topology,
        };

        // Area-weighted sum of the triangle normals.
        let mut sum = Vec3::zeros();
        for tri in cap.triangle_indices().chunks(3) {
            let a = cap.points[tri[0]];
            sum += (cap.points[tri[1]] - a).cross(&(cap.points[tri[2]] - a));
        }
        let scale = cap
            .points
            .iter()
            .map(|p| p.coords.norm())
            .fold(1.0, f64::max);
        match sum.try_normalize(1e-12 * scale * scale) {
            Some(n) => {
                cap.normal = n;
                Some(cap)
            }
            None => {
                warn!("Skipping degenerate {} cap: zero area", label);
                None
            }
        }
    }

    pub(crate) fn transform(&mut self, orientation: &Orientation) {
        for p in &mut self.points {
            *p = Point3::from(orientation.apply_rt(&p.coords));
        }
        self.normal = orientation.apply_normal(&self.normal);
    }

    /// Cap vertices.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Texture coordinates, one per point.
    pub fn uvs(&self) -> &[Uv] {
        &self.uvs
    }

    /// Outward unit normal shared by every point.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// How the points are joined.
    pub fn topology(&self) -> &CapTopology {
        &self.topology
    }

    /// Flat triangle indices into [`EndCap::points`], wound so the face
    /// points along [`EndCap::normal`].
    pub fn triangle_indices(&self) -> Vec<usize> {
        match &self.topology {
            CapTopology::Fan => (1..self.points.len().saturating_sub(1))
                .flat_map(|i| [0, i, i + 1])
                .collect(),
            CapTopology::Triangles(indices) => indices.clone(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        match &self.topology {
            CapTopology::Fan => self.points.len().saturating_sub(2),
            CapTopology::Triangles(indices) => indices.len() / 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring(z: f64, scale: f64) -> Vec<Point3> {
        let mut pts = vec![Point3::new(0.0, 0.0, z)];
        for (x, y) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0), (1.0, 0.0)] {
            pts.push(Point3::new(x * scale, y * scale, z));
        }
        pts
    }

    #[test]
    fn test_fan_cap() {
        let pts = square_ring(2.0, 1.0);
        let uvs = vec![Uv::default(); pts.len()];
        let cap = EndCap::fan(pts, uvs, "test").unwrap();
        assert_eq!(cap.num_triangles(), 4);
        assert_eq!(cap.triangle_indices().len(), 12);
        assert_eq!(cap.triangle_indices()[..3], [0, 1, 2]);
        assert!((cap.normal() - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_fan_cap_reversed_ring() {
        let mut pts = square_ring(0.0, 1.0);
        pts[1..].reverse();
        let uvs = vec![Uv::default(); pts.len()];
        let cap = EndCap::fan(pts, uvs, "test").unwrap();
        assert!((cap.normal() + Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_cap_skipped() {
        let pts = square_ring(5.0, 0.0);
        let uvs = vec![Uv::default(); pts.len()];
        assert!(EndCap::fan(pts, uvs, "test").is_none());
    }

    #[test]
    fn test_triangle_cap_transform() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut cap =
            EndCap::triangles(pts, vec![Uv::default(); 3], vec![0, 1, 2], "test").unwrap();
        let o = Orientation::from_up(Vec3::new(0.0, 0.0, 3.0), &Vec3::x()).unwrap();
        cap.transform(&o);
        // +Y maps to +X, so the +Z normal stays put and points shift up by 3.
        assert!((cap.normal() - Vec3::z()).norm() < 1e-12);
        assert!((cap.points()[2] - Point3::new(1.0, 0.0, 3.0)).norm() < 1e-12);
    }
}
