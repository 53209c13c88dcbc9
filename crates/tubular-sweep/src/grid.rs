//! The body of a swept surface: a regular grid of vertices.

use tubular_math::{Orientation, Point3, Uv, Vec3};

use crate::{Result, SweepError};

/// Which way grid quads are split into triangles so they face outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// `(c, r) → (c, r+1) → (c+1, r+1)` and `(c, r) → (c+1, r+1) → (c+1, r)`.
    /// Used when rows run counter-clockwise about the direction of increasing
    /// columns (tubes and extrusions).
    Forward,
    /// The opposite order, used by lathed surfaces.
    Reversed,
}

/// Coordinates, normals and texture coordinates laid out in
/// `(slices + 1) × (segments + 1)` columns and rows.
///
/// A column is one position along the path (or lathe profile); a row is one
/// position around the cross-section (or rotation). The last row repeats the
/// first so texture coordinates can wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    coords: Vec<Point3>,
    normals: Vec<Vec3>,
    uvs: Vec<Uv>,
    winding: Winding,
}

impl Grid {
    pub(crate) fn with_capacity(slices: usize, segments: usize, winding: Winding) -> Self {
        let n = (slices + 1) * (segments + 1);
        Self {
            cols: slices + 1,
            rows: segments + 1,
            coords: Vec::with_capacity(n),
            normals: Vec::with_capacity(n),
            uvs: Vec::with_capacity(n),
            winding,
        }
    }

    /// Append the next vertex in column-major order.
    pub(crate) fn push(&mut self, coord: Point3, normal: Vec3, uv: Uv) {
        self.coords.push(coord);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    pub(crate) fn set_normal(&mut self, col: usize, row: usize, normal: Vec3) {
        let i = self.index(col, row);
        self.normals[i] = normal;
    }

    /// Fail on the first NaN or infinite coordinate or normal.
    pub(crate) fn check_finite(&self) -> Result<()> {
        for (i, (c, n)) in self.coords.iter().zip(&self.normals).enumerate() {
            let finite = c.coords.iter().chain(n.iter()).all(|x| x.is_finite());
            if !finite {
                return Err(SweepError::NonFinite {
                    column: i / self.rows,
                    row: i % self.rows,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn transform(&mut self, orientation: &Orientation) {
        for c in &mut self.coords {
            *c = Point3::from(orientation.apply_rt(&c.coords));
        }
        for n in &mut self.normals {
            *n = orientation.apply_normal(n);
        }
    }

    /// Flat index of `(col, row)`.
    pub fn index(&self, col: usize, row: usize) -> usize {
        col * self.rows + row
    }

    /// Number of slices (columns minus one).
    pub fn slices(&self) -> usize {
        self.cols - 1
    }

    /// Number of segments (rows minus one).
    pub fn segments(&self) -> usize {
        self.rows - 1
    }

    /// Coordinate at `(col, row)`.
    pub fn coord(&self, col: usize, row: usize) -> Point3 {
        self.coords[self.index(col, row)]
    }

    /// Unit normal at `(col, row)`.
    pub fn normal(&self, col: usize, row: usize) -> Vec3 {
        self.normals[self.index(col, row)]
    }

    /// Texture coordinate at `(col, row)`.
    pub fn uv(&self, col: usize, row: usize) -> Uv {
        self.uvs[self.index(col, row)]
    }

    /// One column of coordinates, in row order.
    pub fn column(&self, col: usize) -> &[Point3] {
        let start = col * self.rows;
        &self.coords[start..start + self.rows]
    }

    /// All coordinates in column-major order.
    pub fn coords(&self) -> &[Point3] {
        &self.coords
    }

    /// All normals in column-major order.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// All texture coordinates in column-major order.
    pub fn uvs(&self) -> &[Uv] {
        &self.uvs
    }

    /// Triangle winding used by [`Grid::triangle_indices`].
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Number of triangles in the body.
    pub fn num_triangles(&self) -> usize {
        2 * self.slices() * self.segments()
    }

    /// Two outward-facing triangles per quad, as flat indices.
    ///
    /// Quads are visited column pair by column pair, row by row, which is the
    /// order a quad strip over each column pair draws them in.
    pub fn triangle_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(3 * self.num_triangles());
        for c in 0..self.slices() {
            for r in 0..self.segments() {
                let a = self.index(c, r);
                let b = self.index(c, r + 1);
                let d = self.index(c + 1, r);
                let e = self.index(c + 1, r + 1);
                match self.winding {
                    Winding::Forward => out.extend([a, b, e, a, e, d]),
                    Winding::Reversed => out.extend([a, e, b, a, d, e]),
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(winding: Winding) -> Grid {
        // 2 slices × 3 segments in the XY plane: column along X, row along Y.
        let mut grid = Grid::with_capacity(2, 3, winding);
        for c in 0..=2 {
            for r in 0..=3 {
                grid.push(
                    Point3::new(c as f64, r as f64, 0.0),
                    Vec3::z(),
                    Uv::new(c as f64 / 2.0, r as f64 / 3.0),
                );
            }
        }
        grid
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = flat_grid(Winding::Forward);
        assert_eq!(grid.slices(), 2);
        assert_eq!(grid.segments(), 3);
        assert_eq!(grid.coords().len(), 12);
        assert_eq!(grid.coord(1, 2), Point3::new(1.0, 2.0, 0.0));
        assert_eq!(grid.column(2).len(), 4);
        assert_eq!(grid.num_triangles(), 12);
    }

    #[test]
    fn test_grid_winding() {
        // Forward triangles face d_row × d_col = Y × X = −Z here.
        for (winding, sign) in [(Winding::Forward, -1.0), (Winding::Reversed, 1.0)] {
            let grid = flat_grid(winding);
            let idx = grid.triangle_indices();
            assert_eq!(idx.len(), 36);
            for tri in idx.chunks(3) {
                let a = grid.coords()[tri[0]];
                let b = grid.coords()[tri[1]];
                let c = grid.coords()[tri[2]];
                let n = (b - a).cross(&(c - a));
                assert!(n.z * sign > 0.0);
            }
        }
    }

    #[test]
    fn test_check_finite() {
        let mut grid = flat_grid(Winding::Forward);
        assert!(grid.check_finite().is_ok());
        grid.set_normal(1, 3, Vec3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(
            grid.check_finite(),
            Err(SweepError::NonFinite { column: 1, row: 3 })
        );
    }
}
