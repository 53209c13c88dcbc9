//! Polygon cross-sections swept along a path.

use tracing::{debug, info};
use tubular_contour::Polygon;
use tubular_math::{Point3, Uv, Vec3};
use tubular_path::Path;

use crate::tube::{check_slices, path_frame};
use crate::{EndCap, Grid, Result, SweepError, SweepOptions, SweptMesh, Winding};

/// Sweep a polygon along a path to make an extrusion.
///
/// The section is placed exactly as in [`tube`](crate::tube). Normals are
/// faceted: each vertex takes the normal of the quad between it, the next
/// column and the next row, so sharp polygon corners stay sharp.
/// Texture `v` follows the polygon's arc-length coordinate.
///
/// Open paths get caps built from the polygon's triangulation; the start cap
/// uses the polygon's texture coordinates and the end cap the mirrored ones.
///
/// # Errors
///
/// Returns an error if the path has zero slices, its frame degenerates, a
/// quad collapses so no normal can be found, or the result contains
/// non-finite values.
pub fn extrude(path: &dyn Path, polygon: &Polygon, options: &SweepOptions) -> Result<SweptMesh> {
    let slices = check_slices(path)?;
    let segments = polygon.segments();
    debug!("Sweeping extrusion: {} slices x {} segments", slices, segments);

    // A mirrored (clockwise) polygon turns the whole surface inside out.
    let ccw = polygon.area() > 0.0;
    let winding = if ccw { Winding::Forward } else { Winding::Reversed };
    let mut grid = Grid::with_capacity(slices, segments, winding);
    for col in 0..=slices {
        let t = col as f64 / slices as f64;
        let (origin, rot) = path_frame(path, col, t)?;
        let scale = options.scale.scale(t);
        for (row, p) in polygon.coords().iter().enumerate() {
            let coord = origin + rot.apply(&Vec3::new(p.x * scale.x, p.y * scale.y, 0.0));
            grid.push(coord, Vec3::zeros(), Uv::new(t, polygon.v()[row]));
        }
    }

    let sign = if ccw { 1.0 } else { -1.0 };
    for col in 0..=slices {
        for row in 0..=segments {
            let normal = facet_normal(&grid, col, row)?;
            grid.set_normal(col, row, normal * sign);
        }
    }
    grid.check_finite()?;

    let (start_cap, end_cap) = if path.is_open() {
        let forward = polygon.triangles().to_vec();
        let reversed: Vec<usize> = forward.chunks(3).flat_map(|t| [t[0], t[2], t[1]]).collect();
        let (start_tris, end_tris) = if ccw { (reversed, forward) } else { (forward, reversed) };

        let start = EndCap::triangles(
            grid.column(0).to_vec(),
            polygon.uv().to_vec(),
            start_tris,
            "start",
        );
        let end = EndCap::triangles(
            grid.column(slices).to_vec(),
            polygon.mirror().uv().to_vec(),
            end_tris,
            "end",
        );
        (start, end)
    } else {
        (None, None)
    };

    let mut mesh = SweptMesh::new(grid, start_cap, end_cap);
    if let Some(orientation) = &options.orientation {
        mesh.transform(orientation);
    }
    info!(
        "Swept extrusion: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

/// Normal of the quad spanned from `(col, row)` towards the next column and
/// the next row, for a counter-clockwise section.
///
/// The last column looks back at its predecessor and flips the result. The
/// last row repeats row 0, so its next row is row 1. If the section has
/// collapsed at this column (zero scale), the neighbouring column's edge is
/// used instead.
fn facet_normal(grid: &Grid, col: usize, row: usize) -> Result<Vec3> {
    let (neighbour, flip) = if col < grid.slices() {
        (col + 1, 1.0)
    } else {
        (col - 1, -1.0)
    };
    let next_row = if row < grid.segments() { row + 1 } else { 1 };

    let here: Point3 = grid.coord(col, row);
    let along = here - grid.coord(neighbour, row);
    let around = grid.coord(col, next_row) - here;

    let mut n = along.cross(&around);
    if n.norm() <= 1e-12 * along.norm() * around.norm() {
        let around = grid.coord(neighbour, next_row) - grid.coord(neighbour, row);
        n = along.cross(&around);
        if n.norm() <= 1e-12 * along.norm() * around.norm() {
            return Err(SweepError::DegenerateGeometry { column: col, row });
        }
    }
    Ok(n.normalize() * flip)
}
