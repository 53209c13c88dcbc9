//! Closed solids generated directly as grids: ellipsoids, double cones and
//! boxes.

use std::f64::consts::{PI, TAU};

use tracing::{debug, info};
use tubular_contour::Polygon;
use tubular_math::{Orientation, Point2, Point3, Tolerance, Uv, Vec3};
use tubular_path::{Linear, OrthogonalFrame};

use crate::{extrude, Grid, Result, SweepError, SweepOptions, SweptMesh, Winding};

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SweepError::InvalidParameter { name, value })
    }
}

fn finish(mut grid: Grid, orientation: Option<&Orientation>, label: &str) -> Result<SweptMesh> {
    grid.check_finite()?;
    let mut mesh = SweptMesh::new(grid, None, None);
    if let Some(orientation) = orientation {
        mesh.transform(orientation);
    }
    info!(
        "Built {}: {} vertices, {} triangles",
        label,
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

/// An ellipsoid centred on the origin.
///
/// Columns run from the south pole `(0, −radius_y, 0)` to the north pole,
/// rows around the Y axis. Normals are the exact surface normals
/// `(x/rx², y/ry², z/rz²)`, normalised. Texture coordinates are
/// `(row / segments, col / slices)`. There are no caps.
///
/// # Errors
///
/// Returns an error if a radius is not positive, `slices < 2` or
/// `segments < 3`.
pub fn ellipsoid(
    radius_x: f64,
    radius_y: f64,
    radius_z: f64,
    slices: usize,
    segments: usize,
    orientation: Option<&Orientation>,
) -> Result<SweptMesh> {
    check_positive("radius_x", radius_x)?;
    check_positive("radius_y", radius_y)?;
    check_positive("radius_z", radius_z)?;
    if slices < 2 {
        return Err(SweepError::InvalidDetail(slices));
    }
    if segments < 3 {
        return Err(SweepError::InvalidDetail(segments));
    }
    debug!("Building ellipsoid: {} slices x {} segments", slices, segments);

    let (rx2, ry2, rz2) = (radius_x * radius_x, radius_y * radius_y, radius_z * radius_z);
    let mut grid = Grid::with_capacity(slices, segments, Winding::Reversed);
    for col in 0..=slices {
        let (sin_ns, cos_ns) = (PI * col as f64 / slices as f64).sin_cos();
        for row in 0..=segments {
            let (sin_ew, cos_ew) = (TAU * row as f64 / segments as f64).sin_cos();
            let coord = Point3::new(
                radius_x * sin_ns * cos_ew,
                -radius_y * cos_ns,
                radius_z * sin_ns * sin_ew,
            );
            let normal = Vec3::new(coord.x / rx2, coord.y / ry2, coord.z / rz2)
                .try_normalize(f64::MIN_POSITIVE)
                .ok_or(SweepError::DegenerateGeometry { column: col, row })?;
            grid.push(
                coord,
                normal,
                Uv::new(row as f64 / segments as f64, col as f64 / slices as f64),
            );
        }
    }
    finish(grid, orientation, "ellipsoid")
}

/// Two cones sharing an elliptical base in the XZ plane.
///
/// The base has radii `radius_x`, `radius_z`; the apexes sit on the Y axis
/// at `bottom` (below the base) and `top` (above it). The grid has three
/// slices: bottom apex, base ring with the lower cone's normals, base ring
/// with the upper cone's normals, top apex. The middle quads have zero area
/// and keep the crease at the base sharp. Normals are smooth around each
/// cone.
///
/// # Errors
///
/// Returns an error if a radius is not positive, `bottom` is not below zero,
/// `top` is not above zero, or `segments < 3`.
pub fn double_cone(
    radius_x: f64,
    radius_z: f64,
    bottom: f64,
    top: f64,
    segments: usize,
    orientation: Option<&Orientation>,
) -> Result<SweptMesh> {
    check_positive("radius_x", radius_x)?;
    check_positive("radius_z", radius_z)?;
    if !(bottom.is_finite() && bottom < 0.0) {
        return Err(SweepError::InvalidParameter {
            name: "bottom",
            value: bottom,
        });
    }
    check_positive("top", top)?;
    if segments < 3 {
        return Err(SweepError::InvalidDetail(segments));
    }
    debug!("Building double cone: {} segments", segments);

    let eps = Tolerance::DEFAULT.linear;
    let mut grid = Grid::with_capacity(3, segments, Winding::Reversed);
    for (col, apex) in [bottom, bottom, top, top].into_iter().enumerate() {
        let at_apex = col == 0 || col == 3;
        for row in 0..=segments {
            let (sin, cos) = (TAU * row as f64 / segments as f64).sin_cos();
            let rim = Point3::new(radius_x * cos, 0.0, radius_z * sin);
            let around = Vec3::new(-radius_x * sin, 0.0, radius_z * cos);
            let slant = Vec3::new(rim.x, -apex, rim.z);
            let normal = (around.cross(&slant) * apex.signum())
                .try_normalize(eps)
                .ok_or(SweepError::DegenerateGeometry { column: col, row })?;
            let coord = if at_apex { Point3::new(0.0, apex, 0.0) } else { rim };
            grid.push(coord, normal, Uv::new(row as f64 / segments as f64, col as f64 / 3.0));
        }
    }
    finish(grid, orientation, "double cone")
}

/// An axis-aligned box centred on the origin: `width` along X, `height`
/// along Y, `depth` along Z.
///
/// Built as a one-slice extrusion of a rectangle along +Z, so the sides are
/// the body (faceted normals) and the ±Z faces are its caps.
///
/// # Errors
///
/// Returns an error if a dimension is not positive.
pub fn boxed(
    width: f64,
    height: f64,
    depth: f64,
    orientation: Option<&Orientation>,
) -> Result<SweptMesh> {
    check_positive("width", width)?;
    check_positive("height", height)?;
    check_positive("depth", depth)?;

    // Along +Z the axis-X frame maps section (x, y) to (−y, x, 0).
    let (near, far) = (Point3::new(0.0, 0.0, -depth / 2.0), Point3::new(0.0, 0.0, depth / 2.0));
    let path = Linear::new(near, far, 1)?.with_frame(OrthogonalFrame::AxisX)?;
    let (w, h) = (width / 2.0, height / 2.0);
    let section = Polygon::new(&[
        Point2::new(-h, -w),
        Point2::new(h, -w),
        Point2::new(h, w),
        Point2::new(-h, w),
    ])?;
    let mut options = SweepOptions::default();
    if let Some(orientation) = orientation {
        options = options.with_orientation(*orientation);
    }
    extrude(&path, &section, &options)
}
