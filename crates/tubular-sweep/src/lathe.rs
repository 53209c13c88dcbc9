//! Surfaces of revolution.

use tracing::{debug, info};
use tubular_contour::LatheSurface;
use tubular_math::{Point3, Tolerance, Uv, Vec3};

use crate::tube::check_slices;
use crate::{EndCap, Grid, LatheCaps, LatheOptions, Result, SweepError, SweptMesh, Winding};

/// Revolve a profile about the +Y axis.
///
/// Columns follow the profile (`t = col / slices`), rows the rotation
/// angle. A profile point `(r, h)` becomes `(r·cos θ, h, r·sin θ)`; any
/// `z` component of the profile is ignored. The normal is the in-plane
/// normal `(t.y, −t.x)` of the profile tangent, revolved the same way, so a
/// profile running upward (away from the axis on its left) yields outward
/// normals whichever frame the profile path carries. Texture coordinates
/// are `(1 − col / slices, row / segments)`.
///
/// Caps are fans around the axis at the profile's first and last heights;
/// see [`LatheCaps`] for when they are built.
///
/// # Errors
///
/// Returns an error if the profile has zero slices, its tangent has no
/// component in the XY plane, or the result contains non-finite values.
pub fn lathe(surface: &LatheSurface, options: &LatheOptions) -> Result<SweptMesh> {
    let profile = surface.profile();
    let slices = check_slices(profile)?;
    let segments = surface.segments();
    debug!(
        "Lathing: {} slices x {} segments, {:.4}..{:.4} rad",
        slices,
        segments,
        surface.start_angle(),
        surface.end_angle()
    );

    let eps = Tolerance::DEFAULT.linear;
    let angles: Vec<(f64, f64)> = (0..=segments).map(|row| surface.angle(row).sin_cos()).collect();
    let mut grid = Grid::with_capacity(slices, segments, Winding::Reversed);
    for col in 0..=slices {
        let t = col as f64 / slices as f64;
        let p = profile.point(t);
        let tan = profile.tangent(t);
        let (nx, ny) = (tan.y, -tan.x);
        for (row, &(sin, cos)) in angles.iter().enumerate() {
            let coord = Point3::new(p.x * cos, p.y, p.x * sin);
            let normal = Vec3::new(nx * cos, ny, nx * sin)
                .try_normalize(eps)
                .ok_or(SweepError::DegenerateGeometry { column: col, row })?;
            grid.push(coord, normal, Uv::new(1.0 - t, row as f64 / segments as f64));
        }
    }
    grid.check_finite()?;

    let want_caps = match options.caps {
        LatheCaps::Auto => profile.is_open(),
        LatheCaps::Always => true,
        LatheCaps::Never => false,
    };
    let (start_cap, end_cap) = if want_caps {
        let cap_uvs: Vec<Uv> = angles
            .iter()
            .map(|&(sin, cos)| Uv::new((1.0 - cos) / 2.0, (1.0 + sin) / 2.0))
            .collect();
        let auto = options.caps == LatheCaps::Auto;

        let start = if auto && on_axis(&profile.point(0.0)) {
            debug!("Profile starts on the axis; no start cap");
            None
        } else {
            let mut points = vec![Point3::new(0.0, profile.point(0.0).y, 0.0)];
            points.extend_from_slice(grid.column(0));
            let mut uvs = vec![Uv::new(0.5, 0.5)];
            uvs.extend_from_slice(&cap_uvs);
            EndCap::fan(points, uvs, "start")
        };

        let end = if auto && on_axis(&profile.point(1.0)) {
            debug!("Profile ends on the axis; no end cap");
            None
        } else {
            let mut points = vec![Point3::new(0.0, profile.point(1.0).y, 0.0)];
            points.extend(grid.column(slices).iter().rev());
            let mut uvs = vec![Uv::new(0.5, 0.5)];
            uvs.extend(cap_uvs.iter().rev().map(|uv| uv.mirror_u()));
            EndCap::fan(points, uvs, "end")
        };
        (start, end)
    } else {
        (None, None)
    };

    let mut mesh = SweptMesh::new(grid, start_cap, end_cap);
    if let Some(orientation) = &options.orientation {
        mesh.transform(orientation);
    }
    info!(
        "Lathed surface: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

fn on_axis(p: &Point3) -> bool {
    p.x.abs() < Tolerance::DEFAULT.linear
}
