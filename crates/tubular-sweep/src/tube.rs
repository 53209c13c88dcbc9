//! Oval cross-sections swept along a path.

use tracing::{debug, info};
use tubular_contour::Oval;
use tubular_math::{Point3, Rotation, Tolerance, Uv, Vec3};
use tubular_path::Path;

use crate::{EndCap, Grid, Result, SweepError, SweepOptions, SweptMesh, Winding};

/// Position and section rotation at path parameter `t`.
///
/// The rotation takes contour +Z onto the tangent and contour +Y onto the
/// path's orthogonal vector.
pub(crate) fn path_frame(path: &dyn Path, column: usize, t: f64) -> Result<(Point3, Rotation)> {
    let rot = Rotation::from_frames(&Vec3::z(), &Vec3::y(), &path.tangent(t), &path.orthogonal(t))
        .map_err(|source| SweepError::DegenerateFrame { column, source })?;
    Ok((path.point(t), rot))
}

pub(crate) fn check_slices(path: &dyn Path) -> Result<usize> {
    match path.slices() {
        0 => Err(SweepError::InvalidDetail(0)),
        n => Ok(n),
    }
}

/// Sweep an oval along a path to make a tube.
///
/// # Arguments
///
/// * `path` - The path the section follows
/// * `contour` - The cross-section, in the plane normal to the path
/// * `options` - Scale along the path and final placement
///
/// # Returns
///
/// A [`SweptMesh`] whose grid has one column per path slice and one row per
/// contour segment. Texture coordinates are `(col / slices, row / segments)`.
/// Open paths also get a fan cap at each end, facing outward; the end cap
/// uses the contour's mirrored texture coordinates.
///
/// # Errors
///
/// Returns an error if the path has zero slices, its frame degenerates at a
/// column, or the result contains non-finite values.
pub fn tube(path: &dyn Path, contour: &Oval, options: &SweepOptions) -> Result<SweptMesh> {
    let slices = check_slices(path)?;
    let segments = contour.segments();
    debug!("Sweeping tube: {} slices x {} segments", slices, segments);

    let eps = Tolerance::DEFAULT.linear;
    let mut grid = Grid::with_capacity(slices, segments, Winding::Forward);
    for col in 0..=slices {
        let t = col as f64 / slices as f64;
        let (origin, rot) = path_frame(path, col, t)?;
        let scale = options.scale.scale(t);
        for (row, p) in contour.coords().iter().enumerate() {
            let coord = origin + rot.apply(&Vec3::new(p.x * scale.x, p.y * scale.y, 0.0));
            let normal = rot
                .apply(&Vec3::new(p.x, p.y, 0.0))
                .try_normalize(eps)
                .ok_or(SweepError::DegenerateGeometry { column: col, row })?;
            grid.push(coord, normal, Uv::new(t, row as f64 / segments as f64));
        }
    }
    grid.check_finite()?;

    let (start_cap, end_cap) = if path.is_open() {
        let uv = contour.uv();
        let mut points = vec![path.point(0.0)];
        points.extend(grid.column(0).iter().rev());
        let mut uvs = vec![uv[0]];
        uvs.extend(uv[1..].iter().rev());
        let start = EndCap::fan(points, uvs, "start");

        let mut points = vec![path.point(1.0)];
        points.extend_from_slice(grid.column(slices));
        let end = EndCap::fan(points, contour.mirror().uv().to_vec(), "end");
        (start, end)
    } else {
        (None, None)
    };

    let mut mesh = SweptMesh::new(grid, start_cap, end_cap);
    if let Some(orientation) = &options.orientation {
        mesh.transform(orientation);
    }
    info!(
        "Swept tube: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tubular_contour::LinearScale;
    use tubular_math::Orientation;
    use tubular_path::{Linear, Ring};

    fn straight(length: f64) -> Linear {
        Linear::new(Point3::origin(), Point3::new(0.0, 0.0, length), 10).unwrap()
    }

    #[test]
    fn test_tube_along_z() {
        let path = straight(10.0);
        let oval = Oval::circle(2.0, 12).unwrap();
        let mesh = tube(&path, &oval, &SweepOptions::default()).unwrap();
        let grid = mesh.body();

        assert_eq!(grid.slices(), 10);
        assert_eq!(grid.segments(), 12);
        for row in 0..=12 {
            let d = grid.coord(10, row) - grid.coord(0, row);
            assert!((d - Vec3::new(0.0, 0.0, 10.0)).norm() < 1e-9);
        }
        for p in grid.coords() {
            assert_relative_eq!(p.x.hypot(p.y), 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_tube_normals_point_outward() {
        let path = straight(4.0);
        let oval = Oval::new(2.0, 1.0, 16).unwrap();
        let mesh = tube(&path, &oval, &SweepOptions::default()).unwrap();
        let grid = mesh.body();
        for col in 0..=grid.slices() {
            for row in 0..=grid.segments() {
                let n = grid.normal(col, row);
                let p = grid.coord(col, row);
                let radial = p.coords - Vec3::new(0.0, 0.0, p.z);
                assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
                assert!(n.dot(&radial) > 0.0);
                assert!(n.z.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_tube_uv_layout() {
        let section = Oval::circle(1.0, 8).unwrap();
        let mesh = tube(&straight(1.0), &section, &SweepOptions::default()).unwrap();
        let grid = mesh.body();
        assert_eq!(grid.uv(0, 0), Uv::new(0.0, 0.0));
        assert_eq!(grid.uv(10, 8), Uv::new(1.0, 1.0));
        assert_relative_eq!(grid.uv(5, 2).u, 0.5);
        assert_relative_eq!(grid.uv(5, 2).v, 0.25);
    }

    #[test]
    fn test_tube_caps_face_outward() {
        let section = Oval::circle(1.0, 10).unwrap();
        let mesh = tube(&straight(3.0), &section, &SweepOptions::default()).unwrap();
        let start = mesh.start_cap().unwrap();
        let end = mesh.end_cap().unwrap();
        assert!((start.normal() + Vec3::z()).norm() < 1e-9);
        assert!((end.normal() - Vec3::z()).norm() < 1e-9);
        assert_eq!(start.points().len(), 12);
        assert_eq!(start.uvs().len(), 12);
        assert_eq!(start.points()[0], Point3::origin());
    }

    #[test]
    fn test_closed_path_has_no_caps() {
        let ring = Ring::new(10.0, 10.0, 24).unwrap();
        let mesh = tube(&ring, &Oval::circle(1.0, 8).unwrap(), &SweepOptions::default()).unwrap();
        assert!(mesh.start_cap().is_none());
        assert!(mesh.end_cap().is_none());
        assert_eq!(mesh.parts().len(), 1);
        // The section's +Y follows the ring's radial direction, so every
        // vertex lies within one section radius of the ring.
        for p in mesh.body().coords() {
            let ring_radius = p.x.hypot(p.z);
            let off = Vec3::new(ring_radius - 10.0, p.y, 0.0).norm();
            assert_relative_eq!(off, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_scale_end_cap_skipped() {
        let taper = LinearScale::uniform(1.0, 0.0);
        let options = SweepOptions::default().with_scale(&taper);
        let mesh = tube(&straight(5.0), &Oval::circle(1.0, 8).unwrap(), &options).unwrap();
        assert!(mesh.start_cap().is_some());
        assert!(mesh.end_cap().is_none());
        for p in mesh.body().column(10) {
            assert!((p - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_orientation_applied_last() {
        let o = Orientation::from_up(Vec3::new(0.0, 5.0, 0.0), &Vec3::z()).unwrap();
        let options = SweepOptions::default().with_orientation(o);
        let section = Oval::circle(1.0, 6).unwrap();
        let plain = tube(&straight(2.0), &section, &SweepOptions::default()).unwrap();
        let placed = tube(&straight(2.0), &section, &options).unwrap();
        for (a, b) in plain.body().coords().iter().zip(placed.body().coords()) {
            let expected = o.apply_rt(&a.coords);
            assert!((b.coords - expected).norm() < 1e-12);
        }
        for (a, b) in plain.body().normals().iter().zip(placed.body().normals()) {
            assert!((o.apply_normal(a) - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_zero_slices_rejected() {
        #[derive(Debug)]
        struct Empty;
        impl Path for Empty {
            fn point(&self, t: f64) -> Point3 {
                Point3::new(0.0, 0.0, t)
            }
            fn orthogonal(&self, _t: f64) -> Vec3 {
                Vec3::x()
            }
            fn slices(&self) -> usize {
                0
            }
        }
        let err = tube(&Empty, &Oval::circle(1.0, 4).unwrap(), &SweepOptions::default());
        assert_eq!(err.unwrap_err(), SweepError::InvalidDetail(0));
    }

    #[test]
    fn test_degenerate_frame_reported() {
        #[derive(Debug)]
        struct Parallel;
        impl Path for Parallel {
            fn point(&self, t: f64) -> Point3 {
                Point3::new(0.0, 0.0, t)
            }
            fn orthogonal(&self, _t: f64) -> Vec3 {
                Vec3::z()
            }
            fn slices(&self) -> usize {
                2
            }
        }
        let err = tube(&Parallel, &Oval::circle(1.0, 4).unwrap(), &SweepOptions::default());
        assert!(matches!(err, Err(SweepError::DegenerateFrame { column: 0, .. })));
    }
}
