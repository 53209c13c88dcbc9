#![warn(missing_docs)]

//! Parametric paths for the tubular sweep engine.
//!
//! A [`Path`] maps a parameter `t ∈ [0, 1]` to a point in 3D space and
//! supplies a unit tangent and a unit vector orthogonal to it. The pair
//! (tangent, orthogonal) defines the local frame a cross-section is
//! placed in when it is swept along the path.
//!
//! # Example
//!
//! ```
//! use tubular_path::{Linear, Path};
//! use tubular_math::Point3;
//!
//! let line = Linear::new(Point3::origin(), Point3::new(0.0, 0.0, 10.0), 10).unwrap();
//! let mid = line.point(0.5);
//! assert!((mid.z - 5.0).abs() < 1e-12);
//! assert!((line.tangent(0.3).norm() - 1.0).abs() < 1e-12);
//! ```

mod bezier;
mod frame;
mod linear;
mod lissajous;
mod ring;
mod spiral;
mod spline;

pub use bezier::BezierCurve;
pub use frame::{select_best, OrthogonalFrame};
pub use linear::Linear;
pub use lissajous::Lissajous;
pub use ring::Ring;
pub use spiral::Spiral;
pub use spline::BezierSpline;

use std::f64::consts::PI;
use std::fmt::Debug;

use thiserror::Error;
use tubular_math::{Point3, Tolerance, Vec3};

/// Parameter offset used for finite-difference tangents (one degree of a
/// full turn).
pub const ONE_DEG_T: f64 = PI / 180.0;

/// Errors from path construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Detail level was zero.
    #[error("detail level must be at least 1, got {0}")]
    InvalidDetail(usize),

    /// Not enough control points or knots.
    #[error("too few points: need at least {min}, got {actual}")]
    TooFewPoints {
        /// Minimum required.
        min: usize,
        /// Number supplied.
        actual: usize,
    },

    /// A radius was zero, negative or not finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// The path collapses somewhere (coincident endpoints or knots).
    #[error("degenerate path: {0}")]
    Degenerate(String),

    /// The tangent vanishes at a sampled parameter.
    #[error("zero tangent at t = {t}")]
    ZeroTangent {
        /// Offending parameter.
        t: f64,
    },

    /// The path's orthogonal frame produces no usable vector at a sampled parameter.
    #[error("orthogonal vector is degenerate at t = {t}")]
    DegenerateOrthogonal {
        /// Offending parameter.
        t: f64,
    },

    /// Every orthogonal frame candidate was disqualified.
    #[error("no orthogonal frame candidate is usable along this path")]
    NoOrthogonalFrame,
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;

/// A parametric path over `t ∈ [0, 1]`.
///
/// Implementations are immutable once constructed, so a path can be shared
/// freely between sweeps and threads.
pub trait Path: Send + Sync + Debug {
    /// Position at parameter `t`.
    fn point(&self, t: f64) -> Point3;

    /// Unit tangent at parameter `t`.
    ///
    /// The default is the normalized symmetric difference of [`Path::point`]
    /// at `t ± ONE_DEG_T`. A vanishing difference yields the zero vector,
    /// which path constructors reject at every sampled parameter.
    fn tangent(&self, t: f64) -> Vec3 {
        let diff = self.point(t + ONE_DEG_T) - self.point(t - ONE_DEG_T);
        diff.try_normalize(Tolerance::DEFAULT.linear)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Unit vector orthogonal to the tangent at `t`, or zero where the
    /// path's frame degenerates.
    fn orthogonal(&self, t: f64) -> Vec3;

    /// Number of slices the path is sampled with when swept.
    fn slices(&self) -> usize;

    /// Whether the path has distinct ends. Closed paths get no end caps.
    fn is_open(&self) -> bool {
        true
    }
}

/// Check a detail level.
pub(crate) fn check_detail(slices: usize) -> Result<()> {
    if slices == 0 {
        return Err(PathError::InvalidDetail(slices));
    }
    Ok(())
}

/// Check a radius is positive and finite.
pub(crate) fn check_radius(r: f64) -> Result<()> {
    if !r.is_finite() || r <= 0.0 {
        return Err(PathError::InvalidRadius(r));
    }
    Ok(())
}

/// Verify that the path is well defined at every parameter a sweep visits.
pub(crate) fn check_samples(path: &dyn Path) -> Result<()> {
    let slices = path.slices();
    for i in 0..=slices {
        let t = i as f64 / slices as f64;
        let p = path.point(t);
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(PathError::Degenerate(format!("non-finite point at t = {t}")));
        }
        if path.tangent(t).norm() < 0.5 {
            return Err(PathError::ZeroTangent { t });
        }
        if path.orthogonal(t).norm() < 0.5 {
            return Err(PathError::DegenerateOrthogonal { t });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubular_math::Point2;

    fn all_paths() -> Vec<Box<dyn Path>> {
        vec![
            Box::new(
                Linear::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, -2.0, 8.0), 7).unwrap(),
            ),
            Box::new(Ring::new(3.0, 2.0, 24).unwrap()),
            Box::new(Spiral::new(2.0, 3.0, 2.5, 4.0, 40).unwrap()),
            Box::new(Lissajous::new(1, 3, 5, 100).unwrap()),
            Box::new(
                BezierCurve::new(
                    &[
                        Point3::new(0.0, 0.0, 0.0),
                        Point3::new(1.0, 2.0, 0.0),
                        Point3::new(3.0, 2.0, 1.0),
                        Point3::new(4.0, 0.0, 2.0),
                    ],
                    20,
                )
                .unwrap(),
            ),
            Box::new(
                BezierSpline::planar(
                    &[
                        Point2::new(0.0, 0.0),
                        Point2::new(1.0, 1.0),
                        Point2::new(2.0, 0.0),
                        Point2::new(3.0, 2.0),
                    ],
                    30,
                )
                .unwrap(),
            ),
        ]
    }

    #[test]
    fn test_tangents_are_unit_length() {
        for path in all_paths() {
            for i in 0..=50 {
                let t = i as f64 / 50.0;
                let tan = path.tangent(t);
                assert!(
                    (tan.norm() - 1.0).abs() < 1e-9,
                    "{:?}: |tangent({})| = {}",
                    path,
                    t,
                    tan.norm()
                );
            }
        }
    }

    #[test]
    fn test_orthogonal_is_perpendicular() {
        for path in all_paths() {
            for i in 0..=path.slices() {
                let t = i as f64 / path.slices() as f64;
                let tan = path.tangent(t);
                let ortho = path.orthogonal(t);
                assert!((ortho.norm() - 1.0).abs() < 1e-9, "{:?} at t={}", path, t);
                assert!(tan.dot(&ortho).abs() < 1e-9, "{:?} at t={}", path, t);
            }
        }
    }

    #[test]
    fn test_default_tangent_finite_difference() {
        #[derive(Debug)]
        struct Diagonal;
        impl Path for Diagonal {
            fn point(&self, t: f64) -> Point3 {
                Point3::new(t, t, 0.0)
            }
            fn orthogonal(&self, _t: f64) -> Vec3 {
                Vec3::z()
            }
            fn slices(&self) -> usize {
                1
            }
        }

        let tan = Diagonal.tangent(0.5);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((tan - expected).norm() < 1e-12);
        assert!(Diagonal.is_open());
        assert!(check_samples(&Diagonal).is_ok());
    }

    #[test]
    fn test_check_samples_rejects_constant_path() {
        #[derive(Debug)]
        struct Stuck;
        impl Path for Stuck {
            fn point(&self, _t: f64) -> Point3 {
                Point3::origin()
            }
            fn orthogonal(&self, _t: f64) -> Vec3 {
                Vec3::z()
            }
            fn slices(&self) -> usize {
                4
            }
        }

        assert_eq!(check_samples(&Stuck), Err(PathError::ZeroTangent { t: 0.0 }));
    }
}
