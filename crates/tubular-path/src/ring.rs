//! Closed elliptical ring in the XZ plane.

use std::f64::consts::TAU;

use tubular_math::{Point3, Vec3};

use crate::{check_detail, check_radius, check_samples, OrthogonalFrame, Path, Result};

/// An ellipse in the XZ plane centred on the origin.
///
/// `point(t) = (rx·cos 2πt, 0, rz·sin 2πt)`. The orthogonal vector lies in
/// the ring's plane, so a swept contour's +Y axis points radially.
#[derive(Debug, Clone)]
pub struct Ring {
    radius_x: f64,
    radius_z: f64,
    slices: usize,
    frame: OrthogonalFrame,
}

impl Ring {
    /// Create a ring sampled with `slices` slices.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is not positive or `slices` is zero.
    pub fn new(radius_x: f64, radius_z: f64, slices: usize) -> Result<Self> {
        check_detail(slices)?;
        check_radius(radius_x)?;
        check_radius(radius_z)?;
        Ok(Self {
            radius_x,
            radius_z,
            slices,
            frame: OrthogonalFrame::PlanarXz,
        })
    }

    /// Replace the orthogonal frame rule.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` degenerates anywhere along the ring.
    pub fn with_frame(mut self, frame: OrthogonalFrame) -> Result<Self> {
        self.frame = frame;
        check_samples(&self)?;
        Ok(self)
    }

    /// Radius along X.
    pub fn radius_x(&self) -> f64 {
        self.radius_x
    }

    /// Radius along Z.
    pub fn radius_z(&self) -> f64 {
        self.radius_z
    }
}

impl Path for Ring {
    fn point(&self, t: f64) -> Point3 {
        let (s, c) = (TAU * t).sin_cos();
        Point3::new(self.radius_x * c, 0.0, self.radius_z * s)
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let (s, c) = (TAU * t).sin_cos();
        Vec3::new(-self.radius_x * s, 0.0, self.radius_z * c).normalize()
    }

    fn orthogonal(&self, t: f64) -> Vec3 {
        self.frame
            .orthogonal(&self.tangent(t))
            .unwrap_or_else(Vec3::zeros)
    }

    fn slices(&self) -> usize {
        self.slices
    }

    fn is_open(&self) -> bool {
        false
    }
}
