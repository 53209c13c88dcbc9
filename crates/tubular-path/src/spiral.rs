//! Open helix about the +Y axis.

use std::f64::consts::TAU;

use tubular_math::{Point3, Vec3};

use crate::{check_detail, check_radius, check_samples, OrthogonalFrame, Path, Result};

/// A helix winding about +Y, vertically centred on the origin.
///
/// With `A = 2π·twirls` and `P = twirls·pitch`,
/// `point(t) = (rx·cos(t·A), t·P − P/2, rz·sin(t·A))`.
#[derive(Debug, Clone)]
pub struct Spiral {
    radius_x: f64,
    radius_z: f64,
    twirls: f64,
    pitch: f64,
    slices: usize,
    frame: OrthogonalFrame,
}

impl Spiral {
    /// Create a helix of `twirls` turns rising `pitch` per turn.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is not positive, `slices` is zero, or
    /// the helix has a vanishing tangent at a sampled parameter (for
    /// example zero twirls).
    pub fn new(
        radius_x: f64,
        radius_z: f64,
        twirls: f64,
        pitch: f64,
        slices: usize,
    ) -> Result<Self> {
        check_detail(slices)?;
        check_radius(radius_x)?;
        check_radius(radius_z)?;
        let spiral = Self {
            radius_x,
            radius_z,
            twirls,
            pitch,
            slices,
            frame: OrthogonalFrame::PlanarXz,
        };
        check_samples(&spiral)?;
        Ok(spiral)
    }

    /// Replace the orthogonal frame rule.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` degenerates at a sampled parameter.
    pub fn with_frame(mut self, frame: OrthogonalFrame) -> Result<Self> {
        self.frame = frame;
        check_samples(&self)?;
        Ok(self)
    }

    /// Number of turns.
    pub fn twirls(&self) -> f64 {
        self.twirls
    }

    /// Rise per turn.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Total height from start to end.
    pub fn height(&self) -> f64 {
        self.twirls * self.pitch
    }
}

impl Path for Spiral {
    fn point(&self, t: f64) -> Point3 {
        let rise = self.height();
        let (s, c) = (t * TAU * self.twirls).sin_cos();
        Point3::new(self.radius_x * c, t * rise - rise / 2.0, self.radius_z * s)
    }

    fn orthogonal(&self, t: f64) -> Vec3 {
        self.frame
            .orthogonal(&self.tangent(t))
            .unwrap_or_else(Vec3::zeros)
    }

    fn slices(&self) -> usize {
        self.slices
    }
}
