//! Closed 3D Lissajous knot.

use std::f64::consts::{FRAC_PI_2, TAU};

use tubular_math::{Point3, Vec3};

use crate::{check_detail, check_samples, select_best, OrthogonalFrame, Path, PathError, Result};

/// A Lissajous figure:
/// `point(t) = amplitude · (sin(2π·x·t), sin(2π·y·t + π/2), sin(2π·z·t))`.
///
/// Coefficients are integers, so every figure closes on itself at `t = 1`.
/// The orthogonal frame is picked by [`select_best`] over the path's slices.
#[derive(Debug, Clone)]
pub struct Lissajous {
    coefficients: [i32; 3],
    amplitude: f64,
    slices: usize,
    frame: OrthogonalFrame,
}

impl Lissajous {
    /// Frequency coefficients used by the classic knot.
    pub const DEFAULT_COEFFICIENTS: [i32; 3] = [1, 3, 5];

    /// Amplitude used unless overridden with [`Lissajous::with_amplitude`].
    pub const DEFAULT_AMPLITUDE: f64 = 300.0;

    /// Create a Lissajous path with the given frequency coefficients.
    ///
    /// # Errors
    ///
    /// Returns an error if `slices` is zero or the tangent vanishes at a
    /// sampled parameter.
    pub fn new(x_coef: i32, y_coef: i32, z_coef: i32, slices: usize) -> Result<Self> {
        check_detail(slices)?;
        let mut path = Self {
            coefficients: [x_coef, y_coef, z_coef],
            amplitude: Self::DEFAULT_AMPLITUDE,
            slices,
            frame: OrthogonalFrame::Robust,
        };
        path.frame = select_best(&path, slices + 1)?;
        check_samples(&path)?;
        Ok(path)
    }

    /// Scale the figure. The frame choice is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or non-finite amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Result<Self> {
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return Err(PathError::Degenerate(format!("amplitude {amplitude}")));
        }
        self.amplitude = amplitude;
        Ok(self)
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

    /// Frequency coefficients `[x, y, z]`.
    pub fn coefficients(&self) -> [i32; 3] {
        self.coefficients
    }

    /// Orthogonal frame rule in use.
    pub fn frame(&self) -> OrthogonalFrame {
        self.frame
    }
}

impl Path for Lissajous {
    fn point(&self, t: f64) -> Point3 {
        let [x, y, z] = self.coefficients.map(f64::from);
        Point3::new(
            (x * TAU * t).sin(),
            (y * TAU * t + FRAC_PI_2).sin(),
            (z * TAU * t).sin(),
        ) * self.amplitude
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
