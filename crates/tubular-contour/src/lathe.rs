//! Profile and angular range for surfaces of revolution.

use std::f64::consts::TAU;

use tubular_path::Path;

use crate::{ContourError, Result};

/// A profile path revolved about the +Y axis.
///
/// The profile's X coordinate is the radius and its Y coordinate the
/// height. Rows of the generated surface sit at angles
/// `start + row · delta` for `row ∈ 0..=segments`.
#[derive(Debug)]
pub struct LatheSurface {
    profile: Box<dyn Path>,
    segments: usize,
    start_angle: f64,
    end_angle: f64,
}

impl LatheSurface {
    /// Revolve `profile` through a full turn in `segments` steps.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::InvalidDetail`] if `segments` is zero.
    pub fn new(profile: Box<dyn Path>, segments: usize) -> Result<Self> {
        Self::with_angles(profile, segments, 0.0, TAU)
    }

    /// Revolve `profile` from `start_angle` to `end_angle` (radians).
    ///
    /// Both angles are wrapped into `[0, 2π)`; if the start is not before the
    /// end, the end moves on by a full turn.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero or an angle is not finite.
    pub fn with_angles(
        profile: Box<dyn Path>,
        segments: usize,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if segments == 0 {
            return Err(ContourError::InvalidDetail(segments));
        }
        for a in [start_angle, end_angle] {
            if !a.is_finite() {
                return Err(ContourError::InvalidAngle(a));
            }
        }

        let start_angle = start_angle.rem_euclid(TAU);
        let mut end_angle = end_angle.rem_euclid(TAU);
        if start_angle >= end_angle {
            end_angle += TAU;
        }
        Ok(Self {
            profile,
            segments,
            start_angle,
            end_angle,
        })
    }

    /// The revolved profile.
    pub fn profile(&self) -> &dyn Path {
        self.profile.as_ref()
    }

    /// Angular steps.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// First angle, in `[0, 2π)`.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Last angle, greater than the start by at most a full turn.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Angle between consecutive rows.
    pub fn delta(&self) -> f64 {
        (self.end_angle - self.start_angle) / self.segments as f64
    }

    /// Angle of `row`.
    pub fn angle(&self, row: usize) -> f64 {
        self.start_angle + row as f64 * self.delta()
    }
}
