//! Cross-section scale as a function of path position.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tubular_math::Vec2;
use tubular_path::Path;

/// Stateless scale function `t → (scale_x, scale_y)`.
pub trait Scale: Send + Sync + Debug {
    /// Scale applied to contour X at path parameter `t`.
    fn scale_x(&self, t: f64) -> f64;

    /// Scale applied to contour Y at path parameter `t`.
    fn scale_y(&self, t: f64) -> f64;

    /// Both factors at `t`.
    fn scale(&self, t: f64) -> Vec2 {
        Vec2::new(self.scale_x(t), self.scale_y(t))
    }
}

/// The same scale everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedScale {
    /// X factor.
    pub x: f64,
    /// Y factor.
    pub y: f64,
}

impl FixedScale {
    /// No scaling.
    pub const UNIT: Self = Self { x: 1.0, y: 1.0 };

    /// Scale by `(x, y)` everywhere.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for FixedScale {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Scale for FixedScale {
    fn scale_x(&self, _t: f64) -> f64 {
        self.x
    }

    fn scale_y(&self, _t: f64) -> f64 {
        self.y
    }
}

/// Scale interpolated linearly from the start of the path to the end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
}

impl LinearScale {
    /// Interpolate X from `x_start` to `x_end` and Y from `y_start` to `y_end`.
    pub fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Interpolate both axes from `start` to `end`.
    pub fn uniform(start: f64, end: f64) -> Self {
        Self::new(start, end, start, end)
    }
}

impl Scale for LinearScale {
    fn scale_x(&self, t: f64) -> f64 {
        self.x_start + t * (self.x_end - self.x_start)
    }

    fn scale_y(&self, t: f64) -> f64 {
        self.y_start + t * (self.y_end - self.y_start)
    }
}

/// Scale read off the height of two paths: each factor is
/// `path.point(t).y`, with `t` clamped to `[0, 1]`.
#[derive(Debug)]
pub struct PathScale {
    x_path: Box<dyn Path>,
    y_path: Box<dyn Path>,
}

impl PathScale {
    /// Drive X and Y scale from separate paths.
    pub fn new(x_path: Box<dyn Path>, y_path: Box<dyn Path>) -> Self {
        Self { x_path, y_path }
    }
}

impl Scale for PathScale {
    fn scale_x(&self, t: f64) -> f64 {
        self.x_path.point(t.clamp(0.0, 1.0)).y
    }

    fn scale_y(&self, t: f64) -> f64 {
        self.y_path.point(t.clamp(0.0, 1.0)).y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tubular_math::Point2;
    use tubular_path::BezierCurve;

    #[test]
    fn test_fixed_scale() {
        let s = FixedScale::new(2.0, 0.5);
        assert_relative_eq!(s.scale_x(0.3), 2.0);
        assert_relative_eq!(s.scale_y(0.9), 0.5);
        assert_eq!(FixedScale::default(), FixedScale::UNIT);
    }

    #[test]
    fn test_linear_scale() {
        let s = LinearScale::new(1.0, 3.0, 2.0, 0.0);
        assert_relative_eq!(s.scale_x(0.0), 1.0);
        assert_relative_eq!(s.scale_x(0.5), 2.0);
        assert_relative_eq!(s.scale_x(1.0), 3.0);
        assert_relative_eq!(s.scale_y(0.25), 1.5);
        assert_relative_eq!(s.scale(1.0).y, 0.0);
    }

    #[test]
    fn test_path_scale() {
        let ramp = BezierCurve::planar(&[Point2::new(0.0, 1.0), Point2::new(1.0, 3.0)], 4).unwrap();
        let flat = BezierCurve::planar(&[Point2::new(0.0, 0.5), Point2::new(1.0, 0.5)], 4).unwrap();
        let s = PathScale::new(Box::new(ramp), Box::new(flat));
        assert_relative_eq!(s.scale_x(0.5), 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.scale_y(0.5), 0.5, epsilon = 1e-12);
        // Clamped outside [0, 1].
        assert_relative_eq!(s.scale_x(1.5), 3.0, epsilon = 1e-12);
        assert_relative_eq!(s.scale_x(-1.0), 1.0, epsilon = 1e-12);
    }
}
