//! Straight line segment.

use tubular_math::{Point3, Tolerance, Vec3};

use crate::{check_detail, check_samples, select_best, OrthogonalFrame, Path, PathError, Result};

/// A straight segment from `start` to `end`.
#[derive(Debug, Clone)]
pub struct Linear {
    start: Point3,
    end: Point3,
    tangent: Vec3,
    slices: usize,
    frame: OrthogonalFrame,
}

impl Linear {
    /// Create a segment sampled with `slices` slices.
    ///
    /// # Errors
    ///
    /// Returns an error if `slices` is zero or the endpoints coincide.
    pub fn new(start: Point3, end: Point3, slices: usize) -> Result<Self> {
        check_detail(slices)?;
        let tangent = (end - start)
            .try_normalize(Tolerance::DEFAULT.linear)
            .ok_or_else(|| PathError::Degenerate("segment endpoints coincide".into()))?;

        let mut line = Self {
            start,
            end,
            tangent,
            slices,
            frame: OrthogonalFrame::Robust,
        };
        // The tangent never changes, so two samples decide the frame.
        line.frame = select_best(&line, 2)?;
        Ok(line)
    }

    /// Replace the orthogonal frame rule.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::DegenerateOrthogonal`] if `frame` degenerates
    /// for this segment's direction.
    pub fn with_frame(mut self, frame: OrthogonalFrame) -> Result<Self> {
        self.frame = frame;
        check_samples(&self)?;
        Ok(self)
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Orthogonal frame rule in use.
    pub fn frame(&self) -> OrthogonalFrame {
        self.frame
    }
}

impl Path for Linear {
    fn point(&self, t: f64) -> Point3 {
        self.start + (self.end - self.start) * t
    }

    fn tangent(&self, _t: f64) -> Vec3 {
        self.tangent
    }

    fn orthogonal(&self, _t: f64) -> Vec3 {
        self.frame
            .orthogonal(&self.tangent)
            .unwrap_or_else(Vec3::zeros)
    }

    fn slices(&self) -> usize {
        self.slices
    }
}
