//! Bezier curves of arbitrary degree.

use smallvec::SmallVec;
use tubular_math::{Point2, Point3, Tolerance, Vec3};

use crate::{check_detail, check_samples, select_best, OrthogonalFrame, Path, PathError, Result};

/// A Bezier curve through its first and last control points.
///
/// Points are evaluated with De Casteljau's algorithm; tangents come from the
/// curve's hodograph (the Bezier curve of consecutive control-point
/// differences), so no finite differencing is involved.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    points: Vec<Point3>,
    slices: usize,
    frame: OrthogonalFrame,
}

impl BezierCurve {
    /// Create a 3D curve. The orthogonal frame is chosen by [`select_best`].
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are supplied, `slices`
    /// is zero, or the curve has a vanishing tangent at a sampled parameter.
    pub fn new(points: &[Point3], slices: usize) -> Result<Self> {
        let mut curve = Self::unchecked(points, slices)?;
        curve.frame = select_best(&curve, slices + 1)?;
        check_samples(&curve)?;
        Ok(curve)
    }

    /// Create a curve in the XY plane (`z = 0`) whose orthogonal vector is
    /// the in-plane normal `(-t.y, t.x, 0)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BezierCurve::new`].
    pub fn planar(points: &[Point2], slices: usize) -> Result<Self> {
        let lifted: Vec<Point3> = points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
        let mut curve = Self::unchecked(&lifted, slices)?;
        curve.frame = OrthogonalFrame::PlanarXy;
        check_samples(&curve)?;
        Ok(curve)
    }

    fn unchecked(points: &[Point3], slices: usize) -> Result<Self> {
        check_detail(slices)?;
        if points.len() < 2 {
            return Err(PathError::TooFewPoints {
                min: 2,
                actual: points.len(),
            });
        }
        Ok(Self {
            points: points.to_vec(),
            slices,
            frame: OrthogonalFrame::Robust,
        })
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

    /// Control points.
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Polynomial degree (number of control points minus one).
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// Orthogonal frame rule in use.
    pub fn frame(&self) -> OrthogonalFrame {
        self.frame
    }

    /// Approximate arc length, measured along a polyline of `steps` chords.
    pub fn length(&self, steps: usize) -> f64 {
        self.length_between(0.0, 1.0, steps)
    }

    /// Approximate arc length between `t0` and `t1`, measured along a
    /// polyline of `steps` chords.
    pub fn length_between(&self, t0: f64, t1: f64, steps: usize) -> f64 {
        let steps = steps.max(1);
        let dt = (t1 - t0) / steps as f64;
        let mut prev = self.point(t0);
        let mut total = 0.0;
        for i in 1..=steps {
            let p = self.point(t0 + i as f64 * dt);
            total += (p - prev).norm();
            prev = p;
        }
        total
    }

    /// Hodograph direction at `t` (unnormalized).
    fn derivative(&self, t: f64) -> Vec3 {
        let mut work: Work = self.points.windows(2).map(|w| w[1] - w[0]).collect();
        de_casteljau(&mut work, t) * self.degree() as f64
    }
}

/// Scratch space for De Casteljau; curves up to degree 7 stay on the stack.
type Work = SmallVec<[Vec3; 8]>;

/// Collapse `work` in place by repeated linear interpolation; the result
/// is left in `work[0]`.
fn de_casteljau(work: &mut [Vec3], t: f64) -> Vec3 {
    let mt = 1.0 - t;
    for level in 1..work.len() {
        for i in 0..work.len() - level {
            work[i] = work[i] * mt + work[i + 1] * t;
        }
    }
    work[0]
}

impl Path for BezierCurve {
    fn point(&self, t: f64) -> Point3 {
        let mut work: Work = self.points.iter().map(|p| p.coords).collect();
        Point3::from(de_casteljau(&mut work, t))
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let eps = Tolerance::DEFAULT.linear;
        // Repeated control points stall the hodograph at the ends; take the
        // limiting direction from just inside the curve.
        self.derivative(t)
            .try_normalize(eps)
            .or_else(|| {
                let inside = if t < 0.5 { t + 1e-6 } else { t - 1e-6 };
                self.derivative(inside).try_normalize(eps)
            })
            .unwrap_or_else(Vec3::zeros)
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadratic() -> BezierCurve {
        BezierCurve::planar(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Point2::new(2.0, 0.0)],
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_bezier_endpoints() {
        let curve = quadratic();
        assert!((curve.point(0.0) - Point3::origin()).norm() < 1e-12);
        assert!((curve.point(1.0) - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
        assert_eq!(curve.degree(), 2);
    }

    #[test]
    fn test_bezier_midpoint() {
        // Quadratic: B(0.5) = 0.25·P0 + 0.5·P1 + 0.25·P2
        let curve = quadratic();
        let mid = curve.point(0.5);
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bezier_tangent_matches_control_polygon() {
        let curve = quadratic();
        // End tangents point along the first and last control legs.
        let t0 = curve.tangent(0.0);
        assert!((t0 - Vec3::new(1.0, 2.0, 0.0).normalize()).norm() < 1e-12);
        let t1 = curve.tangent(1.0);
        assert!((t1 - Vec3::new(1.0, -2.0, 0.0).normalize()).norm() < 1e-12);
        // Apex is horizontal.
        assert!((curve.tangent(0.5) - Vec3::x()).norm() < 1e-12);
    }

    #[test]
    fn test_bezier_planar_orthogonal() {
        let curve = quadratic();
        assert_eq!(curve.frame(), OrthogonalFrame::PlanarXy);
        assert!((curve.orthogonal(0.5) - Vec3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_bezier_repeated_end_point() {
        let curve = BezierCurve::new(
            &[
                Point3::origin(),
                Point3::origin(),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 1.0),
            ],
            8,
        )
        .unwrap();
        let t0 = curve.tangent(0.0);
        assert!((t0.norm() - 1.0).abs() < 1e-12);
        assert!((t0 - Vec3::new(1.0, 1.0, 0.0).normalize()).norm() < 1e-4);
    }

    #[test]
    fn test_bezier_length_straight() {
        let curve = BezierCurve::new(&[Point3::origin(), Point3::new(3.0, 4.0, 0.0)], 4).unwrap();
        assert_relative_eq!(curve.length(16), 5.0, epsilon = 1e-12);
        assert_relative_eq!(curve.length_between(0.0, 0.5, 8), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_bezier_too_few_points() {
        let err = BezierCurve::new(&[Point3::origin()], 4).unwrap_err();
        assert_eq!(err, PathError::TooFewPoints { min: 2, actual: 1 });
    }

    #[test]
    fn test_bezier_all_coincident() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(BezierCurve::new(&[p, p, p], 4).is_err());
    }

    #[test]
    fn test_bezier_high_degree() {
        // Evenly spaced collinear controls reproduce the straight line.
        let controls: Vec<Point2> = (0..=10).map(|i| Point2::new(i as f64, 0.0)).collect();
        let curve = BezierCurve::planar(&controls, 20).unwrap();
        assert_eq!(curve.degree(), 10);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_relative_eq!(curve.point(t).x, 10.0 * t, epsilon = 1e-12);
            assert!((curve.tangent(t) - Vec3::x()).norm() < 1e-12);
        }
    }
}
