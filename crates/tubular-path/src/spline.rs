//! C¹ cubic Bezier spline through a sequence of knots.

use tubular_math::{Point2, Point3, Tolerance, Vec3};

use crate::{check_detail, check_samples, select_best, OrthogonalFrame, Path, PathError, Result};

/// Chords used to estimate each segment's arc length.
const LENGTH_STEPS: usize = 100;

/// One cubic piece of the spline.
#[derive(Debug, Clone, Copy)]
struct Cubic {
    p: [Vec3; 4],
}

impl Cubic {
    fn point(&self, t: f64) -> Vec3 {
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.p;
        p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
    }

    fn derivative(&self, t: f64) -> Vec3 {
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.p;
        (p1 - p0) * (3.0 * mt * mt) + (p2 - p1) * (6.0 * mt * t) + (p3 - p2) * (3.0 * t * t)
    }

    fn length(&self) -> f64 {
        let mut prev = self.point(0.0);
        let mut total = 0.0;
        for i in 1..=LENGTH_STEPS {
            let p = self.point(i as f64 / LENGTH_STEPS as f64);
            total += (p - prev).norm();
            prev = p;
        }
        total
    }
}

/// A spline passing through every knot, built from cubic Bezier segments
/// whose interior control points are solved so the curve is C¹ at each
/// knot.
///
/// The global parameter is shared between segments in proportion to their
/// arc length, so equal steps in `t` cover roughly equal distances.
/// `t = 0` and `t = 1` return the first and last knots exactly.
#[derive(Debug, Clone)]
pub struct BezierSpline {
    knots: Vec<Point3>,
    segments: Vec<Cubic>,
    /// Fraction of the parameter range owned by each segment.
    t_len: Vec<f64>,
    /// Cumulative parameter at the end of each segment.
    t_max: Vec<f64>,
    slices: usize,
    frame: OrthogonalFrame,
}

impl BezierSpline {
    /// Create a 3D spline. The orthogonal frame is chosen by [`select_best`].
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 knots are supplied, `slices` is zero,
    /// two consecutive knots coincide, or the tangent vanishes at a sampled
    /// parameter.
    pub fn new(knots: &[Point3], slices: usize) -> Result<Self> {
        let mut spline = Self::unchecked(knots, slices)?;
        spline.frame = select_best(&spline, slices + 1)?;
        check_samples(&spline)?;
        Ok(spline)
    }

    /// Create a spline in the XY plane (`z = 0`) whose orthogonal vector is
    /// the in-plane normal `(-t.y, t.x, 0)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BezierSpline::new`].
    pub fn planar(knots: &[Point2], slices: usize) -> Result<Self> {
        let lifted: Vec<Point3> = knots.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
        let mut spline = Self::unchecked(&lifted, slices)?;
        spline.frame = OrthogonalFrame::PlanarXy;
        check_samples(&spline)?;
        Ok(spline)
    }

    fn unchecked(knots: &[Point3], slices: usize) -> Result<Self> {
        check_detail(slices)?;
        if knots.len() < 2 {
            return Err(PathError::TooFewPoints {
                min: 2,
                actual: knots.len(),
            });
        }

        let tol = Tolerance::DEFAULT;
        if let Some(index) = knots.windows(2).position(|w| tol.points_equal(&w[0], &w[1])) {
            return Err(PathError::Degenerate(format!(
                "knots {} and {} coincide",
                index,
                index + 1
            )));
        }

        let k: Vec<Vec3> = knots.iter().map(|p| p.coords).collect();
        let segments = solve_segments(&k);

        let lengths: Vec<f64> = segments.iter().map(Cubic::length).collect();
        if let Some(index) = lengths.iter().position(|&l| l < tol.linear) {
            return Err(PathError::Degenerate(format!("segment {index} has zero length")));
        }
        let total: f64 = lengths.iter().sum();

        let mut t_len: Vec<f64> = lengths.iter().map(|l| l / total).collect();
        let mut t_max = Vec::with_capacity(t_len.len());
        let mut acc = 0.0;
        for len in &t_len {
            acc += len;
            t_max.push(acc);
        }
        // Pin the last segment to end exactly at t = 1.
        let n = t_len.len();
        let before_last = if n > 1 { t_max[n - 2] } else { 0.0 };
        t_max[n - 1] = 1.0;
        t_len[n - 1] = 1.0 - before_last;

        Ok(Self {
            knots: knots.to_vec(),
            segments,
            t_len,
            t_max,
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

    /// Knots the spline passes through.
    pub fn knots(&self) -> &[Point3] {
        &self.knots
    }

    /// Number of cubic segments (knots minus one).
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Orthogonal frame rule in use.
    pub fn frame(&self) -> OrthogonalFrame {
        self.frame
    }

    /// Control points `[k_i, p1_i, p2_i, k_{i+1}]` of segment `index`.
    pub fn segment_control_points(&self, index: usize) -> Option<[Point3; 4]> {
        self.segments
            .get(index)
            .map(|c| c.p.map(Point3::from))
    }

    /// Map a global parameter to `(segment, local parameter)`.
    fn locate(&self, t: f64) -> (usize, f64) {
        let t = t.clamp(0.0, 1.0);
        let last = self.segments.len() - 1;
        let mut seg = 0;
        while seg < last && t > self.t_max[seg] {
            seg += 1;
        }
        let local = if seg == 0 {
            t / self.t_len[0]
        } else {
            (t - self.t_max[seg - 1]) / self.t_len[seg]
        };
        (seg, local.clamp(0.0, 1.0))
    }
}

/// Build the cubic segments through `k` with a tridiagonal (Thomas) solve
/// for the first interior control point of every segment.
fn solve_segments(k: &[Vec3]) -> Vec<Cubic> {
    let n = k.len() - 1;
    if n == 1 {
        let d = k[1] - k[0];
        return vec![Cubic {
            p: [k[0], k[0] + d / 3.0, k[0] + d * (2.0 / 3.0), k[1]],
        }];
    }

    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut r = vec![Vec3::zeros(); n];

    b[0] = 2.0;
    c[0] = 1.0;
    r[0] = k[0] + k[1] * 2.0;
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        c[i] = 1.0;
        r[i] = k[i] * 4.0 + k[i + 1] * 2.0;
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = k[n - 1] * 8.0 + k[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m * c[i - 1];
        let prev = r[i - 1];
        r[i] -= prev * m;
    }

    let mut p1 = vec![Vec3::zeros(); n];
    p1[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        p1[i] = (r[i] - p1[i + 1] * c[i]) / b[i];
    }

    let mut p2 = vec![Vec3::zeros(); n];
    for i in 0..n - 1 {
        p2[i] = k[i + 1] * 2.0 - p1[i + 1];
    }
    p2[n - 1] = (k[n] + p1[n - 1]) / 2.0;

    (0..n)
        .map(|i| Cubic {
            p: [k[i], p1[i], p2[i], k[i + 1]],
        })
        .collect()
}

impl Path for BezierSpline {
    fn point(&self, t: f64) -> Point3 {
        let (seg, local) = self.locate(t);
        Point3::from(self.segments[seg].point(local))
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let (seg, local) = self.locate(t);
        let eps = Tolerance::DEFAULT.linear;
        self.segments[seg]
            .derivative(local)
            .try_normalize(eps)
            .or_else(|| {
                let diff = self.point(t + crate::ONE_DEG_T) - self.point(t - crate::ONE_DEG_T);
                diff.try_normalize(eps)
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

    fn arch() -> BezierSpline {
        BezierSpline::planar(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)],
            20,
        )
        .unwrap()
    }

    #[test]
    fn test_spline_exact_endpoints() {
        let spline = arch();
        assert_eq!(spline.point(0.0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(spline.point(1.0), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_spline_passes_through_middle_knot() {
        let spline = arch();
        // Symmetric knots, so the middle knot sits at t = 0.5.
        let mid = spline.point(0.5);
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(mid.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spline_control_points() {
        let spline = arch();
        let seg0 = spline.segment_control_points(0).unwrap();
        let seg1 = spline.segment_control_points(1).unwrap();
        assert_relative_eq!(seg0[1].x, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(seg0[1].y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(seg1[1].x, 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(seg1[1].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(seg1[2].x, 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(seg1[2].y, 0.5, epsilon = 1e-12);
        assert!(spline.segment_control_points(2).is_none());
    }

    #[test]
    fn test_spline_c1_at_knots() {
        let spline = BezierSpline::new(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 0.5),
                Point3::new(3.0, 1.0, 1.0),
                Point3::new(4.0, 3.0, -1.0),
            ],
            30,
        )
        .unwrap();
        for i in 0..spline.num_segments() - 1 {
            let a = spline.segment_control_points(i).unwrap();
            let b = spline.segment_control_points(i + 1).unwrap();
            // Incoming and outgoing legs are equal at the shared knot.
            let incoming = a[3] - a[2];
            let outgoing = b[1] - b[0];
            assert!((incoming - outgoing).norm() < 1e-9);
        }
    }

    #[test]
    fn test_spline_two_knots_is_straight() {
        let spline = BezierSpline::new(&[Point3::origin(), Point3::new(0.0, 3.0, 0.0)], 6).unwrap();
        assert_eq!(spline.num_segments(), 1);
        let p = spline.point(0.5);
        assert_relative_eq!(p.y, 1.5, epsilon = 1e-12);
        assert!((spline.tangent(0.2) - Vec3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_spline_coincident_knots() {
        let err = BezierSpline::planar(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)],
            4,
        );
        assert!(matches!(err, Err(PathError::Degenerate(_))));
    }

    #[test]
    fn test_spline_too_few_knots() {
        let err = BezierSpline::planar(&[Point2::new(0.0, 0.0)], 4).unwrap_err();
        assert_eq!(err, PathError::TooFewPoints { min: 2, actual: 1 });
    }
}
