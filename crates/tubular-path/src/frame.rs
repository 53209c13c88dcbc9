//! Orthogonal-vector generators and twist-minimising frame selection.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tubular_math::{Rotation, Tolerance, Vec3};

use crate::{Path, PathError, Result};

/// A rule producing a vector orthogonal to a path tangent.
///
/// The first four variants are the candidates considered by
/// [`select_best`]; the planar variants are fixed choices for paths that
/// lie in a coordinate plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrthogonalFrame {
    /// `(-(y + z), x, x)`
    AxisX,
    /// `(y, -(x + z), y)`
    AxisY,
    /// `(z, z, -(x + y))`
    AxisZ,
    /// Pivot on the smallest tangent component; never degenerate for a
    /// non-zero tangent.
    Robust,
    /// `(-y, x, 0)`, the in-plane normal of a path in the XY plane.
    PlanarXy,
    /// `(-z, 0, x)`, the in-plane normal of a path in the XZ plane.
    PlanarXz,
}

impl OrthogonalFrame {
    /// Candidates in the order [`select_best`] evaluates them.
    pub const CANDIDATES: [OrthogonalFrame; 4] = [
        OrthogonalFrame::AxisX,
        OrthogonalFrame::AxisY,
        OrthogonalFrame::AxisZ,
        OrthogonalFrame::Robust,
    ];

    /// Unit vector orthogonal to `tangent`, or `None` where this rule
    /// degenerates.
    pub fn orthogonal(self, tangent: &Vec3) -> Option<Vec3> {
        let (x, y, z) = (tangent.x, tangent.y, tangent.z);
        let v = match self {
            OrthogonalFrame::AxisX => Vec3::new(-(y + z), x, x),
            OrthogonalFrame::AxisY => Vec3::new(y, -(x + z), y),
            OrthogonalFrame::AxisZ => Vec3::new(z, z, -(x + y)),
            OrthogonalFrame::Robust => {
                let threshold = 0.6 * tangent.norm();
                if threshold == 0.0 {
                    return None;
                }
                if x.abs() <= threshold {
                    Vec3::new(0.0, z, -y)
                } else if y.abs() <= threshold {
                    Vec3::new(-z, 0.0, x)
                } else {
                    Vec3::new(y, -x, 0.0)
                }
            }
            OrthogonalFrame::PlanarXy => Vec3::new(-y, x, 0.0),
            OrthogonalFrame::PlanarXz => Vec3::new(-z, 0.0, x),
        };
        v.try_normalize(Tolerance::DEFAULT.linear)
    }
}

/// Pick the candidate frame that twists least along `path`.
///
/// `samples` tangents are taken at evenly spaced parameters over `[0, 1]`
/// (at least two). For each candidate in [`OrthogonalFrame::CANDIDATES`]
/// order, the rotation taking (`+Z`, `(1, 1, 0)`) onto (tangent,
/// orthogonal) is applied to `+Y`, and the angles between consecutive
/// results are summed. A candidate that degenerates at any sample is
/// disqualified. The lowest total wins; ties keep the earlier candidate.
///
/// # Errors
///
/// Returns [`PathError::NoOrthogonalFrame`] if every candidate is
/// disqualified, which happens only when the tangent vanishes.
pub fn select_best(path: &dyn Path, samples: usize) -> Result<OrthogonalFrame> {
    let n = samples.max(2);
    let dt = 1.0 / (n - 1) as f64;
    let tangents: Vec<Vec3> = (0..n).map(|i| path.tangent(i as f64 * dt)).collect();

    let mut best: Option<(OrthogonalFrame, f64)> = None;
    for frame in OrthogonalFrame::CANDIDATES {
        match twist(frame, &tangents) {
            Some(total) => {
                if best.map_or(true, |(_, lowest)| total < lowest) {
                    best = Some((frame, total));
                }
            }
            None => debug!("orthogonal frame {:?} disqualified", frame),
        }
    }

    let (frame, total) = best.ok_or(PathError::NoOrthogonalFrame)?;
    debug!(
        "selected orthogonal frame {:?} (twist {:.6} rad over {} samples)",
        frame, total, n
    );
    Ok(frame)
}

/// Total angle the frame's up vector turns through across `tangents`.
fn twist(frame: OrthogonalFrame, tangents: &[Vec3]) -> Option<f64> {
    let reference = Vec3::new(1.0, 1.0, 0.0);
    let mut total = 0.0;
    let mut prev: Option<Vec3> = None;
    for tangent in tangents {
        let ortho = frame.orthogonal(tangent)?;
        let rot = Rotation::from_frames(&Vec3::z(), &reference, tangent, &ortho).ok()?;
        let up = rot.apply(&Vec3::y());
        if let Some(p) = prev {
            total += p.angle(&up);
        }
        prev = Some(up);
    }
    total.is_finite().then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BezierCurve, Linear};
    use tubular_math::Point3;

    #[test]
    fn test_candidates_are_orthogonal() {
        let tangents = [
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            Vec3::new(1.0, 2.0, 3.0).normalize(),
            Vec3::new(-0.3, 0.1, 0.9).normalize(),
        ];
        for frame in OrthogonalFrame::CANDIDATES {
            for tan in &tangents {
                if let Some(o) = frame.orthogonal(tan) {
                    assert!(o.dot(tan).abs() < 1e-12, "{:?} on {:?}", frame, tan);
                    assert!((o.norm() - 1.0).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_axis_x_degenerates() {
        let tan = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert!(OrthogonalFrame::AxisX.orthogonal(&tan).is_none());
        assert!(OrthogonalFrame::Robust.orthogonal(&tan).is_some());
    }

    #[test]
    fn test_robust_zero_tangent() {
        assert!(OrthogonalFrame::Robust.orthogonal(&Vec3::zeros()).is_none());
    }

    #[test]
    fn test_robust_pivots() {
        // x is the smallest component: (0, z, -y)
        let o = OrthogonalFrame::Robust.orthogonal(&Vec3::new(0.1, 0.0, 1.0)).unwrap();
        assert!((o - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        // x dominates, y small: (-z, 0, x)
        let o = OrthogonalFrame::Robust.orthogonal(&Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((o - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_straight_path_is_constant_and_deterministic() {
        let line = Linear::new(Point3::origin(), Point3::new(2.0, 1.0, 5.0), 8).unwrap();
        let first = select_best(&line, 16).unwrap();
        let second = select_best(&line, 16).unwrap();
        assert_eq!(first, second);
        // Zero twist for every candidate, so the first one wins.
        assert_eq!(first, OrthogonalFrame::AxisX);

        let o0 = line.orthogonal(0.0);
        for i in 1..=8 {
            let o = line.orthogonal(i as f64 / 8.0);
            assert!((o - o0).norm() < 1e-12);
        }
    }

    #[test]
    fn test_disqualified_candidate_skipped() {
        // Tangent (0, 1, -1) kills AxisX; AxisY is next in line.
        let line = Linear::new(Point3::origin(), Point3::new(0.0, 1.0, -1.0), 4).unwrap();
        assert_eq!(select_best(&line, 2).unwrap(), OrthogonalFrame::AxisY);
    }

    #[test]
    fn test_selection_on_curve_picks_lowest_twist() {
        let curve = BezierCurve::new(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 5.0, 5.0),
                Point3::new(5.0, 5.0, 0.0),
            ],
            32,
        )
        .unwrap();
        let chosen = select_best(&curve, 33).unwrap();

        let tangents: Vec<Vec3> = (0..33).map(|i| curve.tangent(i as f64 / 32.0)).collect();
        let chosen_twist = twist(chosen, &tangents).unwrap();
        for frame in OrthogonalFrame::CANDIDATES {
            if let Some(total) = twist(frame, &tangents) {
                assert!(chosen_twist <= total);
            }
        }
    }
}
