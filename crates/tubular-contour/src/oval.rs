//! Elliptical cross-section.

use std::f64::consts::TAU;

use tubular_math::{Point2, Uv};

use crate::{ContourError, Result};

/// An ellipse in the XY plane sampled at `segments` evenly spaced angles,
/// counter-clockwise from +X.
///
/// Texture coordinates are laid out for a fan cap: entry 0 is the centre
/// `(0.5, 0.5)`, followed by one entry per ring point.
#[derive(Debug, Clone, PartialEq)]
pub struct Oval {
    radius_x: f64,
    radius_y: f64,
    coords: Vec<Point2>,
    uv: Vec<Uv>,
}

impl Oval {
    /// Create an oval with `segments` edges.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive radius or zero segments.
    pub fn new(radius_x: f64, radius_y: f64, segments: usize) -> Result<Self> {
        for r in [radius_x, radius_y] {
            if !r.is_finite() || r <= 0.0 {
                return Err(ContourError::InvalidRadius(r));
            }
        }
        if segments == 0 {
            return Err(ContourError::InvalidDetail(segments));
        }

        let delta = TAU / segments as f64;
        let mut coords = Vec::with_capacity(segments + 1);
        let mut uv = Vec::with_capacity(segments + 2);
        uv.push(Uv::new(0.5, 0.5));
        for s in 0..segments {
            let (sin, cos) = (s as f64 * delta).sin_cos();
            coords.push(Point2::new(radius_x * cos, radius_y * sin));
            uv.push(Uv::new((1.0 - cos) / 2.0, (1.0 + sin) / 2.0));
        }
        coords.push(coords[0]);
        uv.push(uv[1]);

        Ok(Self {
            radius_x,
            radius_y,
            coords,
            uv,
        })
    }

    /// A circle of the given radius.
    ///
    /// # Errors
    ///
    /// See [`Oval::new`].
    pub fn circle(radius: f64, segments: usize) -> Result<Self> {
        Self::new(radius, radius, segments)
    }

    /// The same ring with texture coordinates mirrored horizontally, used
    /// for the far end cap so the texture reads the right way round from
    /// outside.
    pub fn mirror(&self) -> Self {
        Self {
            uv: self.uv.iter().map(|uv| uv.mirror_u()).collect(),
            ..self.clone()
        }
    }

    /// Radius along X.
    pub fn radius_x(&self) -> f64 {
        self.radius_x
    }

    /// Radius along Y.
    pub fn radius_y(&self) -> f64 {
        self.radius_y
    }

    /// Number of edges.
    pub fn segments(&self) -> usize {
        self.coords.len() - 1
    }

    /// Ring points; the last repeats the first.
    pub fn coords(&self) -> &[Point2] {
        &self.coords
    }

    /// Cap texture coordinates: centre first, then one per ring point.
    pub fn uv(&self) -> &[Uv] {
        &self.uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signed_area;
    use approx::assert_relative_eq;

    #[test]
    fn test_oval_layout() {
        let oval = Oval::new(3.0, 2.0, 12).unwrap();
        assert_eq!(oval.segments(), 12);
        assert_eq!(oval.coords().len(), 13);
        assert_eq!(oval.uv().len(), 14);
        assert_eq!(oval.coords()[0], oval.coords()[12]);
        assert_relative_eq!(oval.coords()[3].y, 2.0, epsilon = 1e-12);
        assert_eq!(oval.uv()[0], Uv::new(0.5, 0.5));
    }

    #[test]
    fn test_oval_is_ccw() {
        let oval = Oval::circle(1.0, 32).unwrap();
        assert!(signed_area(oval.coords()) > 0.0);
    }

    #[test]
    fn test_oval_uv_in_unit_square() {
        let oval = Oval::new(5.0, 1.0, 7).unwrap();
        for uv in oval.uv() {
            assert!((0.0..=1.0).contains(&uv.u) && (0.0..=1.0).contains(&uv.v));
        }
    }

    #[test]
    fn test_oval_mirror() {
        let oval = Oval::new(2.0, 1.0, 8).unwrap();
        let mirrored = oval.mirror();
        assert_eq!(mirrored.coords(), oval.coords());
        for (a, b) in oval.uv().iter().zip(mirrored.uv()) {
            assert_relative_eq!(a.u + b.u, 1.0, epsilon = 1e-12);
            assert_relative_eq!(a.v, b.v);
        }
        for (a, b) in oval.uv().iter().zip(mirrored.mirror().uv()) {
            assert_relative_eq!(a.u, b.u, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_oval_invalid() {
        assert_eq!(Oval::new(0.0, 1.0, 8), Err(ContourError::InvalidRadius(0.0)));
        assert_eq!(Oval::new(1.0, 1.0, 0), Err(ContourError::InvalidDetail(0)));
    }
}
