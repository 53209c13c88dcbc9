//! Texture-coordinate remapping applied per mesh part.

use serde::{Deserialize, Serialize};
use tubular_math::Uv;

/// Quarter-turn rotations and flips of the unit texture square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UvTransform {
    /// Unchanged.
    #[default]
    Rot0,
    /// `(u, v) → (v, 1 − u)`
    Rot90,
    /// `(u, v) → (1 − u, 1 − v)`
    Rot180,
    /// `(u, v) → (1 − v, u)`
    Rot270,
    /// `(u, v) → (1 − u, v)`
    FlipH,
    /// `(u, v) → (u, 1 − v)`
    FlipV,
}

impl UvTransform {
    /// Apply to a normalised coordinate.
    pub fn apply(self, uv: Uv) -> Uv {
        let Uv { u, v } = uv;
        match self {
            UvTransform::Rot0 => uv,
            UvTransform::Rot90 => Uv::new(v, 1.0 - u),
            UvTransform::Rot180 => Uv::new(1.0 - u, 1.0 - v),
            UvTransform::Rot270 => Uv::new(1.0 - v, u),
            UvTransform::FlipH => Uv::new(1.0 - u, v),
            UvTransform::FlipV => Uv::new(u, 1.0 - v),
        }
    }
}

/// Maps the normalised texture coordinates of a mesh part into a
/// sub-rectangle `[u0, u1] × [v0, v1]` of a texture, after a
/// [`UvTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvMapping {
    /// Rotation or flip applied first.
    pub transform: UvTransform,
    /// Texture `u` for normalised `u = 0`.
    pub u0: f64,
    /// Texture `u` for normalised `u = 1`.
    pub u1: f64,
    /// Texture `v` for normalised `v = 0`.
    pub v0: f64,
    /// Texture `v` for normalised `v = 1`.
    pub v1: f64,
}

impl UvMapping {
    /// The whole texture, untransformed.
    pub const IDENTITY: Self = Self {
        transform: UvTransform::Rot0,
        u0: 0.0,
        u1: 1.0,
        v0: 0.0,
        v1: 1.0,
    };

    /// Map into `[u0, u1] × [v0, v1]` without rotation.
    pub fn range(u0: f64, u1: f64, v0: f64, v1: f64) -> Self {
        Self {
            transform: UvTransform::Rot0,
            u0,
            u1,
            v0,
            v1,
        }
    }

    /// Same range with a different transform.
    #[must_use]
    pub fn with_transform(mut self, transform: UvTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Map a normalised coordinate.
    pub fn apply(&self, uv: Uv) -> Uv {
        let t = self.transform.apply(uv);
        Uv::new(
            self.u0 + t.u * (self.u1 - self.u0),
            self.v0 + t.v * (self.v1 - self.v0),
        )
    }
}

impl Default for UvMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transforms_corner() {
        let uv = Uv::new(0.25, 0.0);
        let cases = [
            (UvTransform::Rot0, (0.25, 0.0)),
            (UvTransform::Rot90, (0.0, 0.75)),
            (UvTransform::Rot180, (0.75, 1.0)),
            (UvTransform::Rot270, (1.0, 0.25)),
            (UvTransform::FlipH, (0.75, 0.0)),
            (UvTransform::FlipV, (0.25, 1.0)),
        ];
        for (t, (u, v)) in cases {
            let out = t.apply(uv);
            assert_relative_eq!(out.u, u);
            assert_relative_eq!(out.v, v);
        }
    }

    #[test]
    fn test_quarter_turns_compose() {
        let uv = Uv::new(0.2, 0.7);
        let twice = UvTransform::Rot90.apply(UvTransform::Rot90.apply(uv));
        let half = UvTransform::Rot180.apply(uv);
        assert_relative_eq!(twice.u, half.u, epsilon = 1e-12);
        assert_relative_eq!(twice.v, half.v, epsilon = 1e-12);
    }

    #[test]
    fn test_mapping_range() {
        let m = UvMapping::range(0.5, 1.0, 0.0, 0.25);
        let out = m.apply(Uv::new(0.5, 1.0));
        assert_relative_eq!(out.u, 0.75);
        assert_relative_eq!(out.v, 0.25);

        let flipped = m.with_transform(UvTransform::FlipV).apply(Uv::new(0.5, 1.0));
        assert_relative_eq!(flipped.v, 0.0);
        assert_eq!(UvMapping::default(), UvMapping::IDENTITY);
    }
}
