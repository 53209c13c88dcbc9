#![warn(missing_docs)]

//! Math types for tubular mesh generation.
//!
//! Thin wrappers around nalgebra providing the primitives the sweep
//! engine needs: points, vectors, directions, rotations built from
//! vector pairs, rigid orientations, texture coordinates, and
//! tolerance constants.

use nalgebra::{Matrix3, Rotation3, Unit, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in the 2D contour plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Errors raised when a rotation cannot be built from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// An input vector had (near) zero length.
    #[error("zero-length vector")]
    ZeroVector,

    /// Two vectors that must span a plane were parallel.
    #[error("vectors are parallel and do not span a plane")]
    ParallelVectors,
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

// =============================================================================
// Rotation
// =============================================================================

/// A proper rotation in 3D space, stored as a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    quat: UnitQuaternion<f64>,
}

impl Rotation {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self {
            quat: UnitQuaternion::identity(),
        }
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            quat: UnitQuaternion::from_axis_angle(axis, angle),
        }
    }

    /// The minimal rotation taking direction `u` onto direction `v`.
    ///
    /// Anti-parallel inputs produce a half turn about an axis
    /// perpendicular to `u`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroVector`] if either input has zero length.
    pub fn between(u: &Vec3, v: &Vec3) -> Result<Self> {
        let eps = Tolerance::DEFAULT.linear;
        let nu = u.try_normalize(eps).ok_or(MathError::ZeroVector)?;
        let nv = v.try_normalize(eps).ok_or(MathError::ZeroVector)?;

        if let Some(quat) = UnitQuaternion::rotation_between(&nu, &nv) {
            return Ok(Self { quat });
        }

        // Anti-parallel: any perpendicular axis works.
        let helper = if nu.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let axis = Unit::try_new(nu.cross(&helper), eps).ok_or(MathError::ZeroVector)?;
        Ok(Self::about_axis(&axis, std::f64::consts::PI))
    }

    /// The rotation mapping the frame spanned by `(u1, u2)` onto the frame
    /// spanned by `(v1, v2)`.
    ///
    /// `u1` is taken exactly onto the direction of `v1`, and the plane of
    /// `(u1, u2)` onto the plane of `(v1, v2)`. The second vector of each
    /// pair only contributes its component orthogonal to the first.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroVector`] for a zero input and
    /// [`MathError::ParallelVectors`] if either pair fails to span a plane.
    pub fn from_frames(u1: &Vec3, u2: &Vec3, v1: &Vec3, v2: &Vec3) -> Result<Self> {
        let from = orthonormal_basis(u1, u2)?;
        let to = orthonormal_basis(v1, v2)?;
        let rot = Rotation3::from_matrix_unchecked(to * from.transpose());
        Ok(Self {
            quat: UnitQuaternion::from_rotation_matrix(&rot),
        })
    }

    /// Rotate a vector.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.quat * v
    }

    /// Rotate a point about the origin.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.quat * p
    }

    /// Compose: `other` first, then `self`.
    pub fn then(&self, other: &Rotation) -> Self {
        Self {
            quat: self.quat * other.quat,
        }
    }

    /// The inverse rotation.
    pub fn inverse(&self) -> Self {
        Self {
            quat: self.quat.inverse(),
        }
    }

    /// Rotation angle in radians, in `[0, π]`.
    pub fn angle(&self) -> f64 {
        self.quat.angle()
    }

    /// The underlying unit quaternion.
    pub fn quaternion(&self) -> &UnitQuaternion<f64> {
        &self.quat
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Columns `(e1, e2, e1 × e2)` of the orthonormal frame built from `a` and `b`.
fn orthonormal_basis(a: &Vec3, b: &Vec3) -> Result<Matrix3<f64>> {
    let eps = Tolerance::DEFAULT.linear;
    let e1 = a.try_normalize(eps).ok_or(MathError::ZeroVector)?;
    if b.norm() < eps {
        return Err(MathError::ZeroVector);
    }
    let e2 = (b - e1 * e1.dot(b))
        .try_normalize(eps * b.norm())
        .ok_or(MathError::ParallelVectors)?;
    let e3 = e1.cross(&e2);
    Ok(Matrix3::from_columns(&[e1, e2, e3]))
}

// =============================================================================
// Orientation
// =============================================================================

/// A rigid-body placement: a rotation followed (or preceded) by a
/// translation to `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Translation applied to every coordinate.
    pub origin: Vec3,
    /// Rotation applied to every coordinate and normal.
    pub rotation: Rotation,
}

impl Orientation {
    /// The identity placement.
    pub fn identity() -> Self {
        Self::new(Vec3::zeros(), Rotation::identity())
    }

    /// Placement from an explicit origin and rotation.
    pub fn new(origin: Vec3, rotation: Rotation) -> Self {
        Self { origin, rotation }
    }

    /// Placement at `origin` whose local +Y axis points along `up`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroVector`] if `up` has zero length.
    pub fn from_up(origin: Vec3, up: &Vec3) -> Result<Self> {
        Ok(Self::new(origin, Rotation::between(&Vec3::y(), up)?))
    }

    /// Placement at `origin` using the minimal rotation from `v0` to `v1`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ZeroVector`] if either vector has zero length.
    pub fn from_vectors(origin: Vec3, v0: &Vec3, v1: &Vec3) -> Result<Self> {
        Ok(Self::new(origin, Rotation::between(v0, v1)?))
    }

    /// Rotate then translate.
    pub fn apply_rt(&self, v: &Vec3) -> Vec3 {
        self.rotation.apply(v) + self.origin
    }

    /// Translate then rotate.
    pub fn apply_tr(&self, v: &Vec3) -> Vec3 {
        self.rotation.apply(&(v + self.origin))
    }

    /// Rotate only.
    pub fn apply_r(&self, v: &Vec3) -> Vec3 {
        self.rotation.apply(v)
    }

    /// Translate only.
    pub fn apply_t(&self, v: &Vec3) -> Vec3 {
        v + self.origin
    }

    /// Rotate a surface normal and renormalize it.
    ///
    /// A zero normal stays zero.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let r = self.rotation.apply(n);
        r.try_normalize(Tolerance::DEFAULT.linear).unwrap_or(r)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

// =============================================================================
// Texture coordinates
// =============================================================================

/// A texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Uv {
    /// Horizontal coordinate.
    pub u: f64,
    /// Vertical coordinate.
    pub v: f64,
}

impl Uv {
    /// Create a texture coordinate.
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// The same coordinate reflected horizontally (`u → 1 − u`).
    pub fn mirror_u(self) -> Self {
        Self::new(1.0 - self.u, self.v)
    }
}

// =============================================================================
// Tolerance
// =============================================================================

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two contour points are coincident within tolerance.
    pub fn points2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
