#![warn(missing_docs)]

//! Cross-section contours for the tubular sweep engine.
//!
//! A contour is a closed ring of 2D points in the XY plane, stored with its
//! first point repeated at the end. [`Oval`] rings are generated from two
//! radii; [`Polygon`] rings are user supplied, normalised to
//! counter-clockwise order and triangulated for end caps.
//!
//! This crate also holds the other per-sweep inputs: [`Scale`] functions
//! and the [`LatheSurface`] description.
//!
//! # Example
//!
//! ```
//! use tubular_contour::{Polygon, signed_area};
//! use tubular_math::Point2;
//!
//! // Clockwise input is reversed on construction.
//! let square = Polygon::new(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(1.0, 0.0),
//! ]).unwrap();
//! assert!(signed_area(square.coords()) > 0.0);
//! assert_eq!(square.triangles().len(), 6);
//! ```

mod lathe;
mod oval;
mod points;
mod polygon;
mod scale;
mod triangulate;

pub use lathe::LatheSurface;
pub use oval::Oval;
pub use points::{flip_h, flip_v, rotate_ccw, rotate_cw, signed_area};
pub use polygon::Polygon;
pub use scale::{FixedScale, LinearScale, PathScale, Scale};
pub use triangulate::triangulate;

use thiserror::Error;

/// Errors from contour, scale and lathe construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContourError {
    /// Segment count was zero.
    #[error("segment count must be at least 1, got {0}")]
    InvalidDetail(usize),

    /// A radius was zero, negative or not finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// An angle was not finite.
    #[error("invalid angle: {0}")]
    InvalidAngle(f64),

    /// Not enough distinct vertices.
    #[error("too few vertices: need at least {min}, got {actual}")]
    TooFewVertices {
        /// Minimum required.
        min: usize,
        /// Number supplied.
        actual: usize,
    },

    /// Two consecutive vertices coincide, leaving a zero-length edge.
    #[error("vertex {index} duplicates its predecessor")]
    DuplicateVertex {
        /// Index of the repeated vertex in the input.
        index: usize,
    },

    /// The polygon encloses no area.
    #[error("polygon has zero area")]
    ZeroArea,

    /// Ear clipping ran out of ears before the polygon was consumed.
    /// The input is self-intersecting or otherwise not simple.
    #[error("triangulation failed with {remaining} vertices left")]
    TriangulationFailed {
        /// Vertices still unclipped when no ear could be found.
        remaining: usize,
    },
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
