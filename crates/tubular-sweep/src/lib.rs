#![warn(missing_docs)]

//! Sweep engine for tubular meshes.
//!
//! Generates surface meshes by moving a cross-section along a path
//! ([`tube`], [`extrude`]) or by revolving a profile about the Y axis
//! ([`lathe`]). Closed solids ([`ellipsoid`], [`double_cone`], [`boxed`])
//! are generated directly in the same form. Each sweep yields a [`SweptMesh`]: a body [`Grid`] of
//! coordinates, normals and texture coordinates plus optional end caps.
//! [`SweptMesh::to_triangle_mesh`] flattens it into indexed triangles for
//! rendering or export.
//!
//! # Example
//!
//! ```
//! use tubular_contour::Oval;
//! use tubular_math::Point3;
//! use tubular_path::Linear;
//! use tubular_sweep::{tube, SweepOptions};
//!
//! let path = Linear::new(Point3::origin(), Point3::new(0.0, 0.0, 10.0), 10).unwrap();
//! let section = Oval::circle(1.0, 12).unwrap();
//! let mesh = tube(&path, &section, &SweepOptions::default()).unwrap();
//!
//! assert_eq!(mesh.body().slices(), 10);
//! assert_eq!(mesh.body().segments(), 12);
//! assert!(mesh.start_cap().is_some() && mesh.end_cap().is_some());
//! ```

mod cap;
mod extrude;
mod grid;
mod lathe;
mod mesh;
mod options;
mod shapes;
mod tube;
mod uv;

pub use cap::{CapTopology, EndCap};
pub use extrude::extrude;
pub use grid::{Grid, Winding};
pub use lathe::lathe;
pub use mesh::{DrawMode, MeshPart, PartGeometry, PartKind, PartStyle, SweptMesh, TriangleMesh};
pub use options::{LatheCaps, LatheOptions, SweepOptions};
pub use shapes::{boxed, double_cone, ellipsoid};
pub use tube::tube;
pub use uv::{UvMapping, UvTransform};

use thiserror::Error;
use tubular_contour::ContourError;
use tubular_math::MathError;
use tubular_path::PathError;

/// Errors from sweep operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    /// The path or profile reports zero slices.
    #[error("detail level must be at least 1, got {0}")]
    InvalidDetail(usize),

    /// The path's tangent and orthogonal vectors do not form a frame.
    #[error("cannot build a frame at column {column}: {source}")]
    DegenerateFrame {
        /// Column along the path.
        column: usize,
        /// Underlying rotation failure.
        #[source]
        source: MathError,
    },

    /// A surface normal could not be derived from neighbouring vertices.
    #[error("degenerate surface at column {column}, row {row}")]
    DegenerateGeometry {
        /// Column along the path.
        column: usize,
        /// Row around the section.
        row: usize,
    },

    /// A shape dimension is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Which dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A path built for a shape was rejected.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A contour built for a shape was rejected.
    #[error(transparent)]
    Contour(#[from] ContourError),

    /// A generated coordinate or normal is NaN or infinite.
    #[error("non-finite geometry at column {column}, row {row}")]
    NonFinite {
        /// Column along the path.
        column: usize,
        /// Row around the section.
        row: usize,
    },
}

/// Result type for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
