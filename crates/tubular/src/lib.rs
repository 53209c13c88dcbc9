#![warn(missing_docs)]

//! Swept-surface mesh generation.
//!
//! `tubular` builds renderable meshes by sweeping a cross-section along a
//! parametric path or by revolving a profile about the Y axis:
//!
//! - **Paths**: straight lines, rings, spirals, Lissajous knots, Bezier
//!   curves and smooth Bezier splines, each with a least-twist frame.
//! - **Contours**: ovals and arbitrary simple polygons (triangulated for
//!   caps), plus scales that vary the section along the path.
//! - **Sweeps**: [`tube`], [`extrude`] and [`lathe`], producing a body
//!   grid with optional end caps that flattens to a [`TriangleMesh`].
//! - **Solids**: [`ellipsoid`], [`double_cone`] and [`boxed`].
//!
//! # Example
//!
//! ```
//! use tubular::{tube, MeshSettings, Point3, SweepOptions};
//!
//! let settings = MeshSettings::from_toml_str("path_slices = 20").unwrap();
//! let path = settings.linear(Point3::origin(), Point3::new(0.0, 0.0, 5.0)).unwrap();
//! let section = settings.oval(1.0, 0.5).unwrap();
//!
//! let mesh = tube(&path, &section, &SweepOptions::default()).unwrap();
//! let triangles = mesh.to_triangle_mesh();
//! assert_eq!(triangles.num_vertices(), mesh.num_vertices());
//! ```

pub mod error;
pub mod settings;

pub use error::{Result, TubularError};
pub use settings::MeshSettings;

pub use tubular_contour::{
    flip_h, flip_v, rotate_ccw, rotate_cw, signed_area, triangulate, ContourError, FixedScale,
    LatheSurface, LinearScale, Oval, PathScale, Polygon, Scale,
};
pub use tubular_math::{
    Dir3, MathError, Orientation, Point2, Point3, Rotation, Tolerance, Uv, Vec2, Vec3,
};
pub use tubular_path::{
    select_best, BezierCurve, BezierSpline, Linear, Lissajous, OrthogonalFrame, Path, PathError,
    Ring, Spiral,
};
pub use tubular_sweep::{
    boxed, double_cone, ellipsoid, extrude, lathe, tube, CapTopology, DrawMode, EndCap, Grid,
    LatheCaps, LatheOptions, MeshPart, PartGeometry, PartKind, PartStyle, SweepError,
    SweepOptions, SweptMesh, TriangleMesh, UvMapping, UvTransform, Winding,
};
