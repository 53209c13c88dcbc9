//! Error types for the tubular facade.

use thiserror::Error;
use tubular_contour::ContourError;
use tubular_math::MathError;
use tubular_path::PathError;
use tubular_sweep::SweepError;

/// Any error raised while building a swept mesh.
#[derive(Error, Debug)]
pub enum TubularError {
    /// Rotation or frame construction failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// A path could not be built or sampled.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A contour, scale or lathe surface was invalid.
    #[error(transparent)]
    Contour(#[from] ContourError),

    /// The sweep itself failed.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// Settings text could not be parsed.
    #[error("invalid settings file: {0}")]
    Config(#[from] toml::de::Error),

    /// Settings parsed but hold an unusable value.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, TubularError>;
