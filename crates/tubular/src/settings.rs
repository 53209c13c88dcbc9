//! Default detail levels and policies, loadable from TOML.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tubular_contour::{LatheSurface, Oval};
use tubular_math::Point3;
use tubular_path::{select_best, Linear, OrthogonalFrame, Path};
use tubular_sweep::{LatheCaps, LatheOptions};

use crate::{Result, TubularError};

/// Mesh generation settings.
///
/// Missing TOML keys fall back to [`MeshSettings::default`]:
///
/// ```toml
/// path_slices = 128
/// section_segments = 24
/// lathe_caps = "never"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Sample steps along a path.
    pub path_slices: usize,
    /// Segments around a cross-section or a lathe revolution.
    pub section_segments: usize,
    /// End-cap policy for lathed surfaces.
    pub lathe_caps: LatheCaps,
    /// Samples used when choosing an orthogonal frame for a path.
    pub frame_samples: usize,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            path_slices: 64,
            section_segments: 16,
            lathe_caps: LatheCaps::Auto,
            frame_samples: 32,
        }
    }
}

impl MeshSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        debug!("Loaded mesh settings: {:?}", settings);
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.path_slices == 0 {
            return Err(TubularError::InvalidSettings(
                "path_slices must be at least 1".into(),
            ));
        }
        if self.section_segments < 3 {
            return Err(TubularError::InvalidSettings(
                "section_segments must be at least 3".into(),
            ));
        }
        if self.frame_samples < 2 {
            return Err(TubularError::InvalidSettings(
                "frame_samples must be at least 2".into(),
            ));
        }
        Ok(())
    }

    /// An oval section with `section_segments` segments.
    pub fn oval(&self, radius_x: f64, radius_y: f64) -> Result<Oval> {
        Ok(Oval::new(radius_x, radius_y, self.section_segments)?)
    }

    /// A straight path with `path_slices` slices.
    pub fn linear(&self, start: Point3, end: Point3) -> Result<Linear> {
        Ok(Linear::new(start, end, self.path_slices)?)
    }

    /// A full-turn lathe surface with `section_segments` segments.
    pub fn lathe_surface(&self, profile: Box<dyn Path>) -> Result<LatheSurface> {
        Ok(LatheSurface::new(profile, self.section_segments)?)
    }

    /// Lathe options carrying the configured cap policy.
    pub fn lathe_options(&self) -> LatheOptions {
        LatheOptions::default().with_caps(self.lathe_caps)
    }

    /// Least-twist orthogonal frame for `path`, sampled `frame_samples` times.
    pub fn best_frame(&self, path: &dyn Path) -> Result<OrthogonalFrame> {
        Ok(select_best(path, self.frame_samples)?)
    }
}
