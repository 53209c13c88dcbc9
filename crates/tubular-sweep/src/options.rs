//! Options for sweep operations.

use serde::{Deserialize, Serialize};
use tubular_contour::{FixedScale, Scale};
use tubular_math::Orientation;

/// Options for [`tube`](crate::tube) and [`extrude`](crate::extrude).
#[derive(Debug, Clone, Copy)]
pub struct SweepOptions<'a> {
    /// Cross-section scale along the path. Default: [`FixedScale::UNIT`].
    pub scale: &'a dyn Scale,
    /// Placement applied to the finished mesh. Default: none.
    pub orientation: Option<Orientation>,
}

impl<'a> SweepOptions<'a> {
    /// Use `scale` for the cross-section.
    #[must_use]
    pub fn with_scale(mut self, scale: &'a dyn Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Place the finished mesh with `orientation`.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

impl Default for SweepOptions<'_> {
    fn default() -> Self {
        Self {
            scale: &FixedScale::UNIT,
            orientation: None,
        }
    }
}

/// When a lathed surface gets end caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatheCaps {
    /// Cap an open profile only. Caps that collapse onto the axis are
    /// skipped.
    #[default]
    Auto,
    /// Cap both ends whenever the ring encloses area.
    Always,
    /// Never cap.
    Never,
}

/// Options for [`lathe`](crate::lathe).
#[derive(Debug, Clone, Copy, Default)]
pub struct LatheOptions {
    /// End-cap policy. Default: [`LatheCaps::Auto`].
    pub caps: LatheCaps,
    /// Placement applied to the finished mesh. Default: none.
    pub orientation: Option<Orientation>,
}

impl LatheOptions {
    /// Use the given cap policy.
    #[must_use]
    pub fn with_caps(mut self, caps: LatheCaps) -> Self {
        self.caps = caps;
        self
    }

    /// Place the finished mesh with `orientation`.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}
