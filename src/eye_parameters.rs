#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::field_of_view::FieldOfView;
use crate::target::TargetSize;

/// Per-eye render descriptor negotiated once at session open: how the runtime
/// wants this eye rendered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct EyeParameters {
    /// Offset from the head center to this eye's center, in meters.
    pub offset: [f32; 3],

    /// Recommended render texture width for this eye, in pixels.
    pub render_width: u32,

    /// Recommended render texture height for this eye, in pixels.
    pub render_height: u32,

    /// Field of view the projection matrix must cover for this eye.
    pub field_of_view: FieldOfView,
}

impl EyeParameters {
    /// Recommended texture size as a [`TargetSize`].
    pub fn recommended_size(&self) -> TargetSize {
        TargetSize {
            width: self.render_width,
            height: self.render_height,
        }
    }
}

impl Default for EyeParameters {
    fn default() -> EyeParameters {
        EyeParameters {
            offset: [0.0, 0.0, 0.0],
            render_width: 0,
            render_height: 0,
            field_of_view: FieldOfView::default(),
        }
    }
}
