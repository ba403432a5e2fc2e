#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::render::TextureHandle;
use crate::target::{SharedRenderTarget, TargetSize, Viewport};

/// The rendered output handed to the headset runtime for distortion and
/// presentation: one shared texture plus the pixel rectangle each eye was
/// rendered into.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct Layer {
    /// Texture holding both eye images.
    pub texture: TextureHandle,

    /// Full size of that texture in pixels.
    pub texture_size: TargetSize,

    /// Per-eye source rectangles within the texture (left = 0, right = 1).
    pub viewports: [Viewport; 2],
}

impl Layer {
    /// Layer describing the current contents of a shared render target.
    pub fn from_target(target: &SharedRenderTarget) -> Layer {
        Layer {
            texture: target.texture,
            texture_size: target.size,
            viewports: target.viewports,
        }
    }
}
