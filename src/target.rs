#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use log::debug;

use crate::error::Error;
use crate::eye_parameters::EyeParameters;
use crate::render::{RenderDevice, TextureHandle};

/// Pixel dimensions of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> TargetSize {
        TargetSize { width, height }
    }
}

/// Sub-rectangle of a shared render target dedicated to one eye's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Viewport {
        Viewport {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole target.
    pub fn of_target(size: TargetSize) -> Viewport {
        Viewport::new(0, 0, size.width, size.height)
    }
}

/// Combined size for one shared target holding both eyes side by side:
/// widths add, heights take the max.
pub fn plan_combined_size(left: &EyeParameters, right: &EyeParameters) -> TargetSize {
    TargetSize {
        width: left.render_width + right.render_width,
        height: left.render_height.max(right.render_height),
    }
}

/// Eye viewports for a shared target of the given *actual* size.
///
/// Left eye takes the left half rounded down; right eye starts at the half
/// rounded up with the same size. Derived from the allocated size, never from
/// the requested one.
pub fn eye_viewports(size: TargetSize) -> [Viewport; 2] {
    let half = TargetSize::new(size.width / 2, size.height);
    [
        Viewport::new(0, 0, half.width, half.height),
        Viewport::new((size.width + 1) / 2, 0, half.width, half.height),
    ]
}

/// A single off-screen color buffer holding both eye images side by side.
///
/// The buffer itself is owned by the graphics device; this struct keeps the
/// handle, the size the hardware actually granted, and the two eye viewports
/// derived from that size.
#[derive(Debug)]
pub struct SharedRenderTarget {
    pub texture: TextureHandle,
    pub size: TargetSize,
    pub viewports: [Viewport; 2],
}

impl SharedRenderTarget {
    /// Allocate the shared target with two-pass sizing: request the combined
    /// recommended size, then re-read the size the device actually allocated
    /// (hardware limits may shrink it) and lay out the viewports from that.
    pub fn allocate(
        render: &mut dyn RenderDevice,
        left: &EyeParameters,
        right: &EyeParameters,
    ) -> Result<SharedRenderTarget, Error> {
        let requested = plan_combined_size(left, right);
        let texture = render.create_render_target(requested)?;
        let actual = render.render_target_size(texture)?;
        if actual != requested {
            debug!(
                "render target clamped: requested {}x{}, got {}x{}",
                requested.width, requested.height, actual.width, actual.height
            );
        }
        Ok(SharedRenderTarget {
            texture,
            size: actual,
            viewports: eye_viewports(actual),
        })
    }

    /// Release the device-owned buffer. Must happen before the device session
    /// closes.
    pub fn release(self, render: &mut dyn RenderDevice) {
        render.destroy_render_target(self.texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_of_view::FieldOfView;

    fn eye(w: u32, h: u32) -> EyeParameters {
        EyeParameters {
            offset: [0.0, 0.0, 0.0],
            render_width: w,
            render_height: h,
            field_of_view: FieldOfView::symmetric(45.0),
        }
    }

    #[test]
    fn combined_size_sums_widths_and_takes_max_height() {
        let size = plan_combined_size(&eye(1182, 1461), &eye(1182, 1461));
        assert_eq!(size, TargetSize::new(2364, 1461));

        let size = plan_combined_size(&eye(100, 50), &eye(30, 200));
        assert_eq!(size, TargetSize::new(130, 200));

        let size = plan_combined_size(&eye(0, 0), &eye(0, 0));
        assert_eq!(size, TargetSize::new(0, 0));
    }

    #[test]
    fn viewports_tile_even_width_exactly() {
        let [left, right] = eye_viewports(TargetSize::new(2364, 1461));
        assert_eq!(left, Viewport::new(0, 0, 1182, 1461));
        assert_eq!(right, Viewport::new(1182, 0, 1182, 1461));
        // no overlap, exact tiling
        assert_eq!(left.x + left.width, right.x);
        assert_eq!(right.x + right.width, 2364);
    }

    #[test]
    fn viewports_never_overlap_for_odd_width() {
        let [left, right] = eye_viewports(TargetSize::new(2365, 1461));
        assert_eq!(left, Viewport::new(0, 0, 1182, 1461));
        assert_eq!(right, Viewport::new(1183, 0, 1182, 1461));
        // equal sizes, right edge lands exactly on the target edge
        assert_eq!(left.width, right.width);
        assert!(left.x + left.width <= right.x);
        assert_eq!(right.x + right.width, 2365);
    }

    #[test]
    fn viewports_derive_from_actual_size_not_requested() {
        // Simulates a hardware clamp from 4096 to 2048 wide.
        let [left, right] = eye_viewports(TargetSize::new(2048, 1024));
        assert_eq!(left.width, 1024);
        assert_eq!(right.x, 1024);
    }
}
