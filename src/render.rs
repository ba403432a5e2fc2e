#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::distortion::DistortionMeshData;
use crate::error::Error;
use crate::scene::Scene;
use crate::target::{TargetSize, Viewport};

/// Opaque handle to a device-owned texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct TextureHandle(pub u32);

/// Opaque handle to a device-owned vertex/index buffer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct MeshHandle(pub u32);

/// The graphics device the frame loop draws through.
///
/// Allocation calls may not honor the requested dimensions exactly; callers
/// must re-read [`render_target_size`](RenderDevice::render_target_size) after
/// creating a target and size everything downstream from the answer.
pub trait RenderDevice {
    /// Allocate an off-screen color target of roughly the given size.
    fn create_render_target(&mut self, size: TargetSize) -> Result<TextureHandle, Error>;

    /// Size the hardware actually granted for a target.
    fn render_target_size(&self, texture: TextureHandle) -> Result<TargetSize, Error>;

    /// Release a target allocated by
    /// [`create_render_target`](RenderDevice::create_render_target).
    fn destroy_render_target(&mut self, texture: TextureHandle);

    /// Direct subsequent draws into the given target, or into the default
    /// backbuffer when `None`.
    fn set_render_target(&mut self, texture: Option<TextureHandle>);

    /// Restrict subsequent draws to a rectangle of the bound target.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clear the bound target within the current viewport.
    fn clear(&mut self, color: [f32; 4]);

    /// Draw every mesh of the scene with the given column-major view and
    /// projection matrices.
    fn draw_scene(&mut self, scene: &Scene, view: &[f32; 16], projection: &[f32; 16]);

    /// Upload a runtime-provided distortion mesh into device buffers.
    /// Used only on the application-side distortion path.
    fn upload_distortion_mesh(&mut self, mesh: &DistortionMeshData) -> Result<MeshHandle, Error>;

    /// Release buffers created by
    /// [`upload_distortion_mesh`](RenderDevice::upload_distortion_mesh).
    fn destroy_distortion_mesh(&mut self, mesh: MeshHandle);

    /// Draw one eye's distortion pass: sample `source` through the mesh with
    /// the runtime-provided UV scale/offset and time-warp matrix pair.
    fn draw_distortion(
        &mut self,
        mesh: MeshHandle,
        source: TextureHandle,
        uv_scale_offset: [[f32; 2]; 2],
        timewarp: &[[f32; 16]; 2],
    );

    /// Present the default backbuffer.
    fn present(&mut self, vsync: bool);
}
