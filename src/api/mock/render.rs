use std::collections::HashMap;

use super::{TeardownEvent, TeardownLog};
use crate::distortion::DistortionMeshData;
use crate::error::Error;
use crate::render::{MeshHandle, RenderDevice, TextureHandle};
use crate::scene::Scene;
use crate::target::{TargetSize, Viewport};

struct TargetState {
    size: TargetSize,
    /// Bumped on every write (clear or draw) into the target, so tests can
    /// tell whether pixels changed without storing any.
    generation: u64,
}

/// Headless graphics device.
///
/// Honors the contract the frame loop depends on and counts every call. In
/// particular it clamps render target allocations to a configurable hardware
/// limit, so the two-pass sizing policy is exercised for real.
pub struct MockRenderDevice {
    backbuffer: TargetSize,
    max_target_size: TargetSize,
    next_handle: u32,
    targets: HashMap<u32, TargetState>,
    meshes: HashMap<u32, usize>,
    bound: Option<TextureHandle>,
    viewport: Viewport,
    last_requested: Option<TargetSize>,
    deny_allocations: bool,
    scene_draws: u64,
    distortion_draws: u64,
    clears: u64,
    presents: u64,
    teardown: Option<TeardownLog>,
}

impl MockRenderDevice {
    /// A device with a backbuffer of the given size.
    pub fn new(backbuffer: TargetSize) -> Result<MockRenderDevice, Error> {
        if backbuffer.width == 0 || backbuffer.height == 0 {
            return Err(Error::WindowCreationFailed);
        }
        Ok(MockRenderDevice {
            backbuffer,
            max_target_size: TargetSize::new(4096, 4096),
            next_handle: 1,
            targets: HashMap::new(),
            meshes: HashMap::new(),
            bound: None,
            viewport: Viewport::of_target(backbuffer),
            last_requested: None,
            deny_allocations: false,
            scene_draws: 0,
            distortion_draws: 0,
            clears: 0,
            presents: 0,
            teardown: None,
        })
    }

    /// Simulate a hardware limit: allocations larger than this are clamped.
    pub fn with_max_target_size(mut self, max: TargetSize) -> MockRenderDevice {
        self.max_target_size = max;
        self
    }

    pub fn with_teardown_log(mut self, teardown: TeardownLog) -> MockRenderDevice {
        self.teardown = Some(teardown);
        self
    }

    /// Refuse all further render target allocations.
    pub fn deny_allocations(&mut self) {
        self.deny_allocations = true;
    }

    fn log(&self, event: TeardownEvent) {
        if let Some(log) = &self.teardown {
            log.lock().unwrap().push(event);
        }
    }

    /// Size asked for by the most recent allocation, before clamping.
    pub fn last_requested_size(&self) -> Option<TargetSize> {
        self.last_requested
    }

    pub fn target_generation(&self, texture: TextureHandle) -> Option<u64> {
        self.targets.get(&texture.0).map(|t| t.generation)
    }

    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn scene_draws(&self) -> u64 {
        self.scene_draws
    }

    pub fn distortion_draws(&self) -> u64 {
        self.distortion_draws
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn current_viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bound_target(&self) -> Option<TextureHandle> {
        self.bound
    }
}

impl RenderDevice for MockRenderDevice {
    fn create_render_target(&mut self, size: TargetSize) -> Result<TextureHandle, Error> {
        self.last_requested = Some(size);
        if self.deny_allocations {
            return Err(Error::RenderingConfigurationFailed(
                "render target allocation denied",
            ));
        }
        let granted = TargetSize::new(
            size.width.min(self.max_target_size.width),
            size.height.min(self.max_target_size.height),
        );
        let handle = self.next_handle;
        self.next_handle += 1;
        self.targets.insert(
            handle,
            TargetState {
                size: granted,
                generation: 0,
            },
        );
        Ok(TextureHandle(handle))
    }

    fn render_target_size(&self, texture: TextureHandle) -> Result<TargetSize, Error> {
        self.targets
            .get(&texture.0)
            .map(|t| t.size)
            .ok_or(Error::RenderingConfigurationFailed("unknown render target"))
    }

    fn destroy_render_target(&mut self, texture: TextureHandle) {
        if self.targets.remove(&texture.0).is_some() {
            self.log(TeardownEvent::RenderTargetDestroyed);
        }
        if self.bound == Some(texture) {
            self.bound = None;
        }
    }

    fn set_render_target(&mut self, texture: Option<TextureHandle>) {
        self.bound = texture;
        self.viewport = match texture {
            Some(t) => self
                .targets
                .get(&t.0)
                .map(|state| Viewport::of_target(state.size))
                .unwrap_or(self.viewport),
            None => Viewport::of_target(self.backbuffer),
        };
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self, _color: [f32; 4]) {
        self.clears += 1;
        if let Some(bound) = self.bound {
            if let Some(state) = self.targets.get_mut(&bound.0) {
                state.generation += 1;
            }
        }
    }

    fn draw_scene(&mut self, _scene: &Scene, _view: &[f32; 16], _projection: &[f32; 16]) {
        self.scene_draws += 1;
        if let Some(bound) = self.bound {
            if let Some(state) = self.targets.get_mut(&bound.0) {
                state.generation += 1;
            }
        }
    }

    fn upload_distortion_mesh(&mut self, mesh: &DistortionMeshData) -> Result<MeshHandle, Error> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return Err(Error::RenderingConfigurationFailed(
                "empty distortion mesh",
            ));
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.meshes.insert(handle, mesh.vertices.len());
        Ok(MeshHandle(handle))
    }

    fn destroy_distortion_mesh(&mut self, mesh: MeshHandle) {
        if self.meshes.remove(&mesh.0).is_some() {
            self.log(TeardownEvent::DistortionMeshDestroyed);
        }
    }

    fn draw_distortion(
        &mut self,
        _mesh: MeshHandle,
        _source: TextureHandle,
        _uv_scale_offset: [[f32; 2]; 2],
        _timewarp: &[[f32; 16]; 2],
    ) {
        self.distortion_draws += 1;
    }

    fn present(&mut self, _vsync: bool) {
        self.presents += 1;
    }
}
