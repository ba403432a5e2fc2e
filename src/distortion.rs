//! The two ways a rendered layer reaches the panel.
//!
//! The headset runtime can perform distortion and presentation itself
//! (service-side), or the application can draw the distortion pass with
//! runtime-supplied mesh data and present on its own (application-side).
//! The choice is made once at startup; both paths sit behind the same
//! submit interface. Mesh generation and time-warp matrix derivation stay
//! inside the runtime either way; the application only uploads and draws
//! what it is handed.

#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::eye::Eye;
use crate::layer::Layer;
use crate::pose::FramePoses;
use crate::render::{MeshHandle, RenderDevice};
use crate::session::Session;

/// Who performs lens distortion and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistortionBackend {
    /// The headset runtime distorts and presents the submitted layer.
    Service,
    /// The application draws the distortion pass and presents. Development
    /// aid; owns GPU resources that must be released before session close.
    Application,
}

/// One vertex of a runtime-generated distortion mesh. Tangent-space texture
/// coordinates come per color channel to correct chromatic aberration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct DistortionVertex {
    pub screen_pos: [f32; 2],
    pub timewarp_lerp: f32,
    pub vignette: f32,
    pub tan_eye_angles_r: [f32; 2],
    pub tan_eye_angles_g: [f32; 2],
    pub tan_eye_angles_b: [f32; 2],
}

/// A per-eye distortion mesh as handed over by the runtime. Opaque payload:
/// uploaded into device buffers and drawn, never interpreted.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct DistortionMeshData {
    pub vertices: Vec<DistortionVertex>,
    pub indices: Vec<u16>,
}

/// Application-side distortion state: one uploaded mesh per eye.
#[derive(Debug)]
pub struct AppDistortion {
    meshes: [MeshHandle; 2],
}

/// The selected distortion strategy.
#[derive(Debug)]
pub enum DistortionPath {
    Service,
    Application(AppDistortion),
}

impl DistortionPath {
    /// Set up the chosen path. The application-side path fetches both eye
    /// meshes from the runtime and uploads them; a failed upload is a fatal
    /// rendering configuration error.
    pub fn new(
        backend: DistortionBackend,
        session: &Session,
        render: &mut dyn RenderDevice,
    ) -> Result<DistortionPath, Error> {
        match backend {
            DistortionBackend::Service => Ok(DistortionPath::Service),
            DistortionBackend::Application => {
                let left = render.upload_distortion_mesh(&session.distortion_mesh(Eye::Left))?;
                let right = render.upload_distortion_mesh(&session.distortion_mesh(Eye::Right))?;
                Ok(DistortionPath::Application(AppDistortion {
                    meshes: [left, right],
                }))
            }
        }
    }

    /// Finish the frame: route the rendered layer and its poses to the panel.
    pub fn submit(
        &mut self,
        session: &mut Session,
        render: &mut dyn RenderDevice,
        layer: &Layer,
        poses: &FramePoses,
    ) -> Result<(), Error> {
        match self {
            DistortionPath::Service => session.submit_frame(layer, poses),
            DistortionPath::Application(app) => {
                render.set_render_target(None);
                render.clear([0.0, 0.0, 0.0, 0.0]);
                for eye in Eye::BOTH.iter().copied() {
                    let i = eye.index();
                    let uv =
                        session.uv_scale_offset(eye, layer.texture_size, &layer.viewports[i]);
                    let timewarp = session.timewarp_matrices(eye, poses.eye(eye));
                    render.draw_distortion(app.meshes[i], layer.texture, uv, &timewarp);
                }
                render.present(true);
                session.end_frame_timing();
                Ok(())
            }
        }
    }

    /// Release any application-owned distortion resources. Must run before
    /// the session closes.
    pub fn release(self, render: &mut dyn RenderDevice) {
        if let DistortionPath::Application(app) = self {
            for mesh in app.meshes.iter() {
                render.destroy_distortion_mesh(*mesh);
            }
        }
    }
}
