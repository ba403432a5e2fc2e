//! Stereo HMD frame submission.
//!
//! This crate owns the renderer-side contract for driving a head-mounted
//! display: a device session with an explicit lifecycle, a shared side-by-side
//! eye render target sized by the two-pass policy (request the recommended
//! size, adapt to what the hardware actually allocated), and a per-frame
//! begin / render / submit loop. The hard parts of VR (sensor fusion, lens
//! distortion meshes, time-warp derivation) live in the headset runtime
//! behind the [`HmdService`] and [`HmdDevice`] traits; graphics output goes
//! through the [`RenderDevice`] trait. A mock runtime under `api::mock`
//! (cargo feature `mock`, on by default) runs the whole pipeline headless.

pub mod api;
pub mod caps;
pub mod device;
pub mod distortion;
pub mod error;
pub mod eye;
pub mod eye_parameters;
pub mod field_of_view;
pub mod frame;
pub mod info;
pub mod input;
pub mod layer;
pub mod pose;
pub mod registry;
pub mod render;
pub mod scene;
pub mod service;
pub mod session;
pub mod target;
pub mod utils;

pub use crate::caps::{HmdCaps, TrackingCaps};
pub use crate::device::{FrameTiming, HmdDevice, HmdDevicePtr};
pub use crate::distortion::{DistortionBackend, DistortionMeshData, DistortionPath, DistortionVertex};
pub use crate::error::Error;
pub use crate::eye::Eye;
pub use crate::eye_parameters::EyeParameters;
pub use crate::field_of_view::FieldOfView;
pub use crate::frame::{FrameLoop, DEFAULT_FAR_Z, DEFAULT_NEAR_Z};
pub use crate::info::HmdInfo;
pub use crate::input::{BodyControls, InputFrame};
pub use crate::layer::Layer;
pub use crate::pose::{FramePoses, Pose};
pub use crate::registry::ServiceRegistry;
pub use crate::render::{MeshHandle, RenderDevice, TextureHandle};
pub use crate::scene::{Mesh, Scene};
pub use crate::service::HmdService;
pub use crate::session::Session;
pub use crate::target::{SharedRenderTarget, TargetSize, Viewport};
