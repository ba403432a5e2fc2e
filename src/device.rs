use std::cell::RefCell;
use std::sync::Arc;

#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::caps::{HmdCaps, TrackingCaps};
use crate::distortion::DistortionMeshData;
use crate::error::Error;
use crate::eye::Eye;
use crate::info::HmdInfo;
use crate::layer::Layer;
use crate::pose::{FramePoses, Pose};
use crate::target::{TargetSize, Viewport};

pub type HmdDevicePtr = Arc<RefCell<dyn HmdDevice>>;

/// Timing handed back when a frame begins. The frame index keys every
/// subsequent pose query and submission for that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct FrameTiming {
    pub frame_index: u64,

    /// Seconds until the frame is expected on the panel, as predicted by the
    /// runtime when the frame began.
    pub predicted_display_time_s: f64,
}

/// One detected headset, as exposed by its runtime.
///
/// The base of all HMD runtime implementations; the session object wraps one
/// of these and owns its lifecycle.
pub trait HmdDevice: Send {
    /// Unique device identifier.
    fn device_id(&self) -> u64;

    /// Snapshot of the device's identity, capabilities and per-eye render
    /// descriptors.
    fn info(&self) -> HmdInfo;

    /// Select which HMD behavior flags are active.
    fn set_enabled_caps(&mut self, caps: HmdCaps);

    /// Start head tracking with the given capabilities.
    fn configure_tracking(&mut self, caps: TrackingCaps) -> Result<(), Error>;

    /// Signal start-of-frame. At most one frame may be in flight; the
    /// returned timing carries the index for this frame's pose queries.
    fn begin_frame(&mut self) -> Result<FrameTiming, Error>;

    /// Predicted pose pair for the given begun frame.
    ///
    /// Blocks until the runtime's prediction for the frame's display time is
    /// available; there is no cancellation. Must complete before any eye is
    /// rendered.
    fn predicted_eye_poses(&mut self, frame_index: u64) -> FramePoses;

    /// Hand the rendered layer and the poses it was rendered with back to the
    /// runtime for distortion and presentation. Ends the frame.
    fn submit_frame(&mut self, layer: &Layer, poses: &FramePoses) -> Result<(), Error>;

    /// End the frame's timing bracket without submitting a layer. Used by the
    /// application-side distortion path, which presents on its own.
    fn end_frame_timing(&mut self);

    /// Runtime-generated distortion mesh for one eye. Opaque to the
    /// application; it is uploaded and drawn, never interpreted.
    fn distortion_mesh(&self, eye: Eye) -> DistortionMeshData;

    /// UV scale and offset mapping one eye's tangent space into the layer
    /// texture, for the given target size and eye viewport.
    fn uv_scale_offset(&self, eye: Eye, target: TargetSize, viewport: &Viewport)
        -> [[f32; 2]; 2];

    /// Time-warp rotation pair (start and end of scan-out) for one eye,
    /// relative to the pose the eye was rendered with.
    fn timewarp_matrices(&self, eye: Eye, rendered: &Pose) -> [[f32; 16]; 2];

    /// Release the device. No other call is valid afterwards.
    fn close(&mut self);
}

impl PartialEq for dyn HmdDevice {
    fn eq(&self, other: &dyn HmdDevice) -> bool {
        self.device_id() == other.device_id()
    }
}
