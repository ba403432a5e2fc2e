use log::{info, warn};

use crate::caps::{HmdCaps, TrackingCaps};
use crate::device::{FrameTiming, HmdDevicePtr};
use crate::distortion::DistortionMeshData;
use crate::error::Error;
use crate::eye::Eye;
use crate::eye_parameters::EyeParameters;
use crate::info::HmdInfo;
use crate::layer::Layer;
use crate::pose::{FramePoses, Pose};
use crate::registry::ServiceRegistry;
use crate::target::{TargetSize, Viewport};

/// An open device session: the exclusive owner of one headset's lifecycle.
///
/// Opened exactly once before any rendering call; closing consumes the
/// session, so use-after-close does not compile. The capability snapshot is
/// taken at open and never changes.
pub struct Session {
    device: HmdDevicePtr,
    info: HmdInfo,
}

impl Session {
    /// Detect a headset through the registry and open a session on it.
    ///
    /// Fails with [`Error::DeviceNotFound`] when no runtime has a device.
    /// When the device is present but its display is disabled, the session
    /// still opens and a warning is surfaced to the user; rendering proceeds
    /// in degraded mode.
    pub fn open(registry: &mut ServiceRegistry) -> Result<Session, Error> {
        let device = registry.detect_device()?;
        let info = device.borrow().info();
        if !info.display_enabled {
            warn!("{}", Error::DisplayNotEnabled);
        }
        device
            .borrow_mut()
            .set_enabled_caps(HmdCaps::LOW_PERSISTENCE | HmdCaps::DYNAMIC_PREDICTION);
        info!(
            "opened HMD session: \"{}\", panel {}x{}",
            info.product_name, info.resolution.0, info.resolution.1
        );
        Ok(Session { device, info })
    }

    /// Start head tracking with the given capabilities.
    pub fn configure_tracking(&mut self, caps: TrackingCaps) -> Result<(), Error> {
        self.device.borrow_mut().configure_tracking(caps)
    }

    /// Capability snapshot taken when the session opened.
    pub fn info(&self) -> &HmdInfo {
        &self.info
    }

    /// Render descriptor for one eye.
    pub fn eye_parameters(&self, eye: Eye) -> &EyeParameters {
        self.info.eye(eye)
    }

    pub fn device_id(&self) -> u64 {
        self.device.borrow().device_id()
    }

    /// Signal start-of-frame to the device.
    pub fn begin_frame(&mut self) -> Result<FrameTiming, Error> {
        self.device.borrow_mut().begin_frame()
    }

    /// Blocking query of the predicted pose pair for a begun frame.
    pub fn predicted_eye_poses(&mut self, frame_index: u64) -> FramePoses {
        self.device.borrow_mut().predicted_eye_poses(frame_index)
    }

    /// Hand the rendered layer back to the runtime for distortion and
    /// presentation.
    pub fn submit_frame(&mut self, layer: &Layer, poses: &FramePoses) -> Result<(), Error> {
        self.device.borrow_mut().submit_frame(layer, poses)
    }

    /// End the frame's timing bracket without submitting (application-side
    /// distortion presents on its own).
    pub fn end_frame_timing(&mut self) {
        self.device.borrow_mut().end_frame_timing()
    }

    /// Opaque distortion mesh for one eye, generated by the runtime.
    pub fn distortion_mesh(&self, eye: Eye) -> DistortionMeshData {
        self.device.borrow().distortion_mesh(eye)
    }

    /// UV scale/offset for sampling one eye's viewport out of the layer.
    pub fn uv_scale_offset(
        &self,
        eye: Eye,
        target: TargetSize,
        viewport: &Viewport,
    ) -> [[f32; 2]; 2] {
        self.device.borrow().uv_scale_offset(eye, target, viewport)
    }

    /// Time-warp rotation pair for one eye relative to its rendered pose.
    pub fn timewarp_matrices(&self, eye: Eye, rendered: &Pose) -> [[f32; 16]; 2] {
        self.device.borrow().timewarp_matrices(eye, rendered)
    }

    /// Close the session and release the device. Consumes the session; the
    /// owning registry must be shut down after, never before.
    pub fn close(self) {
        self.device.borrow_mut().close();
        info!("HMD session closed");
    }
}
