use std::cell::RefCell;
use std::sync::Arc;

use super::{TeardownEvent, TeardownLog};
use crate::caps::{HmdCaps, TrackingCaps};
use crate::device::{FrameTiming, HmdDevice};
use crate::distortion::{DistortionMeshData, DistortionVertex};
use crate::error::Error;
use crate::eye::Eye;
use crate::eye_parameters::EyeParameters;
use crate::field_of_view::FieldOfView;
use crate::info::HmdInfo;
use crate::layer::Layer;
use crate::pose::{FramePoses, Pose};
use crate::target::{TargetSize, Viewport};
use crate::utils;

pub type MockHmdDevicePtr = Arc<RefCell<MockHmdDevice>>;

/// Half the simulated inter-pupillary distance, meters.
const HALF_IPD: f32 = 0.032;

/// A virtual headset with a deterministic pose animation.
///
/// Simulates a DK2-class device: 1920x1080 panel, ~1182x1461 recommended
/// per-eye textures, asymmetric per-eye optics. Every interaction is recorded
/// so tests can assert on frame ordering, submissions and teardown.
pub struct MockHmdDevice {
    device_id: u64,
    teardown: TeardownLog,
    display_enabled: bool,
    tracking: Option<TrackingCaps>,
    enabled_caps: HmdCaps,
    next_frame_index: u64,
    in_flight: Option<u64>,
    pose_queries: u64,
    frames_submitted: u64,
    timing_brackets_ended: u64,
    last_submitted: Option<FramePoses>,
    last_layer: Option<Layer>,
    fail_next_begin: bool,
    fail_next_submit: bool,
    closed: bool,
}

impl MockHmdDevice {
    pub fn new(teardown: TeardownLog) -> MockHmdDevicePtr {
        Arc::new(RefCell::new(MockHmdDevice {
            device_id: utils::new_device_id(),
            teardown,
            display_enabled: true,
            tracking: None,
            enabled_caps: HmdCaps::empty(),
            next_frame_index: 0,
            in_flight: None,
            pose_queries: 0,
            frames_submitted: 0,
            timing_brackets_ended: 0,
            last_submitted: None,
            last_layer: None,
            fail_next_begin: false,
            fail_next_submit: false,
            closed: false,
        }))
    }

    /// Pretend the device is attached with its display disabled.
    pub fn set_display_enabled(&mut self, enabled: bool) {
        self.display_enabled = enabled;
    }

    /// Make the next `begin_frame` fail as if the device went away.
    pub fn fail_next_begin(&mut self) {
        self.fail_next_begin = true;
    }

    /// Make the next `submit_frame` fail as if the device went away.
    pub fn fail_next_submit(&mut self) {
        self.fail_next_submit = true;
    }

    pub fn tracking(&self) -> Option<TrackingCaps> {
        self.tracking
    }

    pub fn enabled_caps(&self) -> HmdCaps {
        self.enabled_caps
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn pose_queries(&self) -> u64 {
        self.pose_queries
    }

    pub fn timing_brackets_ended(&self) -> u64 {
        self.timing_brackets_ended
    }

    pub fn last_submitted(&self) -> Option<FramePoses> {
        self.last_submitted
    }

    pub fn last_layer(&self) -> Option<Layer> {
        self.last_layer
    }

    pub fn frame_in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn eye_parameters(eye: Eye) -> EyeParameters {
        // Nasal half-angles are narrower than temporal ones; mirror per eye.
        let field_of_view = match eye {
            Eye::Left => FieldOfView {
                up_degrees: 55.8,
                right_degrees: 51.3,
                down_degrees: 55.7,
                left_degrees: 54.4,
            },
            Eye::Right => FieldOfView {
                up_degrees: 55.8,
                right_degrees: 54.4,
                down_degrees: 55.7,
                left_degrees: 51.3,
            },
        };
        let offset = match eye {
            Eye::Left => [-HALF_IPD, 0.0, 0.0],
            Eye::Right => [HALF_IPD, 0.0, 0.0],
        };
        EyeParameters {
            offset,
            render_width: 1182,
            render_height: 1461,
            field_of_view,
        }
    }

    fn animated_pose(&self, eye: Eye, frame_index: u64) -> Pose {
        // Slow head sway plus a gentle yaw, keyed off the frame index so the
        // stream is deterministic and strictly advancing.
        let t = frame_index as f32 * 0.01;
        let half_yaw = (t * 0.5).sin() * 0.05;
        let sway = [t.sin() * 0.01, 0.0, t.cos() * 0.005];
        let eye_offset = match eye {
            Eye::Left => -HALF_IPD,
            Eye::Right => HALF_IPD,
        };
        Pose {
            orientation: Some([0.0, half_yaw.sin(), 0.0, half_yaw.cos()]),
            position: Some([sway[0] + eye_offset, sway[1], sway[2]]),
        }
    }
}

impl HmdDevice for MockHmdDevice {
    fn device_id(&self) -> u64 {
        self.device_id
    }

    fn info(&self) -> HmdInfo {
        HmdInfo {
            product_name: if self.display_enabled {
                "Mock HMD DK2".into()
            } else {
                String::new()
            },
            caps: HmdCaps::LOW_PERSISTENCE | HmdCaps::DYNAMIC_PREDICTION | HmdCaps::EXTEND_DESKTOP,
            display_enabled: self.display_enabled,
            resolution: (1920, 1080),
            eye_height_m: 1.6,
            left_eye: MockHmdDevice::eye_parameters(Eye::Left),
            right_eye: MockHmdDevice::eye_parameters(Eye::Right),
        }
    }

    fn set_enabled_caps(&mut self, caps: HmdCaps) {
        self.enabled_caps = caps;
    }

    fn configure_tracking(&mut self, caps: TrackingCaps) -> Result<(), Error> {
        self.tracking = Some(caps);
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<FrameTiming, Error> {
        if self.closed {
            return Err(Error::FrameInterrupted("device closed"));
        }
        if self.fail_next_begin {
            self.fail_next_begin = false;
            return Err(Error::FrameInterrupted("simulated device loss at begin"));
        }
        if self.in_flight.is_some() {
            return Err(Error::FrameOutOfOrder("frame already in flight"));
        }
        self.next_frame_index += 1;
        self.in_flight = Some(self.next_frame_index);
        Ok(FrameTiming {
            frame_index: self.next_frame_index,
            predicted_display_time_s: 0.013,
        })
    }

    fn predicted_eye_poses(&mut self, frame_index: u64) -> FramePoses {
        self.pose_queries += 1;
        FramePoses {
            frame_index,
            left: self.animated_pose(Eye::Left, frame_index),
            right: self.animated_pose(Eye::Right, frame_index),
        }
    }

    fn submit_frame(&mut self, layer: &Layer, poses: &FramePoses) -> Result<(), Error> {
        if self.fail_next_submit {
            self.fail_next_submit = false;
            self.in_flight = None;
            return Err(Error::FrameInterrupted("simulated device loss at submit"));
        }
        if self.in_flight != Some(poses.frame_index) {
            return Err(Error::FrameOutOfOrder("submitted frame was not begun"));
        }
        self.in_flight = None;
        self.frames_submitted += 1;
        self.last_submitted = Some(*poses);
        self.last_layer = Some(*layer);
        Ok(())
    }

    fn end_frame_timing(&mut self) {
        self.in_flight = None;
        self.timing_brackets_ended += 1;
    }

    fn distortion_mesh(&self, eye: Eye) -> DistortionMeshData {
        // A quad over the eye's half of the output. Stands in for the real
        // runtime-generated mesh; the application treats it as opaque.
        let x0 = match eye {
            Eye::Left => -1.0,
            Eye::Right => 0.0,
        };
        let corners = [
            [x0, -1.0],
            [x0, 1.0],
            [x0 + 1.0, 1.0],
            [x0 + 1.0, -1.0],
        ];
        let vertices = corners
            .iter()
            .map(|&screen_pos| {
                let uv = [
                    screen_pos[0] * 0.5 + 0.5,
                    screen_pos[1] * 0.5 + 0.5,
                ];
                DistortionVertex {
                    screen_pos,
                    timewarp_lerp: (screen_pos[1] + 1.0) * 0.5,
                    vignette: 1.0,
                    tan_eye_angles_r: uv,
                    tan_eye_angles_g: uv,
                    tan_eye_angles_b: uv,
                }
            })
            .collect();
        DistortionMeshData {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    fn uv_scale_offset(
        &self,
        _eye: Eye,
        target: TargetSize,
        viewport: &Viewport,
    ) -> [[f32; 2]; 2] {
        let scale = [
            viewport.width as f32 / target.width as f32 * 0.5,
            viewport.height as f32 / target.height as f32 * 0.5,
        ];
        let offset = [
            (viewport.x as f32 + viewport.width as f32 * 0.5) / target.width as f32,
            0.5,
        ];
        [scale, offset]
    }

    fn timewarp_matrices(&self, _eye: Eye, rendered: &Pose) -> [[f32; 16]; 2] {
        // No simulated scan-out rotation: both ends of the warp are the
        // rendered orientation.
        let orientation = rendered.orientation.unwrap_or([0.0, 0.0, 0.0, 1.0]);
        let m = utils::quaternion_to_matrix(orientation);
        [m, m]
    }

    fn close(&mut self) {
        self.closed = true;
        self.teardown
            .lock()
            .unwrap()
            .push(TeardownEvent::DeviceClosed);
    }
}
