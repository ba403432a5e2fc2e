//! Keyboard/mouse state mapped onto body yaw and head translation.
//!
//! The windowing layer is a collaborator, not part of this crate: whoever
//! pumps the platform event loop fills in an [`InputFrame`] snapshot per
//! frame and the frame loop applies it here.

use crate::info::HmdInfo;

/// Distance walked per frame while a movement key is held, in meters.
pub const MOVE_STEP_M: f32 = 0.05;

/// One frame's worth of user input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    /// W held.
    pub forward: bool,
    /// S held.
    pub backward: bool,
    /// A held.
    pub strafe_left: bool,
    /// D held.
    pub strafe_right: bool,
    /// Mouse-driven body yaw change this frame, in radians.
    pub yaw_delta: f32,
    /// F pressed this frame: toggle freeze of scene re-rendering.
    pub toggle_freeze: bool,
}

/// User-controlled body state the eye views are built from. The application
/// mutates this from input; the HMD pose is layered on top per eye.
#[derive(Debug, Clone, Copy)]
pub struct BodyControls {
    /// Body yaw around the vertical axis, radians.
    pub yaw: f32,
    /// Head position in world space, meters.
    pub position: [f32; 3],
}

impl BodyControls {
    /// Starting state: facing back into the room, standing at the
    /// device-configured eye height.
    pub fn new(info: &HmdInfo) -> BodyControls {
        BodyControls {
            yaw: std::f32::consts::PI,
            position: [0.0, info.eye_height_m, -5.0],
        }
    }

    /// Apply one frame of input. Movement is body-relative (yaw only, no
    /// pitch); height is re-pinned to the device-configured eye height so
    /// walking never changes it.
    pub fn apply(&mut self, input: &InputFrame, eye_height_m: f32) {
        self.yaw += input.yaw_delta;

        let (sin, cos) = self.yaw.sin_cos();
        // rotation_y(yaw) applied to (0,0,-1) and (1,0,0)
        let forward = [-sin, 0.0, -cos];
        let right = [cos, 0.0, -sin];

        let mut step = |dir: [f32; 3], sign: f32| {
            self.position[0] += dir[0] * MOVE_STEP_M * sign;
            self.position[2] += dir[2] * MOVE_STEP_M * sign;
        };
        if input.forward {
            step(forward, 1.0);
        }
        if input.backward {
            step(forward, -1.0);
        }
        if input.strafe_right {
            step(right, 1.0);
        }
        if input.strafe_left {
            step(right, -1.0);
        }

        self.position[1] = eye_height_m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::HmdCaps;
    use crate::eye_parameters::EyeParameters;

    fn info() -> HmdInfo {
        HmdInfo {
            product_name: "test".into(),
            caps: HmdCaps::empty(),
            display_enabled: true,
            resolution: (1920, 1080),
            eye_height_m: 1.6,
            left_eye: EyeParameters::default(),
            right_eye: EyeParameters::default(),
        }
    }

    #[test]
    fn forward_walks_along_body_yaw() {
        let mut controls = BodyControls::new(&info());
        // initial yaw is PI: facing +z
        let start_z = controls.position[2];
        controls.apply(
            &InputFrame {
                forward: true,
                ..Default::default()
            },
            1.6,
        );
        assert!(controls.position[2] > start_z);
        assert!(controls.position[0].abs() < 1e-5);
    }

    #[test]
    fn yaw_delta_rotates_movement_frame() {
        let mut controls = BodyControls::new(&info());
        controls.yaw = 0.0;
        controls.apply(
            &InputFrame {
                strafe_right: true,
                ..Default::default()
            },
            1.6,
        );
        // at yaw 0, right is +x
        assert!(controls.position[0] > 0.0);
        assert!(controls.position[2].abs() < 1e-5);
    }

    #[test]
    fn height_is_pinned_to_eye_height() {
        let mut controls = BodyControls::new(&info());
        controls.position[1] = 0.0;
        controls.apply(&InputFrame::default(), 1.72);
        assert_eq!(controls.position[1], 1.72);
    }
}
