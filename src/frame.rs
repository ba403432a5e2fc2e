//! The per-frame loop: begin, acquire poses, render both eyes, submit.

use crate::distortion::{DistortionBackend, DistortionPath};
use crate::error::Error;
use crate::eye::Eye;
use crate::input::{BodyControls, InputFrame};
use crate::layer::Layer;
use crate::pose::{FramePoses, Pose};
use crate::render::RenderDevice;
use crate::scene::Scene;
use crate::session::Session;
use crate::target::{SharedRenderTarget, Viewport};
use crate::utils;

/// Near clip plane distance, meters.
pub const DEFAULT_NEAR_Z: f32 = 0.01;
/// Far clip plane distance, meters.
pub const DEFAULT_FAR_Z: f32 = 10000.0;

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Where the loop is within the current frame. Frames go
/// `Idle -> Begun -> ScenePrepared -> (submitted) -> Idle`; any other order
/// is rejected.
#[derive(Debug, Clone, Copy)]
enum FrameState {
    Idle,
    Begun { poses: FramePoses },
    ScenePrepared { poses: FramePoses },
}

/// Drives one frame at a time: pose acquisition, per-eye scene rendering into
/// the shared target, and submission through the selected distortion path.
///
/// Single-threaded by design; the only stall is the blocking pose query
/// inside [`begin_frame`](FrameLoop::begin_frame). A begin or submit failure
/// abandons the current frame and resets to idle; nothing is retried.
pub struct FrameLoop {
    target: SharedRenderTarget,
    distortion: DistortionPath,
    controls: BodyControls,
    state: FrameState,
    frozen: bool,
    near_z: f32,
    far_z: f32,
}

impl FrameLoop {
    /// Allocate the shared render target (two-pass sizing) and set up the
    /// distortion path. Runs once after the session opens.
    pub fn new(
        session: &Session,
        render: &mut dyn RenderDevice,
        backend: DistortionBackend,
    ) -> Result<FrameLoop, Error> {
        let info = session.info();
        let target = SharedRenderTarget::allocate(render, &info.left_eye, &info.right_eye)?;
        let distortion = DistortionPath::new(backend, session, render)?;
        Ok(FrameLoop {
            target,
            distortion,
            controls: BodyControls::new(info),
            state: FrameState::Idle,
            frozen: false,
            near_z: DEFAULT_NEAR_Z,
            far_z: DEFAULT_FAR_Z,
        })
    }

    pub fn with_clip_planes(mut self, near_z: f32, far_z: f32) -> FrameLoop {
        self.near_z = near_z;
        self.far_z = far_z;
        self
    }

    pub fn target(&self) -> &SharedRenderTarget {
        &self.target
    }

    pub fn controls(&self) -> &BodyControls {
        &self.controls
    }

    /// Whether scene re-rendering is currently suspended.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Suspend or resume scene re-rendering. While frozen the shared target
    /// keeps its last rendered pixels but poses are still queried and
    /// submitted every frame, which makes the runtime's time-warp correction
    /// visible. Debugging aid, not a production feature.
    pub fn toggle_freeze(&mut self) {
        self.frozen = !self.frozen;
    }

    /// Signal start-of-frame and block on the predicted pose pair for it.
    pub fn begin_frame(&mut self, session: &mut Session) -> Result<(), Error> {
        match self.state {
            FrameState::Idle => {}
            _ => {
                return Err(Error::FrameOutOfOrder(
                    "begin_frame while a frame is in flight",
                ))
            }
        }
        let timing = session.begin_frame()?;
        // Blocks until the runtime has a prediction for this frame's display
        // time; rendering must not start before this returns.
        let poses = session.predicted_eye_poses(timing.frame_index);
        self.state = FrameState::Begun { poses };
        Ok(())
    }

    /// Render the scene into both eye viewports of the shared target.
    /// Skipped (but still advancing the frame) while frozen.
    pub fn prepare_scene(
        &mut self,
        session: &Session,
        render: &mut dyn RenderDevice,
        scene: &Scene,
    ) -> Result<(), Error> {
        let poses = match self.state {
            FrameState::Begun { poses } => poses,
            _ => {
                return Err(Error::FrameOutOfOrder(
                    "prepare_scene without a begun frame",
                ))
            }
        };

        if !self.frozen {
            render.set_render_target(Some(self.target.texture));
            render.set_viewport(Viewport::of_target(self.target.size));
            render.clear(CLEAR_COLOR);

            for eye in Eye::BOTH.iter().copied() {
                let view = eye_view_matrix(&self.controls, poses.eye(eye));
                let projection = utils::perspective_from_fov(
                    &session.eye_parameters(eye).field_of_view,
                    self.near_z,
                    self.far_z,
                );
                render.set_viewport(self.target.viewports[eye.index()]);
                render.draw_scene(scene, &view, &projection);
            }
        }

        self.state = FrameState::ScenePrepared { poses };
        Ok(())
    }

    /// Hand the shared target and the poses it was rendered with to the
    /// distortion path. Always returns the loop to idle: a submit failure is
    /// fatal to this frame only and control goes back to the caller.
    pub fn submit(
        &mut self,
        session: &mut Session,
        render: &mut dyn RenderDevice,
    ) -> Result<(), Error> {
        let poses = match self.state {
            FrameState::ScenePrepared { poses } => poses,
            _ => {
                return Err(Error::FrameOutOfOrder("submit without a prepared frame"));
            }
        };

        let layer = Layer::from_target(&self.target);
        let result = self.distortion.submit(session, render, &layer, &poses);
        self.state = FrameState::Idle;
        result
    }

    /// One full frame: apply input, begin, render, submit.
    pub fn run_frame(
        &mut self,
        session: &mut Session,
        render: &mut dyn RenderDevice,
        scene: &Scene,
        input: &InputFrame,
    ) -> Result<(), Error> {
        if input.toggle_freeze {
            self.toggle_freeze();
        }
        self.controls.apply(input, session.info().eye_height_m);

        self.begin_frame(session)?;
        self.prepare_scene(session, render, scene)?;
        self.submit(session, render)
    }

    /// Release the shared target and any distortion resources. Must run
    /// before the session closes.
    pub fn release(self, render: &mut dyn RenderDevice) {
        self.distortion.release(render);
        self.target.release(render);
    }
}

/// View matrix for one eye: the user-controlled body yaw and head position
/// with the predicted eye pose layered on top. Rotates the tracked
/// orientation into the body frame, derives look-at vectors from it, and
/// offsets the eye position by the body-rotated tracked position.
fn eye_view_matrix(controls: &BodyControls, pose: &Pose) -> [f32; 16] {
    let body = utils::rotation_y(controls.yaw);
    let orientation = pose.orientation.unwrap_or([0.0, 0.0, 0.0, 1.0]);
    let tracked = utils::quaternion_to_matrix(orientation);
    let head = utils::multiply(&body, &tracked);

    let up = utils::transform_direction(&head, [0.0, 1.0, 0.0]);
    let forward = utils::transform_direction(&head, [0.0, 0.0, -1.0]);

    let tracked_pos = pose.position.unwrap_or([0.0, 0.0, 0.0]);
    let eye_pos = utils::add3(
        controls.position,
        utils::transform_direction(&body, tracked_pos),
    );

    utils::look_at_rh(eye_pos, utils::add3(eye_pos, forward), up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_with_identity_pose_matches_plain_look_at() {
        let controls = BodyControls {
            yaw: 0.0,
            position: [0.0, 1.6, 0.0],
        };
        let pose = Pose::default();
        let view = eye_view_matrix(&controls, &pose);
        let expected = utils::look_at_rh([0.0, 1.6, 0.0], [0.0, 1.6, -1.0], [0.0, 1.0, 0.0]);
        for (a, b) in view.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn tracked_position_is_rotated_into_body_frame() {
        let controls = BodyControls {
            yaw: std::f32::consts::PI,
            position: [0.0, 1.6, 0.0],
        };
        // Tracked head slides 0.1 m to the user's right; with the body turned
        // around, that is world -x.
        let pose = Pose {
            orientation: None,
            position: Some([0.1, 0.0, 0.0]),
        };
        let view = eye_view_matrix(&controls, &pose);
        // Recover the eye position from the view matrix: eye = -R^T * t.
        let eye_x = -(view[0] * view[12] + view[1] * view[13] + view[2] * view[14]);
        assert!((eye_x + 0.1).abs() < 1e-4);
    }
}
