#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

use crate::eye::Eye;

/// Predicted state of one eye at the frame's expected display time.
///
/// Read-only input to the frame loop; a fresh pair is queried every frame and
/// nothing is persisted across frames on this side of the API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct Pose {
    /// Orientation as a unit quaternion `[x, y, z, w]`.
    /// `None` if the runtime cannot provide orientation.
    pub orientation: Option<[f32; 4]>,

    /// Position in meters relative to the tracking origin.
    /// `None` if the runtime cannot provide position.
    pub position: Option<[f32; 3]>,
}

/// The pose pair returned by the runtime for one begun frame.
///
/// `frame_index` ties the poses to the frame they were predicted for; the same
/// pair must be handed back on submit so the runtime can time-warp against
/// the orientation the scene was actually rendered with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct FramePoses {
    pub frame_index: u64,
    pub left: Pose,
    pub right: Pose,
}

impl FramePoses {
    /// Pose for the given eye.
    pub fn eye(&self, eye: Eye) -> &Pose {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }
}
