#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

/// Field of view of one eye, as four half-angles in degrees measured from the
/// eye's view axis. HMD optics are asymmetric, so the four values generally
/// differ.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct FieldOfView {
    pub up_degrees: f64,
    pub right_degrees: f64,
    pub down_degrees: f64,
    pub left_degrees: f64,
}

impl FieldOfView {
    /// Symmetric field of view with the same half-angle on all four sides.
    pub fn symmetric(half_angle_degrees: f64) -> FieldOfView {
        FieldOfView {
            up_degrees: half_angle_degrees,
            right_degrees: half_angle_degrees,
            down_degrees: half_angle_degrees,
            left_degrees: half_angle_degrees,
        }
    }

    /// Tangents of the four half-angles as `[up, down, left, right]`.
    ///
    /// Projection math works on the tangent-space port, not on angles.
    pub fn tangents(&self) -> [f32; 4] {
        [
            self.up_degrees.to_radians().tan() as f32,
            self.down_degrees.to_radians().tan() as f32,
            self.left_degrees.to_radians().tan() as f32,
            self.right_degrees.to_radians().tan() as f32,
        ]
    }
}

impl Default for FieldOfView {
    fn default() -> FieldOfView {
        FieldOfView {
            up_degrees: 0.0,
            right_degrees: 0.0,
            down_degrees: 0.0,
            left_degrees: 0.0,
        }
    }
}
