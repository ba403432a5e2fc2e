use crate::caps::HmdCaps;
use crate::eye::Eye;
use crate::eye_parameters::EyeParameters;

/// Immutable snapshot of a headset taken when the session opens: identity,
/// capability flags and the per-eye render descriptors. Valid for the whole
/// session lifetime.
#[derive(Debug, Clone)]
pub struct HmdInfo {
    /// Product name reported by the runtime. Empty when the device is present
    /// but its display is not enabled.
    pub product_name: String,

    /// Capability flags supported by this headset.
    pub caps: HmdCaps,

    /// Whether the headset display is actually usable. A device can be
    /// detected with its display disabled; rendering then runs degraded.
    pub display_enabled: bool,

    /// Native panel resolution, both eyes combined.
    pub resolution: (u32, u32),

    /// Configured user eye height in meters; the head position is re-pinned
    /// to this every frame.
    pub eye_height_m: f32,

    pub left_eye: EyeParameters,
    pub right_eye: EyeParameters,
}

impl HmdInfo {
    /// Render descriptor for the given eye.
    pub fn eye(&self, eye: Eye) -> &EyeParameters {
        match eye {
            Eye::Left => &self.left_eye,
            Eye::Right => &self.right_eye,
        }
    }
}
