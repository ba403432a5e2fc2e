use bitflags::bitflags;

bitflags! {
    /// HMD behavior flags negotiated when the session opens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HmdCaps: u32 {
        /// Low persistence display mode.
        const LOW_PERSISTENCE    = 1 << 0;
        /// Runtime adjusts prediction based on internally measured latency.
        const DYNAMIC_PREDICTION = 1 << 1;
        /// Disable vsync on presentation.
        const NO_VSYNC           = 1 << 2;
        /// The HMD is driven as an extended desktop display.
        const EXTEND_DESKTOP     = 1 << 3;
    }
}

bitflags! {
    /// Tracking capabilities requested from the headset runtime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TrackingCaps: u32 {
        /// Head orientation tracking.
        const ORIENTATION        = 1 << 0;
        /// Magnetometer-based yaw drift correction.
        const MAG_YAW_CORRECTION = 1 << 1;
        /// Head position tracking.
        const POSITION           = 1 << 2;
    }
}

impl TrackingCaps {
    /// Everything a full tracking setup asks for.
    pub fn full() -> TrackingCaps {
        TrackingCaps::ORIENTATION | TrackingCaps::MAG_YAW_CORRECTION | TrackingCaps::POSITION
    }
}
