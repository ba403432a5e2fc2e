use std::error;
use std::fmt;

/// Error produced while negotiating with the headset runtime or the graphics
/// device.
///
/// Initialization failures (`DeviceNotFound`, `WindowCreationFailed`,
/// `RenderingConfigurationFailed`) are fatal to the application. Frame-level
/// failures (`FrameInterrupted`) are fatal to the current frame only: the
/// frame loop resets to idle and hands control back to the caller. Nothing is
/// retried.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// No HMD was detected by any registered runtime.
    DeviceNotFound,

    /// An HMD is attached but its display is not enabled. Surfaced as a
    /// warning by `Session::open`; the session continues in degraded mode.
    DisplayNotEnabled,

    /// The output window or backing surface could not be created.
    WindowCreationFailed,

    /// The graphics device rejected the requested rendering configuration
    /// (render target allocation, distortion mesh upload, ...).
    RenderingConfigurationFailed(&'static str),

    /// The device went away mid-frame. The frame in flight is abandoned.
    FrameInterrupted(&'static str),

    /// A frame call arrived out of order: a submit without a begin, or a
    /// second begin before the prior frame was submitted.
    FrameOutOfOrder(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DeviceNotFound => f.write_str("no HMD detected"),
            Error::DisplayNotEnabled => f.write_str("HMD detected, display not enabled"),
            Error::WindowCreationFailed => f.write_str("window creation failed"),
            Error::RenderingConfigurationFailed(detail) => {
                write!(f, "rendering configuration failed: {}", detail)
            }
            Error::FrameInterrupted(detail) => write!(f, "frame interrupted: {}", detail),
            Error::FrameOutOfOrder(detail) => write!(f, "frame call out of order: {}", detail),
        }
    }
}

impl error::Error for Error {}
