use crate::device::HmdDevicePtr;
use crate::error::Error;

/// One headset runtime (vendor SDK, compositor bridge, mock...).
///
/// Services are registered with a [`ServiceRegistry`](crate::ServiceRegistry),
/// initialized once, asked for a device, and torn down globally at exit.
pub trait HmdService: Send {
    /// Bring up the runtime's global state. Called once before any other
    /// call.
    fn initialize(&mut self) -> Result<(), Error>;

    /// Detect and open the runtime's headset.
    ///
    /// Fails with [`Error::DeviceNotFound`] when the runtime is healthy but
    /// no device is attached.
    fn detect_device(&mut self) -> Result<HmdDevicePtr, Error>;

    /// Whether this runtime can currently provide devices.
    fn is_available(&self) -> bool;

    /// Tear down the runtime's global state. Must be the last call against
    /// this service; devices it produced are invalid afterwards.
    fn shutdown(&mut self);
}
