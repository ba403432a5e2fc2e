use super::device::{MockHmdDevice, MockHmdDevicePtr};
use super::{new_teardown_log, TeardownEvent, TeardownLog};
use crate::device::HmdDevicePtr;
use crate::error::Error;
use crate::service::HmdService;

/// Mock headset runtime: hands out one [`MockHmdDevice`] on demand.
pub struct MockHmdService {
    device: Option<MockHmdDevicePtr>,
    teardown: TeardownLog,
    device_present: bool,
    shut_down: bool,
}

impl MockHmdService {
    pub fn new() -> MockHmdService {
        MockHmdService::with_teardown_log(new_teardown_log())
    }

    /// Share a teardown log with other mock collaborators so release
    /// ordering can be asserted across them.
    pub fn with_teardown_log(teardown: TeardownLog) -> MockHmdService {
        MockHmdService {
            device: None,
            teardown,
            device_present: true,
            shut_down: false,
        }
    }

    /// A runtime with no headset attached: detection fails with
    /// [`Error::DeviceNotFound`].
    pub fn without_device() -> MockHmdService {
        MockHmdService {
            device_present: false,
            ..MockHmdService::new()
        }
    }

    /// The device handed out so far, for test inspection.
    pub fn device(&self) -> Option<&MockHmdDevicePtr> {
        self.device.as_ref()
    }

    pub fn teardown_log(&self) -> TeardownLog {
        self.teardown.clone()
    }
}

impl Default for MockHmdService {
    fn default() -> MockHmdService {
        MockHmdService::new()
    }
}

// The device handle is `Arc<RefCell<..>>`, which is not `Send` on its own; the
// service is only ever touched from one thread. Mirrors the teacher runtime's
// `unsafe impl Send for MockVRService`.
unsafe impl Send for MockHmdService {}

impl HmdService for MockHmdService {
    fn initialize(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn detect_device(&mut self) -> Result<HmdDevicePtr, Error> {
        if !self.device_present {
            return Err(Error::DeviceNotFound);
        }
        let teardown = self.teardown.clone();
        let device = self
            .device
            .get_or_insert_with(|| MockHmdDevice::new(teardown));
        Ok(device.clone() as HmdDevicePtr)
    }

    fn is_available(&self) -> bool {
        !self.shut_down
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
        self.teardown
            .lock()
            .unwrap()
            .push(TeardownEvent::ServiceShutdown);
    }
}
