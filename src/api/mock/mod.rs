//! Mock headset runtime and graphics device.
//!
//! Deterministic stand-ins for the external collaborators: the device
//! animates a plausible pose stream, the render device clamps allocations to
//! a configurable hardware limit, and both append to a shared teardown log so
//! release ordering can be asserted by tests.

use std::sync::{Arc, Mutex};

mod device;
mod render;
mod service;

pub use self::device::{MockHmdDevice, MockHmdDevicePtr};
pub use self::render::MockRenderDevice;
pub use self::service::MockHmdService;

/// One observed teardown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownEvent {
    RenderTargetDestroyed,
    DistortionMeshDestroyed,
    DeviceClosed,
    ServiceShutdown,
}

/// Shared ordered record of teardown steps across the mock collaborators.
pub type TeardownLog = Arc<Mutex<Vec<TeardownEvent>>>;

pub fn new_teardown_log() -> TeardownLog {
    Arc::new(Mutex::new(Vec::new()))
}
