use log::{error, info};

use crate::device::HmdDevicePtr;
use crate::error::Error;
use crate::service::HmdService;

/// Single entry point for all registered headset runtimes.
///
/// Owns global runtime state: services are initialized lazily before the
/// first detection and torn down, in reverse registration order, when the
/// registry is shut down. The shutdown is the last valid operation against
/// any registered runtime.
pub struct ServiceRegistry {
    services: Vec<Box<dyn HmdService>>,
    initialized: bool,
}

impl ServiceRegistry {
    pub fn new() -> ServiceRegistry {
        ServiceRegistry {
            services: Vec::new(),
            initialized: false,
        }
    }

    /// Register a headset runtime.
    pub fn register(&mut self, service: Box<dyn HmdService>) {
        self.services.push(service);
    }

    /// Register the mock runtime. Useful for tests and for running demos
    /// with no headset attached.
    #[cfg(feature = "mock")]
    pub fn register_mock(&mut self) {
        self.register(Box::new(crate::api::mock::MockHmdService::new()));
    }

    /// Initialize every registered service. Idempotent; failures are logged
    /// and the failing service is skipped at detection time.
    pub fn initialize_services(&mut self) {
        if self.initialized {
            return;
        }
        for service in &mut self.services {
            if let Err(err) = service.initialize() {
                error!("error initializing HMD service: {}", err);
            }
        }
        self.initialized = true;
    }

    /// Detect the first available headset across all registered runtimes.
    pub fn detect_device(&mut self) -> Result<HmdDevicePtr, Error> {
        self.initialize_services();
        for service in &mut self.services {
            if !service.is_available() {
                continue;
            }
            match service.detect_device() {
                Ok(device) => return Ok(device),
                Err(Error::DeviceNotFound) => continue,
                Err(err) => {
                    error!("HMD service failed during detection: {}", err);
                    continue;
                }
            }
        }
        Err(Error::DeviceNotFound)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tear down every runtime, most recently registered first. Consumes the
    /// registry: no call against any registered service is valid afterwards.
    pub fn shutdown(mut self) {
        for service in self.services.iter_mut().rev() {
            service.shutdown();
        }
        info!("HMD services shut down");
    }
}

impl Default for ServiceRegistry {
    fn default() -> ServiceRegistry {
        ServiceRegistry::new()
    }
}
