//! Headset runtime implementations.
//!
//! Real runtimes live behind cargo features in downstream crates; this crate
//! ships the mock runtime used by tests, demos and development without a
//! headset attached.

#[cfg(feature = "mock")]
pub mod mock;
