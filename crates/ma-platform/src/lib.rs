//! # ma-platform
//!
//! Platform adapters implementing the `ma-core` device ports.
//!
//! The [`simulated`] adapters model a managed handset in memory. They back
//! the bench CLI and the end-to-end tests, and enforce the same owner/admin
//! preconditions a real device-policy service does.

pub mod simulated;

pub use simulated::{
    DeviceModel, SimulatedDevice, SimulatedDeviceSettings, SimulatedLauncher,
    SimulatedPolicyBackend, SimulatedTelephony,
};
