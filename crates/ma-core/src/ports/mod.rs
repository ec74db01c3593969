//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure or
//! platform implementations, keeping the enforcement logic independent of the
//! host operating system.

pub mod device_settings;
pub mod launcher;
pub mod policy_backend;
pub mod state_store;
pub mod telephony;

pub use device_settings::DeviceSettingsPort;
pub use launcher::LauncherPort;
pub use policy_backend::PolicyBackendPort;
pub use state_store::{StateBatch, StateStorePort, StateValue};
pub use telephony::TelephonyPort;
