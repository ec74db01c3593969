//! # ma-core
//!
//! Core domain models and port contracts for the managed device agent.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.
//! Privileged platform calls, persistence and launching are reached only through
//! the traits in [`ports`].

// Public module exports
pub mod config;
pub mod launch;
pub mod lifecycle;
pub mod policy;
pub mod ports;
pub mod provisioning;
pub mod tamper;

// Re-export commonly used types at the crate root
pub use config::AgentConfig;
pub use launch::{LaunchEntry, LaunchError, LaunchOutcome};
pub use lifecycle::DeviceLifecycleEvent;
pub use policy::{
    BackendError, EnforcedSetting, EnforcementResult, OrchestratorReport, PermissionPolicy, PolicyError,
    PolicyStepResult, ReleaseError, Restriction, RestrictionOutcome, RestrictionSet, StorageError,
    WipeError,
};
pub use provisioning::{ProvisioningExtras, ProvisioningRecord, PROVISIONING_NAMESPACE};
pub use tamper::TamperVerdict;
