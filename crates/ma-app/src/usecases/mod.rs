//! Business logic use cases
//!
//! Onboarding runs once per provisioning event and never aborts. Everything
//! else is invoked by the host command surface on demand.
//!
//! [ProvisioningComplete]
//         ↓
// ProvisioningOrchestrator → PersistProvisioningIdentity → LaunchFailover
// ---------------------------------
// PolicyEnforcer / KioskMode / ApplyLockState   ← operator commands
// CheckTamperStatus / TamperMonitor            ← audit
// WipeDevice / ReleaseOwnership                ← custody

pub mod custody;
pub mod enforcement;
pub mod launch;
pub mod lifecycle;
pub mod provisioning;
pub mod sim_info;
pub mod tamper;

#[cfg(test)]
pub(crate) mod test_support;

pub use custody::{
    AdminStatus, CustodyLock, GetAdminStatus, ReleaseOwnership, RequestAdminElevation, WipeDevice,
};
pub use enforcement::{
    ApplyLockState, KioskMode, LockDevice, LockStateReport, NetworkRestrictionState,
    PolicyEnforcer,
};
pub use launch::{LaunchFailover, PendingDismissals};
pub use lifecycle::{LifecycleDispatcher, LifecycleOutcome};
pub use provisioning::{
    GetProvisioningRecord, PersistOutcome, PersistProvisioningIdentity, ProvisioningOrchestrator,
    ProvisioningSettings,
};
pub use sim_info::{GetSimInfo, SimInfo, UNKNOWN_CARRIER};
pub use tamper::{CheckTamperStatus, TamperMonitor};
