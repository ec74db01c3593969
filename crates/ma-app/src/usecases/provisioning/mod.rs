//! Provisioning use cases
//!
//! The one-time onboarding sequence run when the device enters managed
//! state, and read access to the persisted identity it produces.

mod get_record;
mod orchestrator;
mod persist_identity;

pub use get_record::GetProvisioningRecord;
pub use orchestrator::{ProvisioningOrchestrator, ProvisioningSettings};
pub use persist_identity::{PersistOutcome, PersistProvisioningIdentity};

/// Step names reported in [`ma_core::OrchestratorReport`], in execution order.
pub mod steps {
    pub const PERSIST_IDENTITY: &str = "persist_identity";
    pub const APPLY_OWNER_LABELS: &str = "apply_owner_labels";
    pub const ENABLE_MANAGED_PROFILE: &str = "enable_managed_profile";
    pub const SET_PERMISSION_POLICY: &str = "set_permission_policy";
    pub const GRANT_CRITICAL_PERMISSIONS: &str = "grant_critical_permissions";
    pub const ALLOW_APP_INSTALLS: &str = "allow_app_installs";
    pub const LAUNCH_MANAGED_APP: &str = "launch_managed_app";

    pub const ALL: [&str; 7] = [
        PERSIST_IDENTITY,
        APPLY_OWNER_LABELS,
        ENABLE_MANAGED_PROFILE,
        SET_PERMISSION_POLICY,
        GRANT_CRITICAL_PERMISSIONS,
        ALLOW_APP_INSTALLS,
        LAUNCH_MANAGED_APP,
    ];
}
