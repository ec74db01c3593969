//! Host lifecycle events delivered to the agent.

use std::collections::HashMap;

/// Device-administration lifecycle callback, modeled as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLifecycleEvent {
    /// Managed provisioning finished; carries the admin extras bundle, if any.
    ProvisioningComplete {
        extras: Option<HashMap<String, String>>,
    },
    /// Device administration was enabled for the agent.
    AdminEnabled,
    /// Device administration was disabled for the agent.
    AdminDisabled,
}

impl DeviceLifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProvisioningComplete { .. } => "provisioning_complete",
            Self::AdminEnabled => "admin_enabled",
            Self::AdminDisabled => "admin_disabled",
        }
    }
}
