//! Policy backend port
//!
//! Single capability interface over the privileged device-administration
//! operations of the host platform. Implemented by platform adapters.

use async_trait::async_trait;

use crate::policy::{BackendError, PermissionPolicy, Restriction};

#[async_trait]
pub trait PolicyBackendPort: Send + Sync {
    /// Whether the agent currently holds device-owner capability.
    async fn is_device_owner(&self) -> Result<bool, BackendError>;

    /// Whether the agent's device-administration component is active.
    async fn is_admin_active(&self) -> Result<bool, BackendError>;

    async fn set_organization_name(&self, name: &str) -> Result<(), BackendError>;

    async fn set_profile_name(&self, name: &str) -> Result<(), BackendError>;

    /// Activate the managed profile/owner enablement.
    ///
    /// Some platform versions answer [`BackendError::AlreadyEnabled`] when the
    /// profile was enabled before.
    async fn enable_profile(&self) -> Result<(), BackendError>;

    async fn set_permission_policy(&self, policy: PermissionPolicy) -> Result<(), BackendError>;

    async fn grant_permission(&self, package: &str, permission: &str) -> Result<(), BackendError>;

    async fn add_restriction(&self, restriction: Restriction) -> Result<(), BackendError>;

    async fn clear_restriction(&self, restriction: Restriction) -> Result<(), BackendError>;

    async fn set_camera_disabled(&self, disabled: bool) -> Result<(), BackendError>;

    async fn set_screen_capture_disabled(&self, disabled: bool) -> Result<(), BackendError>;

    /// Replace the kiosk lock-task allow-list.
    async fn set_lock_task_packages(&self, packages: &[String]) -> Result<(), BackendError>;

    /// Pin the foreground surface (kiosk mode).
    async fn start_lock_task(&self) -> Result<(), BackendError>;

    async fn stop_lock_task(&self) -> Result<(), BackendError>;

    async fn lock_now(&self) -> Result<(), BackendError>;

    /// Factory reset. Destructive and irreversible.
    async fn wipe_data(&self) -> Result<(), BackendError>;

    async fn clear_device_owner(&self, package: &str) -> Result<(), BackendError>;

    /// Ask the user to activate device administration for the agent.
    async fn request_admin(&self, explanation: &str) -> Result<(), BackendError>;

    /// Set or clear a restriction to match `enabled`.
    async fn set_restriction(
        &self,
        restriction: Restriction,
        enabled: bool,
    ) -> Result<(), BackendError> {
        if enabled {
            self.add_restriction(restriction).await
        } else {
            self.clear_restriction(restriction).await
        }
    }
}
