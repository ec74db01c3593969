use async_trait::async_trait;
use tracing::debug;

use ma_core::policy::{BackendError, PermissionPolicy, Restriction};
use ma_core::ports::PolicyBackendPort;

use super::SimulatedDevice;

/// Device-policy service of a [`SimulatedDevice`].
///
/// Owner-only calls fail with `SecurityDenied` when the agent is not device
/// owner, as the real service throws a security exception.
#[derive(Debug, Clone)]
pub struct SimulatedPolicyBackend {
    device: SimulatedDevice,
}

impl SimulatedPolicyBackend {
    pub fn new(device: SimulatedDevice) -> Self {
        Self { device }
    }

    fn owner_call(&self, operation: &str) -> Result<(), BackendError> {
        self.device.enter(operation)?;
        if !self.device.model_guard().is_device_owner {
            return Err(BackendError::SecurityDenied(format!(
                "{operation}: caller is not the device owner"
            )));
        }
        Ok(())
    }

    fn admin_call(&self, operation: &str) -> Result<(), BackendError> {
        self.device.enter(operation)?;
        if !self.device.model_guard().is_admin_active {
            return Err(BackendError::SecurityDenied(format!(
                "{operation}: no active admin"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PolicyBackendPort for SimulatedPolicyBackend {
    async fn is_device_owner(&self) -> Result<bool, BackendError> {
        self.device.enter("is_device_owner")?;
        Ok(self.device.model_guard().is_device_owner)
    }

    async fn is_admin_active(&self) -> Result<bool, BackendError> {
        self.device.enter("is_admin_active")?;
        Ok(self.device.model_guard().is_admin_active)
    }

    async fn set_organization_name(&self, name: &str) -> Result<(), BackendError> {
        self.owner_call("set_organization_name")?;
        self.device.model_guard().organization_name = Some(name.to_string());
        Ok(())
    }

    async fn set_profile_name(&self, name: &str) -> Result<(), BackendError> {
        self.owner_call("set_profile_name")?;
        self.device.model_guard().profile_name = Some(name.to_string());
        Ok(())
    }

    async fn enable_profile(&self) -> Result<(), BackendError> {
        self.owner_call("enable_profile")?;
        let mut model = self.device.model_guard();
        if model.profile_enabled {
            return Err(BackendError::AlreadyEnabled);
        }
        model.profile_enabled = true;
        Ok(())
    }

    async fn set_permission_policy(&self, policy: PermissionPolicy) -> Result<(), BackendError> {
        self.owner_call("set_permission_policy")?;
        self.device.model_guard().permission_policy = Some(policy);
        Ok(())
    }

    async fn grant_permission(&self, package: &str, permission: &str) -> Result<(), BackendError> {
        self.owner_call("grant_permission")?;
        debug!(package, permission, "simulated permission grant");
        self.device
            .model_guard()
            .granted_permissions
            .insert(permission.to_string());
        Ok(())
    }

    async fn add_restriction(&self, restriction: Restriction) -> Result<(), BackendError> {
        self.owner_call(&format!("add_restriction:{}", restriction.platform_key()))?;
        self.device.model_guard().restrictions.insert(restriction);
        Ok(())
    }

    async fn clear_restriction(&self, restriction: Restriction) -> Result<(), BackendError> {
        self.owner_call(&format!("clear_restriction:{}", restriction.platform_key()))?;
        self.device.model_guard().restrictions.remove(&restriction);
        Ok(())
    }

    async fn set_camera_disabled(&self, disabled: bool) -> Result<(), BackendError> {
        self.owner_call("set_camera_disabled")?;
        self.device.model_guard().camera_disabled = disabled;
        Ok(())
    }

    async fn set_screen_capture_disabled(&self, disabled: bool) -> Result<(), BackendError> {
        self.owner_call("set_screen_capture_disabled")?;
        self.device.model_guard().screen_capture_disabled = disabled;
        Ok(())
    }

    async fn set_lock_task_packages(&self, packages: &[String]) -> Result<(), BackendError> {
        self.owner_call("set_lock_task_packages")?;
        self.device.model_guard().lock_task_packages = packages.to_vec();
        Ok(())
    }

    async fn start_lock_task(&self) -> Result<(), BackendError> {
        self.device.enter("start_lock_task")?;
        let mut model = self.device.model_guard();
        if !model.has_foreground_surface {
            return Err(BackendError::NoSurface("Activity not found".into()));
        }
        model.lock_task_active = true;
        Ok(())
    }

    async fn stop_lock_task(&self) -> Result<(), BackendError> {
        self.device.enter("stop_lock_task")?;
        let mut model = self.device.model_guard();
        if !model.has_foreground_surface {
            return Err(BackendError::NoSurface("Activity not found".into()));
        }
        model.lock_task_active = false;
        Ok(())
    }

    async fn lock_now(&self) -> Result<(), BackendError> {
        self.admin_call("lock_now")?;
        self.device.model_guard().screen_locked = true;
        Ok(())
    }

    async fn wipe_data(&self) -> Result<(), BackendError> {
        self.admin_call("wipe_data")?;
        let mut model = self.device.model_guard();
        let sim_operator = model.sim_operator.take();
        let network_operator = model.network_operator.take();
        *model = super::DeviceModel {
            wiped: true,
            sim_operator,
            network_operator,
            ..Default::default()
        };
        Ok(())
    }

    async fn clear_device_owner(&self, package: &str) -> Result<(), BackendError> {
        self.owner_call("clear_device_owner")?;
        debug!(package, "simulated device owner cleared");
        let mut model = self.device.model_guard();
        model.is_device_owner = false;
        model.is_admin_active = false;
        Ok(())
    }

    async fn request_admin(&self, explanation: &str) -> Result<(), BackendError> {
        self.device.enter("request_admin")?;
        debug!(explanation, "simulated add-device-admin prompt accepted");
        let mut model = self.device.model_guard();
        model.admin_prompts += 1;
        model.is_admin_active = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::DeviceModel;

    #[tokio::test]
    async fn test_owner_calls_rejected_for_non_owner() {
        let device = SimulatedDevice::new(DeviceModel::default());
        let backend = SimulatedPolicyBackend::new(device.clone());

        let err = backend
            .add_restriction(Restriction::DisallowSafeBoot)
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::SecurityDenied(_)));
        assert!(device.snapshot().restrictions.is_empty());
    }

    #[tokio::test]
    async fn test_second_enable_reports_already_enabled() {
        let backend = SimulatedPolicyBackend::new(SimulatedDevice::managed());

        backend.enable_profile().await.unwrap();

        assert_eq!(backend.enable_profile().await, Err(BackendError::AlreadyEnabled));
    }

    #[tokio::test]
    async fn test_wipe_resets_device() {
        let device = SimulatedDevice::managed();
        let backend = SimulatedPolicyBackend::new(device.clone());
        backend.add_restriction(Restriction::DisallowAddUser).await.unwrap();

        backend.wipe_data().await.unwrap();

        let model = device.snapshot();
        assert!(model.wiped);
        assert!(!model.is_device_owner);
        assert!(model.restrictions.is_empty());
    }

    #[tokio::test]
    async fn test_lock_task_needs_surface() {
        let device = SimulatedDevice::managed();
        device.update(|m| m.has_foreground_surface = false);
        let backend = SimulatedPolicyBackend::new(device);

        assert!(matches!(
            backend.start_lock_task().await,
            Err(BackendError::NoSurface(_))
        ));
    }

    #[tokio::test]
    async fn test_restriction_calls_are_logged_by_key() {
        let device = SimulatedDevice::managed();
        let backend = SimulatedPolicyBackend::new(device.clone());

        backend
            .set_restriction(Restriction::DisallowConfigWifi, false)
            .await
            .unwrap();

        assert_eq!(device.calls(), vec!["clear_restriction:no_config_wifi"]);
    }
}
