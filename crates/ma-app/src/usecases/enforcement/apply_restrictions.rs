use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use ma_core::policy::{EnforcedSetting, EnforcementResult, PolicyError, Restriction, RestrictionSet};
use ma_core::ports::PolicyBackendPort;

use crate::usecases::custody::CustodyLock;

/// Network toggles as applied by [`PolicyEnforcer::set_network_restrictions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRestrictionState {
    pub wifi_disabled: bool,
    pub mobile_data_disabled: bool,
}

/// Applies operator-requested restrictions.
///
/// Every entry point re-queries owner status before touching the backend; a
/// non-owner caller gets [`PolicyError::NotOwner`] with zero mutations.
///
/// The bulk [`apply_restrictions`](Self::apply_restrictions) is best-effort
/// per setting. The single-purpose toggles stop at the first backend failure
/// and return it.
#[derive(Clone)]
pub struct PolicyEnforcer {
    backend: Arc<dyn PolicyBackendPort>,
    custody: CustodyLock,
    package_name: String,
}

impl PolicyEnforcer {
    pub fn new(
        backend: Arc<dyn PolicyBackendPort>,
        custody: CustodyLock,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            custody,
            package_name: package_name.into(),
        }
    }

    pub async fn apply_restrictions(
        &self,
        config: &RestrictionSet,
    ) -> Result<EnforcementResult, PolicyError> {
        let span = info_span!("usecase.apply_restrictions.execute");
        async {
            let _custody = self.custody.acquire().await;
            self.ensure_owner().await?;

            let mut result = EnforcementResult::default();

            for (restriction, enabled) in config.user_restrictions() {
                let outcome = self.backend.set_restriction(restriction, enabled).await;
                result.record(
                    EnforcedSetting::Restriction(restriction),
                    enabled,
                    outcome.err().map(|e| e.to_string()),
                );
            }

            if let Some(disabled) = config.camera_disabled {
                let outcome = self.backend.set_camera_disabled(disabled).await;
                result.record(
                    EnforcedSetting::Camera,
                    disabled,
                    outcome.err().map(|e| e.to_string()),
                );
            }

            if let Some(disabled) = config.screen_capture_disabled {
                let outcome = self.backend.set_screen_capture_disabled(disabled).await;
                result.record(
                    EnforcedSetting::ScreenCapture,
                    disabled,
                    outcome.err().map(|e| e.to_string()),
                );
            }

            if let Some(pinned) = config.kiosk_lock_task {
                let packages = if pinned {
                    vec![self.package_name.clone()]
                } else {
                    Vec::new()
                };
                let outcome = self.backend.set_lock_task_packages(&packages).await;
                result.record(
                    EnforcedSetting::LockTaskPackages,
                    pinned,
                    outcome.err().map(|e| e.to_string()),
                );
            }

            for failure in result.failures() {
                warn!(
                    setting = %failure.setting,
                    error = failure.error_detail.as_deref().unwrap_or_default(),
                    "restriction not applied"
                );
            }
            info!(
                applied = result.outcomes.len(),
                failed = result.failures().count(),
                "restrictions applied"
            );

            Ok(result)
        }
        .instrument(span)
        .await
    }

    pub async fn set_camera_disabled(&self, disabled: bool) -> Result<(), PolicyError> {
        let _custody = self.custody.acquire().await;
        self.ensure_owner().await?;
        self.backend.set_camera_disabled(disabled).await?;
        info!(disabled, "camera policy updated");
        Ok(())
    }

    pub async fn set_screen_capture_disabled(&self, disabled: bool) -> Result<(), PolicyError> {
        let _custody = self.custody.acquire().await;
        self.ensure_owner().await?;
        self.backend.set_screen_capture_disabled(disabled).await?;
        info!(disabled, "screen capture policy updated");
        Ok(())
    }

    pub async fn set_network_restrictions(
        &self,
        disable_wifi: bool,
        disable_mobile_data: bool,
    ) -> Result<NetworkRestrictionState, PolicyError> {
        let _custody = self.custody.acquire().await;
        self.ensure_owner().await?;

        self.backend
            .set_restriction(Restriction::DisallowConfigWifi, disable_wifi)
            .await?;
        self.backend
            .set_restriction(Restriction::DisallowConfigMobileNetworks, disable_mobile_data)
            .await?;
        info!(disable_wifi, disable_mobile_data, "network restrictions updated");

        Ok(NetworkRestrictionState {
            wifi_disabled: disable_wifi,
            mobile_data_disabled: disable_mobile_data,
        })
    }

    async fn ensure_owner(&self) -> Result<(), PolicyError> {
        match self.backend.is_device_owner().await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("rejecting policy change: not device owner");
                Err(PolicyError::NotOwner)
            }
            Err(err) => {
                debug!(error = %err, "owner query failed, treating as not owner");
                Err(PolicyError::NotOwner)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{permissive_backend_with, MockBackend};
    use ma_core::policy::BackendError;

    fn enforcer(backend: MockBackend) -> PolicyEnforcer {
        PolicyEnforcer::new(Arc::new(backend), CustodyLock::new(), "com.acme")
    }

    fn non_owner() -> MockBackend {
        let mut backend = MockBackend::new();
        backend.expect_is_device_owner().returning(|| Ok(false));
        backend
    }

    #[tokio::test]
    async fn test_non_owner_bulk_apply_mutates_nothing() {
        // No other expectations: any mutation would panic the mock.
        let uc = enforcer(non_owner());

        let result = uc.apply_restrictions(&RestrictionSet::lockdown()).await;

        assert_eq!(result, Err(PolicyError::NotOwner));
    }

    #[tokio::test]
    async fn test_non_owner_sub_operations_are_rejected() {
        let uc = enforcer(non_owner());

        assert_eq!(uc.set_camera_disabled(true).await, Err(PolicyError::NotOwner));
        assert_eq!(
            uc.set_screen_capture_disabled(true).await,
            Err(PolicyError::NotOwner)
        );
        assert_eq!(
            uc.set_network_restrictions(true, true).await,
            Err(PolicyError::NotOwner)
        );
    }

    #[tokio::test]
    async fn test_owner_query_failure_is_not_owner() {
        let mut backend = MockBackend::new();
        backend
            .expect_is_device_owner()
            .returning(|| Err(BackendError::Failed("dpm unavailable".into())));

        let uc = enforcer(backend);

        assert_eq!(uc.set_camera_disabled(true).await, Err(PolicyError::NotOwner));
    }

    #[tokio::test]
    async fn test_lockdown_applies_six_restrictions_and_pins_package() {
        let backend = permissive_backend_with(|b| {
            b.expect_set_lock_task_packages()
                .withf(|packages| packages == ["com.acme".to_string()])
                .times(1)
                .returning(|_| Ok(()));
            b.expect_add_restriction().times(6).returning(|_| Ok(()));
            b.expect_clear_restriction().never();
            b.expect_set_camera_disabled().never();
        });
        let uc = enforcer(backend);

        let result = uc.apply_restrictions(&RestrictionSet::lockdown()).await.unwrap();

        assert_eq!(result.outcomes.len(), 7);
        assert!(result.all_succeeded());
        assert!(result.lock_task_applied());
    }

    #[tokio::test]
    async fn test_single_failure_does_not_stop_remaining_settings() {
        let backend = permissive_backend_with(|b| {
            b.expect_add_restriction()
                .withf(|r| *r == Restriction::DisallowSafeBoot)
                .returning(|_| Err(BackendError::SecurityDenied("locked by OEM".into())));
        });
        let uc = enforcer(backend);
        let config = RestrictionSet {
            disallow_safe_boot: Some(true),
            disallow_add_user: Some(true),
            camera_disabled: Some(true),
            ..Default::default()
        };

        let result = uc.apply_restrictions(&config).await.unwrap();

        assert_eq!(result.outcomes.len(), 3);
        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].setting,
            EnforcedSetting::Restriction(Restriction::DisallowSafeBoot)
        );
        assert!(result.outcomes[1].succeeded);
        assert!(result.outcomes[2].succeeded);
    }

    #[tokio::test]
    async fn test_unset_fields_are_not_touched() {
        let mut backend = MockBackend::new();
        backend.expect_is_device_owner().returning(|| Ok(true));
        backend
            .expect_add_restriction()
            .withf(|r| *r == Restriction::DisallowConfigWifi)
            .times(1)
            .returning(|_| Ok(()));
        let uc = enforcer(backend);
        let config = RestrictionSet {
            disallow_config_wifi: Some(true),
            ..Default::default()
        };

        let result = uc.apply_restrictions(&config).await.unwrap();

        assert_eq!(result.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn test_network_toggles_add_and_clear() {
        let mut backend = MockBackend::new();
        backend.expect_is_device_owner().returning(|| Ok(true));
        backend
            .expect_add_restriction()
            .withf(|r| *r == Restriction::DisallowConfigWifi)
            .times(1)
            .returning(|_| Ok(()));
        backend
            .expect_clear_restriction()
            .withf(|r| *r == Restriction::DisallowConfigMobileNetworks)
            .times(1)
            .returning(|_| Ok(()));
        let uc = enforcer(backend);

        let state = uc.set_network_restrictions(true, false).await.unwrap();

        assert_eq!(
            state,
            NetworkRestrictionState {
                wifi_disabled: true,
                mobile_data_disabled: false
            }
        );
    }

    #[tokio::test]
    async fn test_sub_operation_backend_failure_is_terminal() {
        let mut backend = MockBackend::new();
        backend.expect_is_device_owner().returning(|| Ok(true));
        backend
            .expect_add_restriction()
            .returning(|_| Err(BackendError::Failed("radio busy".into())));
        backend.expect_clear_restriction().never();
        let uc = enforcer(backend);

        let err = uc.set_network_restrictions(true, false).await.unwrap_err();

        assert_eq!(err, PolicyError::Backend(BackendError::Failed("radio busy".into())));
    }

    #[tokio::test]
    async fn test_unpinning_kiosk_empties_allow_list() {
        let mut backend = MockBackend::new();
        backend.expect_is_device_owner().returning(|| Ok(true));
        backend
            .expect_set_lock_task_packages()
            .withf(|packages| packages.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        let uc = enforcer(backend);
        let config = RestrictionSet {
            kiosk_lock_task: Some(false),
            ..Default::default()
        };

        let result = uc.apply_restrictions(&config).await.unwrap();

        assert!(result.all_succeeded());
        assert!(!result.outcomes[0].enabled);
    }
}
