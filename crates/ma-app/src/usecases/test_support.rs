//! Mock ports shared by the use case unit tests.

use async_trait::async_trait;
use mockall::mock;

use ma_core::launch::{LaunchEntry, LaunchError};
use ma_core::policy::{BackendError, PermissionPolicy, Restriction, StorageError};
use ma_core::ports::{
    DeviceSettingsPort, LauncherPort, PolicyBackendPort, StateBatch, StateStorePort, StateValue,
    TelephonyPort,
};

mock! {
    pub Backend {}

    #[async_trait]
    impl PolicyBackendPort for Backend {
        async fn is_device_owner(&self) -> Result<bool, BackendError>;
        async fn is_admin_active(&self) -> Result<bool, BackendError>;
        async fn set_organization_name(&self, name: &str) -> Result<(), BackendError>;
        async fn set_profile_name(&self, name: &str) -> Result<(), BackendError>;
        async fn enable_profile(&self) -> Result<(), BackendError>;
        async fn set_permission_policy(&self, policy: PermissionPolicy) -> Result<(), BackendError>;
        async fn grant_permission(&self, package: &str, permission: &str) -> Result<(), BackendError>;
        async fn add_restriction(&self, restriction: Restriction) -> Result<(), BackendError>;
        async fn clear_restriction(&self, restriction: Restriction) -> Result<(), BackendError>;
        async fn set_camera_disabled(&self, disabled: bool) -> Result<(), BackendError>;
        async fn set_screen_capture_disabled(&self, disabled: bool) -> Result<(), BackendError>;
        async fn set_lock_task_packages(&self, packages: &[String]) -> Result<(), BackendError>;
        async fn start_lock_task(&self) -> Result<(), BackendError>;
        async fn stop_lock_task(&self) -> Result<(), BackendError>;
        async fn lock_now(&self) -> Result<(), BackendError>;
        async fn wipe_data(&self) -> Result<(), BackendError>;
        async fn clear_device_owner(&self, package: &str) -> Result<(), BackendError>;
        async fn request_admin(&self, explanation: &str) -> Result<(), BackendError>;
    }
}

mock! {
    pub Launcher {}

    #[async_trait]
    impl LauncherPort for Launcher {
        async fn launch_primary(&self) -> Result<(), LaunchError>;
        async fn resolve_launch_entry(&self, package: &str) -> Result<Option<LaunchEntry>, LaunchError>;
        async fn launch_entry(&self, entry: &LaunchEntry) -> Result<(), LaunchError>;
        async fn dismiss_onboarding_surface(&self) -> Result<(), LaunchError>;
    }
}

mock! {
    pub Settings {}

    #[async_trait]
    impl DeviceSettingsPort for Settings {
        async fn developer_options_enabled(&self) -> Result<bool, BackendError>;
        async fn adb_enabled(&self) -> Result<bool, BackendError>;
    }
}

mock! {
    pub Telephony {}

    #[async_trait]
    impl TelephonyPort for Telephony {
        async fn sim_operator_name(&self) -> Result<Option<String>, BackendError>;
        async fn network_operator_name(&self) -> Result<Option<String>, BackendError>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl StateStorePort for Store {
        async fn get(&self, key: &str) -> Result<Option<StateValue>, StorageError>;
        async fn commit(&self, batch: StateBatch) -> Result<(), StorageError>;
    }
}

/// Backend that is owner and admin-active and accepts every call.
pub fn permissive_backend() -> MockBackend {
    permissive_backend_with(|_| {})
}

/// Permissive backend with test-specific expectations installed first.
///
/// Expectations match in FIFO order, so anything `configure` sets wins over
/// the catch-all defaults.
pub fn permissive_backend_with(configure: impl FnOnce(&mut MockBackend)) -> MockBackend {
    let mut backend = MockBackend::new();
    configure(&mut backend);
    backend.expect_is_device_owner().returning(|| Ok(true));
    backend.expect_is_admin_active().returning(|| Ok(true));
    backend.expect_set_organization_name().returning(|_| Ok(()));
    backend.expect_set_profile_name().returning(|_| Ok(()));
    backend.expect_enable_profile().returning(|| Ok(()));
    backend.expect_set_permission_policy().returning(|_| Ok(()));
    backend.expect_grant_permission().returning(|_, _| Ok(()));
    backend.expect_add_restriction().returning(|_| Ok(()));
    backend.expect_clear_restriction().returning(|_| Ok(()));
    backend.expect_set_camera_disabled().returning(|_| Ok(()));
    backend.expect_set_screen_capture_disabled().returning(|_| Ok(()));
    backend.expect_set_lock_task_packages().returning(|_| Ok(()));
    backend.expect_start_lock_task().returning(|| Ok(()));
    backend.expect_stop_lock_task().returning(|| Ok(()));
    backend
}

/// Launcher whose primary surface always comes up.
pub fn working_launcher() -> MockLauncher {
    let mut launcher = MockLauncher::new();
    launcher.expect_launch_primary().returning(|| Ok(()));
    launcher
        .expect_dismiss_onboarding_surface()
        .returning(|| Ok(()));
    launcher
}
