use async_trait::async_trait;

use crate::policy::BackendError;

/// Read-only access to global device settings used as advisory tamper signals.
#[async_trait]
pub trait DeviceSettingsPort: Send + Sync {
    async fn developer_options_enabled(&self) -> Result<bool, BackendError>;

    async fn adb_enabled(&self) -> Result<bool, BackendError>;
}
