use async_trait::async_trait;

use ma_core::policy::BackendError;
use ma_core::ports::DeviceSettingsPort;

use super::SimulatedDevice;

/// Global settings (developer options, ADB) of a [`SimulatedDevice`].
#[derive(Debug, Clone)]
pub struct SimulatedDeviceSettings {
    device: SimulatedDevice,
}

impl SimulatedDeviceSettings {
    pub fn new(device: SimulatedDevice) -> Self {
        Self { device }
    }
}

#[async_trait]
impl DeviceSettingsPort for SimulatedDeviceSettings {
    async fn developer_options_enabled(&self) -> Result<bool, BackendError> {
        self.device.enter("developer_options_enabled")?;
        Ok(self.device.model_guard().developer_options_enabled)
    }

    async fn adb_enabled(&self) -> Result<bool, BackendError> {
        self.device.enter("adb_enabled")?;
        Ok(self.device.model_guard().adb_enabled)
    }
}
