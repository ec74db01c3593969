use async_trait::async_trait;

use ma_core::policy::BackendError;
use ma_core::ports::TelephonyPort;

use super::SimulatedDevice;

#[derive(Debug, Clone)]
pub struct SimulatedTelephony {
    device: SimulatedDevice,
}

impl SimulatedTelephony {
    pub fn new(device: SimulatedDevice) -> Self {
        Self { device }
    }
}

#[async_trait]
impl TelephonyPort for SimulatedTelephony {
    async fn sim_operator_name(&self) -> Result<Option<String>, BackendError> {
        self.device.enter("sim_operator_name")?;
        Ok(non_empty(self.device.model_guard().sim_operator.clone()))
    }

    async fn network_operator_name(&self) -> Result<Option<String>, BackendError> {
        self.device.enter("network_operator_name")?;
        Ok(non_empty(self.device.model_guard().network_operator.clone()))
    }
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}
