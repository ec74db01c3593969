//! Carrier lookup for the host UI.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use ma_core::policy::PolicyError;
use ma_core::ports::TelephonyPort;

/// Carrier reported when neither SIM nor network operator is known.
pub const UNKNOWN_CARRIER: &str = "Unknown / No SIM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimInfo {
    pub carrier: String,
}

pub struct GetSimInfo {
    telephony: Arc<dyn TelephonyPort>,
}

impl GetSimInfo {
    pub fn new(telephony: Arc<dyn TelephonyPort>) -> Self {
        Self { telephony }
    }

    /// SIM operator, else network operator, else [`UNKNOWN_CARRIER`].
    pub async fn execute(&self) -> Result<SimInfo, PolicyError> {
        let carrier = match non_empty(self.telephony.sim_operator_name().await?) {
            Some(name) => name,
            None => {
                debug!("no SIM operator, falling back to network operator");
                non_empty(self.telephony.network_operator_name().await?)
                    .unwrap_or_else(|| UNKNOWN_CARRIER.to_string())
            }
        };
        Ok(SimInfo { carrier })
    }
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.trim().is_empty())
}
