use async_trait::async_trait;

use crate::policy::BackendError;

/// Carrier lookup. Empty strings are reported as `None`.
#[async_trait]
pub trait TelephonyPort: Send + Sync {
    async fn sim_operator_name(&self) -> Result<Option<String>, BackendError>;

    async fn network_operator_name(&self) -> Result<Option<String>, BackendError>;
}
