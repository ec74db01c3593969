use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use ma_core::policy::PolicyError;
use ma_core::ports::PolicyBackendPort;

/// Current device-administration capabilities of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatus {
    pub is_admin_active: bool,
    pub is_device_owner: bool,
}

/// Use case for reading admin/owner status. Failed queries read as `false`.
pub struct GetAdminStatus {
    backend: Arc<dyn PolicyBackendPort>,
}

impl GetAdminStatus {
    pub fn new(backend: Arc<dyn PolicyBackendPort>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> AdminStatus {
        let is_admin_active = self.backend.is_admin_active().await.unwrap_or_else(|err| {
            warn!(error = %err, "admin-active query failed");
            false
        });
        let is_device_owner = self.backend.is_device_owner().await.unwrap_or_else(|err| {
            warn!(error = %err, "device-owner query failed");
            false
        });

        AdminStatus {
            is_admin_active,
            is_device_owner,
        }
    }
}

/// Use case for prompting the user to activate device administration.
pub struct RequestAdminElevation {
    backend: Arc<dyn PolicyBackendPort>,
    explanation: String,
}

impl RequestAdminElevation {
    pub fn new(backend: Arc<dyn PolicyBackendPort>, explanation: impl Into<String>) -> Self {
        Self {
            backend,
            explanation: explanation.into(),
        }
    }

    pub async fn execute(&self) -> Result<(), PolicyError> {
        info!("requesting device admin elevation");
        self.backend.request_admin(&self.explanation).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockBackend;
    use ma_core::policy::BackendError;

    #[tokio::test]
    async fn test_status_defaults_failed_queries_to_false() {
        let mut backend = MockBackend::new();
        backend.expect_is_admin_active().returning(|| Ok(true));
        backend
            .expect_is_device_owner()
            .returning(|| Err(BackendError::Failed("dpm".into())));

        let status = GetAdminStatus::new(Arc::new(backend)).execute().await;

        assert_eq!(
            status,
            AdminStatus {
                is_admin_active: true,
                is_device_owner: false
            }
        );
    }

    #[tokio::test]
    async fn test_elevation_passes_explanation() {
        let mut backend = MockBackend::new();
        backend
            .expect_request_admin()
            .withf(|text| text == "Required for security.")
            .times(1)
            .returning(|_| Ok(()));

        let uc = RequestAdminElevation::new(Arc::new(backend), "Required for security.");

        assert_eq!(uc.execute().await, Ok(()));
    }
}
