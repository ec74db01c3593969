use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use ma_core::policy::ReleaseError;
use ma_core::ports::PolicyBackendPort;

use super::CustodyLock;

/// Use case for clearing the managed-owner relationship.
pub struct ReleaseOwnership {
    backend: Arc<dyn PolicyBackendPort>,
    custody: CustodyLock,
    package_name: String,
}

impl ReleaseOwnership {
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

    pub async fn execute(&self) -> Result<(), ReleaseError> {
        let span = info_span!("usecase.release_ownership.execute", package = %self.package_name);
        async {
            let _custody = self.custody.acquire().await;

            let is_owner = self.backend.is_device_owner().await.map_err(|err| {
                error!(error = %err, "owner status query failed");
                ReleaseError::Backend(err.to_string())
            })?;
            if !is_owner {
                warn!("release rejected: not device owner");
                return Err(ReleaseError::NotOwner);
            }

            self.backend
                .clear_device_owner(&self.package_name)
                .await
                .map_err(|err| {
                    error!(error = %err, "failed to clear device owner");
                    ReleaseError::Backend(err.to_string())
                })?;
            info!("device owner released");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
