use std::sync::Arc;

use tracing::{info, warn};

use ma_core::policy::PolicyError;
use ma_core::ports::PolicyBackendPort;

/// Use case locking the screen immediately. Requires admin-active status.
pub struct LockDevice {
    backend: Arc<dyn PolicyBackendPort>,
}

impl LockDevice {
    pub fn new(backend: Arc<dyn PolicyBackendPort>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> Result<(), PolicyError> {
        let is_admin_active = self.backend.is_admin_active().await.unwrap_or_else(|err| {
            warn!(error = %err, "admin status query failed, treating as inactive");
            false
        });
        if !is_admin_active {
            warn!("lock rejected: device admin not active");
            return Err(PolicyError::NotAdminActive);
        }
        self.backend.lock_now().await?;
        info!("device locked");
        Ok(())
    }
}
