use std::sync::Arc;

use tracing::{info, warn};

use ma_core::policy::{BackendError, PolicyError};
use ma_core::ports::PolicyBackendPort;

/// Pins or unpins the managed surface (lock-task mode).
///
/// Needs an attached foreground surface. The allow-list itself is managed by
/// [`PolicyEnforcer`](super::PolicyEnforcer).
#[derive(Clone)]
pub struct KioskMode {
    backend: Arc<dyn PolicyBackendPort>,
}

impl KioskMode {
    pub fn new(backend: Arc<dyn PolicyBackendPort>) -> Self {
        Self { backend }
    }

    pub async fn enter(&self) -> Result<(), PolicyError> {
        self.backend.start_lock_task().await.map_err(map_surface_error)?;
        info!("kiosk mode entered");
        Ok(())
    }

    pub async fn exit(&self) -> Result<(), PolicyError> {
        self.backend.stop_lock_task().await.map_err(map_surface_error)?;
        info!("kiosk mode exited");
        Ok(())
    }
}

fn map_surface_error(err: BackendError) -> PolicyError {
    match err {
        BackendError::NoSurface(msg) => {
            warn!(%msg, "no foreground surface for lock task");
            PolicyError::Resolution(msg)
        }
        other => PolicyError::Backend(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockBackend;

    #[tokio::test]
    async fn test_missing_surface_is_resolution_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_start_lock_task()
            .returning(|| Err(BackendError::NoSurface("Activity not found".into())));

        let err = KioskMode::new(Arc::new(backend)).enter().await.unwrap_err();

        assert_eq!(err, PolicyError::Resolution("Activity not found".into()));
    }

    #[tokio::test]
    async fn test_exit_stops_lock_task() {
        let mut backend = MockBackend::new();
        backend.expect_stop_lock_task().times(1).returning(|| Ok(()));

        assert_eq!(KioskMode::new(Arc::new(backend)).exit().await, Ok(()));
    }
}
