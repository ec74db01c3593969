use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use ma_core::policy::{BackendError, WipeError};
use ma_core::ports::PolicyBackendPort;

use super::CustodyLock;

/// Use case for factory-resetting the device.
///
/// Admin-active status is re-checked at invocation time, never taken from a
/// cached flag.
pub struct WipeDevice {
    backend: Arc<dyn PolicyBackendPort>,
    custody: CustodyLock,
}

impl WipeDevice {
    pub fn new(backend: Arc<dyn PolicyBackendPort>, custody: CustodyLock) -> Self {
        Self { backend, custody }
    }

    pub async fn execute(&self) -> Result<(), WipeError> {
        let span = info_span!("usecase.wipe_device.execute");
        async {
            let _custody = self.custody.acquire().await;

            match self.backend.is_admin_active().await {
                Ok(true) => {}
                Ok(false) => {
                    warn!("wipe rejected: device admin not active");
                    return Err(WipeError::NotAdminActive);
                }
                Err(err) => {
                    warn!(error = %err, "wipe rejected: admin status query failed");
                    return Err(WipeError::NotAdminActive);
                }
            }

            info!("wiping device data");
            self.backend.wipe_data().await.map_err(|err| {
                error!(error = %err, "wipe failed");
                match err {
                    BackendError::SecurityDenied(msg) => WipeError::SecurityDenied(msg),
                    other => WipeError::Backend(other.to_string()),
                }
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockBackend;

    #[tokio::test]
    async fn test_wipe_requires_admin_active() {
        let mut backend = MockBackend::new();
        backend.expect_is_admin_active().returning(|| Ok(false));
        backend.expect_wipe_data().never();

        let uc = WipeDevice::new(Arc::new(backend), CustodyLock::new());

        assert_eq!(uc.execute().await, Err(WipeError::NotAdminActive));
    }

    #[tokio::test]
    async fn test_wipe_distinguishes_security_denial() {
        let mut backend = MockBackend::new();
        backend.expect_is_admin_active().returning(|| Ok(true));
        backend
            .expect_wipe_data()
            .times(1)
            .returning(|| Err(BackendError::SecurityDenied("no MASTER_CLEAR".into())));

        let uc = WipeDevice::new(Arc::new(backend), CustodyLock::new());

        assert_eq!(
            uc.execute().await,
            Err(WipeError::SecurityDenied("no MASTER_CLEAR".into()))
        );
    }

    #[tokio::test]
    async fn test_wipe_reports_other_backend_failures() {
        let mut backend = MockBackend::new();
        backend.expect_is_admin_active().returning(|| Ok(true));
        backend
            .expect_wipe_data()
            .returning(|| Err(BackendError::Failed("binder died".into())));

        let uc = WipeDevice::new(Arc::new(backend), CustodyLock::new());

        assert!(matches!(uc.execute().await, Err(WipeError::Backend(_))));
    }

    #[tokio::test]
    async fn test_wipe_succeeds_when_admin_active() {
        let mut backend = MockBackend::new();
        backend.expect_is_admin_active().returning(|| Ok(true));
        backend.expect_wipe_data().times(1).returning(|| Ok(()));

        let uc = WipeDevice::new(Arc::new(backend), CustodyLock::new());

        assert_eq!(uc.execute().await, Ok(()));
    }

    #[tokio::test]
    async fn test_failed_admin_query_is_not_treated_as_active() {
        let mut backend = MockBackend::new();
        backend
            .expect_is_admin_active()
            .returning(|| Err(BackendError::Failed("service unavailable".into())));
        backend.expect_wipe_data().never();

        let uc = WipeDevice::new(Arc::new(backend), CustodyLock::new());

        assert_eq!(uc.execute().await, Err(WipeError::NotAdminActive));
    }
}
