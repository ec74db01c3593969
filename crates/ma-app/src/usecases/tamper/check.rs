use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use ma_core::policy::BackendError;
use ma_core::ports::{DeviceSettingsPort, PolicyBackendPort};
use ma_core::tamper::TamperVerdict;

/// Read-only audit of managed state.
///
/// Has no precondition and no side effects. Each sub-check is best-effort:
/// a failed query reads as `false` and the verdict still computes.
#[derive(Clone)]
pub struct CheckTamperStatus {
    backend: Arc<dyn PolicyBackendPort>,
    settings: Arc<dyn DeviceSettingsPort>,
}

impl CheckTamperStatus {
    pub fn new(backend: Arc<dyn PolicyBackendPort>, settings: Arc<dyn DeviceSettingsPort>) -> Self {
        Self { backend, settings }
    }

    pub async fn execute(&self) -> TamperVerdict {
        let span = info_span!("usecase.check_tamper_status.execute");
        async {
            let owner = or_false("device_owner", self.backend.is_device_owner()).await;
            let admin = or_false("admin_active", self.backend.is_admin_active()).await;
            let dev = or_false("developer_options", self.settings.developer_options_enabled()).await;
            let adb = or_false("adb", self.settings.adb_enabled()).await;

            let verdict = TamperVerdict::new(owner, admin, dev, adb);
            debug!(?verdict, "tamper check complete");
            verdict
        }
        .instrument(span)
        .await
    }
}

async fn or_false(check: &str, query: impl Future<Output = Result<bool, BackendError>>) -> bool {
    query.await.unwrap_or_else(|err| {
        warn!(check, error = %err, "tamper sub-check failed, assuming false");
        false
    })
}
