//! Provisioning record access and host lifecycle callbacks.

use std::collections::HashMap;

use tracing::{info_span, Instrument};

use ma_app::usecases::LifecycleOutcome;
use ma_core::lifecycle::DeviceLifecycleEvent;
use ma_core::policy::OrchestratorReport;
use ma_core::provisioning::ProvisioningRecord;

use super::error::CommandError;
use crate::bootstrap::AgentRuntime;

pub async fn get_provisioning_record(
    runtime: &AgentRuntime,
) -> Result<ProvisioningRecord, CommandError> {
    let span = info_span!("command.provisioning.get_record");
    async { Ok(runtime.usecases().get_provisioning_record().execute().await?) }
        .instrument(span)
        .await
}

/// Provisioning-complete callback. Never fails; see the report for step
/// outcomes.
pub async fn on_provisioning_complete(
    runtime: &AgentRuntime,
    extras: Option<HashMap<String, String>>,
) -> OrchestratorReport {
    let span = info_span!("command.provisioning.on_complete");
    runtime
        .usecases()
        .provisioning_orchestrator()
        .execute(extras.as_ref())
        .instrument(span)
        .await
}

/// Route any device-administration lifecycle event.
pub async fn on_lifecycle_event(
    runtime: &AgentRuntime,
    event: DeviceLifecycleEvent,
) -> LifecycleOutcome {
    let span = info_span!("command.provisioning.lifecycle_event", event = event.name());
    runtime
        .usecases()
        .lifecycle_dispatcher()
        .dispatch(event)
        .instrument(span)
        .await
}
