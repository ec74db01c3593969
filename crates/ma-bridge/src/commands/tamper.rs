use tracing::{info_span, Instrument};

use ma_core::tamper::TamperVerdict;

use crate::bootstrap::AgentRuntime;

/// Audit managed state. Never fails: unreadable signals read as `false`.
pub async fn check_tamper_status(runtime: &AgentRuntime) -> TamperVerdict {
    let span = info_span!("command.tamper.check_status");
    runtime
        .usecases()
        .check_tamper_status()
        .execute()
        .instrument(span)
        .await
}
