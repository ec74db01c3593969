//! Host lifecycle dispatch
//!
//! Device-administration callbacks arrive as [`DeviceLifecycleEvent`] values
//! and are routed to the matching use case.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

use ma_core::launch::LaunchOutcome;
use ma_core::lifecycle::DeviceLifecycleEvent;
use ma_core::policy::OrchestratorReport;
use ma_core::tamper::TamperVerdict;

use super::launch::LaunchFailover;
use super::provisioning::ProvisioningOrchestrator;
use super::tamper::CheckTamperStatus;

/// What handling a lifecycle event produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum LifecycleOutcome {
    Provisioned(OrchestratorReport),
    /// Admin enablement foregrounds the app as a failsafe.
    Launched { outcome: LaunchOutcome },
    /// Admin loss triggers an immediate audit.
    Audited { verdict: TamperVerdict },
}

pub struct LifecycleDispatcher {
    orchestrator: Arc<ProvisioningOrchestrator>,
    launch: LaunchFailover,
    tamper: CheckTamperStatus,
}

impl LifecycleDispatcher {
    pub fn new(
        orchestrator: Arc<ProvisioningOrchestrator>,
        launch: LaunchFailover,
        tamper: CheckTamperStatus,
    ) -> Self {
        Self {
            orchestrator,
            launch,
            tamper,
        }
    }

    pub async fn dispatch(&self, event: DeviceLifecycleEvent) -> LifecycleOutcome {
        let span = info_span!("usecase.lifecycle.dispatch", event = event.name());
        async {
            match event {
                DeviceLifecycleEvent::ProvisioningComplete { extras } => {
                    LifecycleOutcome::Provisioned(self.orchestrator.execute(extras.as_ref()).await)
                }
                DeviceLifecycleEvent::AdminEnabled => {
                    info!("device admin enabled, launching managed app");
                    LifecycleOutcome::Launched {
                        outcome: self.launch.execute().await,
                    }
                }
                DeviceLifecycleEvent::AdminDisabled => {
                    warn!("device admin disabled");
                    LifecycleOutcome::Audited {
                        verdict: self.tamper.execute().await,
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
