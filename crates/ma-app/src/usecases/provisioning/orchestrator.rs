use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use tracing::{debug, info, info_span, warn, Instrument};

use ma_core::config::AgentConfig;
use ma_core::launch::LaunchOutcome;
use ma_core::policy::{BackendError, OrchestratorReport, PermissionPolicy, PolicyStepResult, Restriction};
use ma_core::ports::{PolicyBackendPort, StateStorePort};
use ma_core::provisioning::{ProvisioningExtras, ProvisioningRecord};

use super::persist_identity::{PersistOutcome, PersistProvisioningIdentity};
use super::steps;
use crate::usecases::launch::LaunchFailover;

/// Onboarding parameters taken from the agent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningSettings {
    pub package_name: String,
    /// Empty skips organization labeling
    pub organization_name: String,
    pub profile_name: String,
    pub critical_permissions: Vec<String>,
}

impl ProvisioningSettings {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            package_name: config.package_name.clone(),
            organization_name: config.organization_name.clone(),
            profile_name: config.profile_name.clone(),
            critical_permissions: config.critical_permissions.clone(),
        }
    }
}

/// Runs the onboarding sequence for a provisioning-complete event.
///
/// Every step runs regardless of earlier failures. Errors are recorded in the
/// report and logged, never returned: a partially configured but launched
/// device beats one stuck on the provisioning screen.
///
/// Not internally locked. The host delivers at most one provisioning
/// callback at a time.
pub struct ProvisioningOrchestrator {
    backend: Arc<dyn PolicyBackendPort>,
    state_store: Arc<dyn StateStorePort>,
    persist_identity: PersistProvisioningIdentity,
    launch: LaunchFailover,
    settings: ProvisioningSettings,
}

impl ProvisioningOrchestrator {
    pub fn new(
        backend: Arc<dyn PolicyBackendPort>,
        state_store: Arc<dyn StateStorePort>,
        launch: LaunchFailover,
        settings: ProvisioningSettings,
    ) -> Self {
        Self {
            backend,
            persist_identity: PersistProvisioningIdentity::new(state_store.clone()),
            state_store,
            launch,
            settings,
        }
    }

    pub async fn execute(&self, extras: Option<&HashMap<String, String>>) -> OrchestratorReport {
        let span = info_span!("usecase.provisioning_orchestrator.execute");
        async {
            let extras = ProvisioningExtras::from_map(extras);
            info!(
                has_device_id = extras.device_id.is_some(),
                has_customer_name = extras.customer_name.is_some(),
                has_server_url = extras.server_url.is_some(),
                "provisioning complete, starting onboarding"
            );

            let mut report = StepRecorder::default();

            report.record(steps::PERSIST_IDENTITY, self.persist(&extras).await);
            report.record(steps::APPLY_OWNER_LABELS, self.apply_owner_labels().await);
            report.record(steps::ENABLE_MANAGED_PROFILE, self.enable_profile().await);
            report.record(
                steps::SET_PERMISSION_POLICY,
                self.backend
                    .set_permission_policy(PermissionPolicy::AutoGrant)
                    .await
                    .context("failed to set auto-grant permission policy"),
            );
            report.record(steps::GRANT_CRITICAL_PERMISSIONS, self.grant_permissions().await);
            report.record(steps::ALLOW_APP_INSTALLS, self.allow_app_installs().await);

            let launch = self.launch.execute().await;
            let launch_result = match &launch {
                LaunchOutcome::LaunchFailed { reason } => Err(anyhow!("{reason}")),
                _ => Ok(()),
            };
            report.record(steps::LAUNCH_MANAGED_APP, launch_result);

            let record = self.final_record().await;
            let failed = report.steps.iter().filter(|s| !s.succeeded).count();
            info!(
                failed_steps = failed,
                is_provisioned = record.is_provisioned,
                "onboarding finished"
            );

            OrchestratorReport {
                steps: report.steps,
                record,
                launch,
            }
        }
        .instrument(span)
        .await
    }

    async fn persist(&self, extras: &ProvisioningExtras) -> anyhow::Result<()> {
        match self
            .persist_identity
            .execute(extras)
            .await
            .context("failed to persist provisioning identity")?
        {
            PersistOutcome::Skipped => debug!("identity step had nothing to write"),
            PersistOutcome::Committed { keys, .. } => debug!(?keys, "identity step committed"),
        }
        Ok(())
    }

    async fn apply_owner_labels(&self) -> anyhow::Result<()> {
        let mut errors = Vec::new();

        if self.settings.organization_name.is_empty() {
            debug!("no organization name configured, skipping organization label");
        } else if let Err(err) = self
            .backend
            .set_organization_name(&self.settings.organization_name)
            .await
        {
            errors.push(format!("organization name: {err}"));
        }

        if let Err(err) = self.backend.set_profile_name(&self.settings.profile_name).await {
            errors.push(format!("profile name: {err}"));
        }

        if !errors.is_empty() {
            bail!("{}", errors.join("; "));
        }
        Ok(())
    }

    async fn enable_profile(&self) -> anyhow::Result<()> {
        match self.backend.enable_profile().await {
            Ok(()) => Ok(()),
            Err(BackendError::AlreadyEnabled) => {
                debug!("managed profile already enabled");
                Ok(())
            }
            Err(err) => Err(err).context("failed to enable managed profile"),
        }
    }

    async fn grant_permissions(&self) -> anyhow::Result<()> {
        let total = self.settings.critical_permissions.len();
        let mut failures = Vec::new();

        for permission in &self.settings.critical_permissions {
            if let Err(err) = self
                .backend
                .grant_permission(&self.settings.package_name, permission)
                .await
            {
                warn!(%permission, error = %err, "permission grant failed");
                failures.push(format!("{permission}: {err}"));
            }
        }

        if !failures.is_empty() {
            bail!(
                "granted {} of {}: {}",
                total - failures.len(),
                total,
                failures.join("; ")
            );
        }
        Ok(())
    }

    async fn allow_app_installs(&self) -> anyhow::Result<()> {
        let mut errors = Vec::new();
        for restriction in [
            Restriction::DisallowInstallUnknownSources,
            Restriction::DisallowInstallApps,
        ] {
            if let Err(err) = self.backend.clear_restriction(restriction).await {
                errors.push(format!("{restriction}: {err}"));
            }
        }

        if !errors.is_empty() {
            bail!("failed to clear install restrictions: {}", errors.join("; "));
        }
        Ok(())
    }

    async fn final_record(&self) -> ProvisioningRecord {
        self.state_store.load_record().await.unwrap_or_else(|err| {
            warn!(error = %err, "failed to read back provisioning record");
            ProvisioningRecord::default()
        })
    }
}

#[derive(Default)]
struct StepRecorder {
    steps: Vec<PolicyStepResult>,
}

impl StepRecorder {
    fn record(&mut self, name: &str, result: anyhow::Result<()>) {
        match result {
            Ok(()) => {
                debug!(step = name, "onboarding step succeeded");
                self.steps.push(PolicyStepResult::ok(name));
            }
            Err(err) => {
                let detail = format!("{err:#}");
                warn!(step = name, error = %detail, "onboarding step failed, continuing");
                self.steps.push(PolicyStepResult::failed(name, detail));
            }
        }
    }
}
