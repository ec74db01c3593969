use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};

use ma_core::launch::{LaunchError, LaunchOutcome};
use ma_core::ports::LauncherPort;

use super::PendingDismissals;

/// Use case bringing the managed application to the foreground.
///
/// Tries the primary surface first, then any launchable entry point
/// registered for the managed package. A launch failure is reported as
/// [`LaunchOutcome::LaunchFailed`] and never escalated.
///
/// After a successful launch the onboarding surface is dismissed once, on a
/// task tracked by [`PendingDismissals`], after `dismiss_delay`.
#[derive(Clone)]
pub struct LaunchFailover {
    launcher: Arc<dyn LauncherPort>,
    package_name: String,
    dismiss_delay: Duration,
    dismissals: PendingDismissals,
}

impl LaunchFailover {
    pub fn new(
        launcher: Arc<dyn LauncherPort>,
        package_name: impl Into<String>,
        dismiss_delay: Duration,
    ) -> Self {
        Self {
            launcher,
            package_name: package_name.into(),
            dismiss_delay,
            dismissals: PendingDismissals::new(),
        }
    }

    /// Track scheduled dismissals in a set shared with the caller.
    pub fn with_dismissals(mut self, dismissals: PendingDismissals) -> Self {
        self.dismissals = dismissals;
        self
    }

    pub fn dismissals(&self) -> &PendingDismissals {
        &self.dismissals
    }

    pub async fn execute(&self) -> LaunchOutcome {
        let span = info_span!("usecase.launch_failover.execute", package = %self.package_name);
        async {
            let outcome = match self.launcher.launch_primary().await {
                Ok(()) => {
                    info!("primary surface launched");
                    LaunchOutcome::Primary
                }
                Err(primary_err) => {
                    warn!(error = %primary_err, "primary launch failed, resolving package entry");
                    match self.launch_fallback().await {
                        Ok(()) => {
                            info!("fallback entry launched");
                            LaunchOutcome::Fallback
                        }
                        Err(fallback_err) => {
                            warn!(error = %fallback_err, "fallback launch failed");
                            LaunchOutcome::LaunchFailed {
                                reason: format!(
                                    "primary: {primary_err}; fallback: {fallback_err}"
                                ),
                            }
                        }
                    }
                }
            };

            if outcome.is_launched() {
                self.schedule_dismiss();
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn launch_fallback(&self) -> Result<(), LaunchError> {
        let entry = self
            .launcher
            .resolve_launch_entry(&self.package_name)
            .await?
            .ok_or_else(|| {
                LaunchError::Resolution(format!(
                    "no launchable entry for {}",
                    self.package_name
                ))
            })?;
        debug!(component = %entry.component, "resolved launch entry");
        self.launcher.launch_entry(&entry).await
    }

    fn schedule_dismiss(&self) {
        let launcher = self.launcher.clone();
        let delay = self.dismiss_delay;
        self.dismissals.spawn(
            async move {
                tokio::time::sleep(delay).await;
                match launcher.dismiss_onboarding_surface().await {
                    Ok(()) => debug!("onboarding surface dismissed"),
                    Err(err) => warn!(error = %err, "failed to dismiss onboarding surface"),
                }
            }
            .instrument(info_span!("launch.dismiss_onboarding")),
        );
    }
}
