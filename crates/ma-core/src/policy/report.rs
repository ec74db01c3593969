use serde::Serialize;

use super::Restriction;
use crate::launch::LaunchOutcome;
use crate::provisioning::ProvisioningRecord;

/// Diagnostic record of one onboarding step. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStepResult {
    pub step_name: String,
    pub succeeded: bool,
    pub error_detail: Option<String>,
}

impl PolicyStepResult {
    pub fn ok(step_name: impl Into<String>) -> Self {
        Self {
            step_name: step_name.into(),
            succeeded: true,
            error_detail: None,
        }
    }

    pub fn failed(step_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step_name: step_name.into(),
            succeeded: false,
            error_detail: Some(detail.into()),
        }
    }
}

/// Outcome of one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorReport {
    /// Step results in execution order, failures included
    pub steps: Vec<PolicyStepResult>,
    pub record: ProvisioningRecord,
    pub launch: LaunchOutcome,
}

impl OrchestratorReport {
    pub fn step(&self, name: &str) -> Option<&PolicyStepResult> {
        self.steps.iter().find(|s| s.step_name == name)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &PolicyStepResult> {
        self.steps.iter().filter(|s| !s.succeeded)
    }
}

/// Individual platform setting touched by an enforcement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum EnforcedSetting {
    Restriction(Restriction),
    Camera,
    ScreenCapture,
    LockTaskPackages,
}

impl std::fmt::Display for EnforcedSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restriction(r) => write!(f, "{r}"),
            Self::Camera => f.write_str("cameraDisabled"),
            Self::ScreenCapture => f.write_str("screenCaptureDisabled"),
            Self::LockTaskPackages => f.write_str("kioskLockTask"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionOutcome {
    pub setting: EnforcedSetting,
    pub enabled: bool,
    pub succeeded: bool,
    pub error_detail: Option<String>,
}

/// Per-setting outcomes of a bulk enforcement pass, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementResult {
    pub outcomes: Vec<RestrictionOutcome>,
}

impl EnforcementResult {
    pub fn record(&mut self, setting: EnforcedSetting, enabled: bool, error: Option<String>) {
        self.outcomes.push(RestrictionOutcome {
            setting,
            enabled,
            succeeded: error.is_none(),
            error_detail: error,
        });
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RestrictionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    pub fn lock_task_applied(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.setting == EnforcedSetting::LockTaskPackages && o.succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforcement_result_tracks_failures() {
        let mut result = EnforcementResult::default();
        result.record(
            EnforcedSetting::Restriction(Restriction::DisallowSafeBoot),
            true,
            None,
        );
        result.record(EnforcedSetting::Camera, true, Some("denied".into()));

        assert!(!result.all_succeeded());
        assert_eq!(result.failures().count(), 1);
        assert!(!result.lock_task_applied());
    }

    #[test]
    fn test_report_step_lookup() {
        let report = OrchestratorReport {
            steps: vec![
                PolicyStepResult::ok("persist_identity"),
                PolicyStepResult::failed("apply_owner_labels", "boom"),
            ],
            record: ProvisioningRecord::default(),
            launch: LaunchOutcome::Primary,
        };

        assert!(report.step("persist_identity").unwrap().succeeded);
        assert_eq!(report.failed_steps().count(), 1);
        assert!(report.step("missing").is_none());
    }
}
