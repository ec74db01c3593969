//! Restriction and kiosk commands.

use tracing::{info_span, Instrument};

use ma_app::usecases::LockStateReport;
use ma_core::policy::RestrictionSet;

use super::dto::{
    CameraResponse, EnforceRestrictionsResponse, NetworkRestrictionsResponse,
    ScreenCaptureResponse, SuccessResponse,
};
use super::error::CommandError;
use crate::bootstrap::AgentRuntime;

/// Apply a restriction set; `None` applies the lockdown preset.
///
/// Individual setting failures do not reject the command. They are listed
/// in the response and flip `success` to `false`.
pub async fn enforce_device_restrictions(
    runtime: &AgentRuntime,
    config: Option<RestrictionSet>,
) -> Result<EnforceRestrictionsResponse, CommandError> {
    let span = info_span!("command.policy.enforce_device_restrictions");
    async {
        let config = config.unwrap_or_else(RestrictionSet::lockdown);
        let result = runtime
            .usecases()
            .policy_enforcer()
            .apply_restrictions(&config)
            .await
            .map_err(|e| CommandError::from(e).context("Failed to enforce restrictions"))?;

        let failed: Vec<String> = result.failures().map(|o| o.setting.to_string()).collect();
        let message = if failed.is_empty() {
            "Device restrictions enforced".to_string()
        } else {
            format!(
                "{} of {} settings not applied: {}",
                failed.len(),
                result.outcomes.len(),
                failed.join(", ")
            )
        };

        Ok(EnforceRestrictionsResponse {
            success: failed.is_empty(),
            message,
            result,
        })
    }
    .instrument(span)
    .await
}

/// `disable` defaults to `true`.
pub async fn set_camera_disabled(
    runtime: &AgentRuntime,
    disable: Option<bool>,
) -> Result<CameraResponse, CommandError> {
    let disable = disable.unwrap_or(true);
    let span = info_span!("command.policy.set_camera_disabled", disable);
    async {
        runtime
            .usecases()
            .policy_enforcer()
            .set_camera_disabled(disable)
            .await?;
        Ok(CameraResponse {
            success: true,
            camera_disabled: disable,
        })
    }
    .instrument(span)
    .await
}

/// `disable` defaults to `true`.
pub async fn set_screen_capture_disabled(
    runtime: &AgentRuntime,
    disable: Option<bool>,
) -> Result<ScreenCaptureResponse, CommandError> {
    let disable = disable.unwrap_or(true);
    let span = info_span!("command.policy.set_screen_capture_disabled", disable);
    async {
        runtime
            .usecases()
            .policy_enforcer()
            .set_screen_capture_disabled(disable)
            .await?;
        Ok(ScreenCaptureResponse {
            success: true,
            screen_capture_disabled: disable,
        })
    }
    .instrument(span)
    .await
}

/// Both toggles default to `false`.
pub async fn set_network_restrictions(
    runtime: &AgentRuntime,
    disable_wifi: Option<bool>,
    disable_mobile_data: Option<bool>,
) -> Result<NetworkRestrictionsResponse, CommandError> {
    let disable_wifi = disable_wifi.unwrap_or(false);
    let disable_mobile_data = disable_mobile_data.unwrap_or(false);
    let span = info_span!(
        "command.policy.set_network_restrictions",
        disable_wifi,
        disable_mobile_data
    );
    async {
        let state = runtime
            .usecases()
            .policy_enforcer()
            .set_network_restrictions(disable_wifi, disable_mobile_data)
            .await
            .map_err(|e| CommandError::from(e).context("Failed to set network restrictions"))?;
        Ok(NetworkRestrictionsResponse {
            success: true,
            wifi_disabled: state.wifi_disabled,
            mobile_data_disabled: state.mobile_data_disabled,
        })
    }
    .instrument(span)
    .await
}

pub async fn enter_kiosk_mode(runtime: &AgentRuntime) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.policy.enter_kiosk_mode");
    async {
        runtime.usecases().kiosk_mode().enter().await?;
        Ok(SuccessResponse::ok("Kiosk mode entered"))
    }
    .instrument(span)
    .await
}

pub async fn exit_kiosk_mode(runtime: &AgentRuntime) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.policy.exit_kiosk_mode");
    async {
        runtime.usecases().kiosk_mode().exit().await?;
        Ok(SuccessResponse::ok("Kiosk mode exited"))
    }
    .instrument(span)
    .await
}

/// Reconcile with a remotely decided lock state.
pub async fn apply_lock_state(
    runtime: &AgentRuntime,
    locked: bool,
) -> Result<LockStateReport, CommandError> {
    let span = info_span!("command.policy.apply_lock_state", locked);
    async {
        Ok(runtime
            .usecases()
            .apply_lock_state()
            .execute(locked)
            .await?)
    }
    .instrument(span)
    .await
}
