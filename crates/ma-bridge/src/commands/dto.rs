//! Response DTOs of the command surface. Field names are camelCase on the
//! wire.

use serde::Serialize;

use ma_core::policy::EnforcementResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Result of a bulk restriction pass, with per-setting outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforceRestrictionsResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub result: EnforcementResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraResponse {
    pub success: bool,
    pub camera_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenCaptureResponse {
    pub success: bool,
    pub screen_capture_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRestrictionsResponse {
    pub success: bool,
    pub wifi_disabled: bool,
    pub mobile_data_disabled: bool,
}
