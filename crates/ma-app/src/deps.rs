//! # Application Dependencies
//!
//! Dependency grouping for use case construction. This is NOT a Builder:
//! no build steps, no defaults, no hidden logic. Just parameter grouping.

use std::sync::Arc;

use ma_core::ports::*;

/// Application dependency grouping.
///
/// All dependencies are required.
#[derive(Clone)]
pub struct AppDeps {
    // Privileged platform dependencies
    pub policy_backend: Arc<dyn PolicyBackendPort>,
    pub device_settings: Arc<dyn DeviceSettingsPort>,
    pub telephony: Arc<dyn TelephonyPort>,

    // Storage dependencies
    pub state_store: Arc<dyn StateStorePort>,

    // UI dependencies
    pub launcher: Arc<dyn LauncherPort>,
}
