//! # Agent configuration
//!
//! Pure data mapping from the TOML configuration file. Values missing from
//! the file fall back to the compiled-in defaults in [`defaults`]; nothing
//! here validates paths or URLs.

pub mod defaults;

use std::path::PathBuf;
use std::time::Duration;

use defaults::*;

/// Agent configuration DTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Identity of the managed application package
    pub package_name: String,

    /// Endpoint used when no `custom_api_url` was provisioned
    pub default_api_url: String,

    /// Organization label; empty skips organization labeling
    pub organization_name: String,
    pub profile_name: String,
    pub critical_permissions: Vec<String>,
    /// Text shown by the add-device-admin prompt
    pub admin_explanation: String,

    /// Directory holding the provisioning namespace (empty = platform default)
    pub state_dir: PathBuf,

    pub dismiss_delay_ms: u64,
    pub tamper_check_interval_secs: u64,

    /// Directory for file logs (empty = stdout only)
    pub log_dir: PathBuf,
}

impl AgentConfig {
    /// Create AgentConfig from a parsed TOML value.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let u64_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };

        let critical_permissions = match toml_value
            .get("provisioning")
            .and_then(|p| p.get("critical_permissions"))
        {
            Some(value) => value
                .as_array()
                .ok_or_else(|| anyhow::anyhow!("provisioning.critical_permissions must be an array"))?
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            None => default_permissions(),
        };

        Ok(Self {
            package_name: str_at("agent", "package_name")
                .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string()),
            default_api_url: str_at("server", "default_api_url")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            organization_name: str_at("provisioning", "organization_name").unwrap_or_default(),
            profile_name: str_at("provisioning", "profile_name")
                .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()),
            critical_permissions,
            admin_explanation: str_at("provisioning", "admin_explanation")
                .unwrap_or_else(|| DEFAULT_ADMIN_EXPLANATION.to_string()),
            state_dir: PathBuf::from(str_at("storage", "state_dir").unwrap_or_default()),
            dismiss_delay_ms: u64_at("launch", "dismiss_delay_ms")
                .unwrap_or(DEFAULT_DISMISS_DELAY_MS),
            tamper_check_interval_secs: u64_at("tamper", "check_interval_secs")
                .unwrap_or(DEFAULT_TAMPER_CHECK_INTERVAL_SECS),
            log_dir: PathBuf::from(str_at("logging", "log_dir").unwrap_or_default()),
        })
    }

    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    pub fn tamper_check_interval(&self) -> Duration {
        // A zero interval would spin the monitor.
        Duration::from_secs(self.tamper_check_interval_secs.max(1))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            default_api_url: DEFAULT_API_URL.to_string(),
            organization_name: String::new(),
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            critical_permissions: default_permissions(),
            admin_explanation: DEFAULT_ADMIN_EXPLANATION.to_string(),
            state_dir: PathBuf::new(),
            dismiss_delay_ms: DEFAULT_DISMISS_DELAY_MS,
            tamper_check_interval_secs: DEFAULT_TAMPER_CHECK_INTERVAL_SECS,
            log_dir: PathBuf::new(),
        }
    }
}

fn default_permissions() -> Vec<String> {
    DEFAULT_CRITICAL_PERMISSIONS
        .iter()
        .map(|p| p.to_string())
        .collect()
}
