//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it onto [`AgentConfig`].
//! Pure data loading: whatever is in the file is accepted, missing values
//! fall back to the compiled-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ma_core::config::AgentConfig;

/// Directory name used under the platform data dir when no state dir is
/// configured.
pub const DEFAULT_STATE_DIR_NAME: &str = "mdm-agent";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or a section
/// has the wrong shape.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AgentConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AgentConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Directory holding the provisioning namespace and the device model.
///
/// An explicit override wins, then `storage.state_dir`, then the platform
/// local data dir.
pub fn resolve_state_dir(
    config: &AgentConfig,
    override_dir: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if !config.state_dir.as_os_str().is_empty() {
        return Ok(config.state_dir.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(DEFAULT_STATE_DIR_NAME))
        .context("Failed to resolve local data directory")
}
