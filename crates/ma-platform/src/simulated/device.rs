//! Shared state of a simulated managed device.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use ma_core::policy::{BackendError, PermissionPolicy, Restriction};

/// Everything the simulated device-policy service knows about the handset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceModel {
    pub is_device_owner: bool,
    pub is_admin_active: bool,
    pub profile_enabled: bool,
    pub organization_name: Option<String>,
    pub profile_name: Option<String>,
    pub permission_policy: Option<PermissionPolicy>,
    pub granted_permissions: BTreeSet<String>,
    pub restrictions: BTreeSet<Restriction>,
    pub camera_disabled: bool,
    pub screen_capture_disabled: bool,
    pub lock_task_packages: Vec<String>,
    pub lock_task_active: bool,
    pub screen_locked: bool,
    pub wiped: bool,
    pub admin_prompts: u32,

    pub developer_options_enabled: bool,
    pub adb_enabled: bool,
    pub sim_operator: Option<String>,
    pub network_operator: Option<String>,

    /// Whether an activity is attached to run lock task from
    pub has_foreground_surface: bool,
    pub primary_surface_available: bool,
    /// Launchable component per package
    pub launch_entries: BTreeMap<String, String>,
    pub foreground: Option<String>,
    pub onboarding_surface_visible: bool,
}

impl Default for DeviceModel {
    fn default() -> Self {
        Self {
            is_device_owner: false,
            is_admin_active: false,
            profile_enabled: false,
            organization_name: None,
            profile_name: None,
            permission_policy: None,
            granted_permissions: BTreeSet::new(),
            restrictions: BTreeSet::new(),
            camera_disabled: false,
            screen_capture_disabled: false,
            lock_task_packages: Vec::new(),
            lock_task_active: false,
            screen_locked: false,
            wiped: false,
            admin_prompts: 0,
            developer_options_enabled: false,
            adb_enabled: false,
            sim_operator: None,
            network_operator: None,
            has_foreground_surface: true,
            primary_surface_available: true,
            launch_entries: BTreeMap::new(),
            foreground: None,
            onboarding_surface_visible: true,
        }
    }
}

impl DeviceModel {
    /// A freshly provisioned handset where the agent holds owner and admin.
    pub fn managed() -> Self {
        Self {
            is_device_owner: true,
            is_admin_active: true,
            ..Self::default()
        }
    }
}

/// Handle to a simulated device, shared by all simulated adapters.
///
/// Records every port call by operation name and lets tests inject a
/// failure for any operation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDevice {
    model: Arc<Mutex<DeviceModel>>,
    faults: Arc<Mutex<HashMap<String, BackendError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl SimulatedDevice {
    pub fn new(model: DeviceModel) -> Self {
        Self {
            model: Arc::new(Mutex::new(model)),
            ..Self::default()
        }
    }

    pub fn managed() -> Self {
        Self::new(DeviceModel::managed())
    }

    /// Load a persisted model, or start from `DeviceModel::managed()` when
    /// the file does not exist yet.
    pub async fn load(path: &Path) -> Result<Self> {
        let model = match fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parse device model failed: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DeviceModel::managed(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read device model failed: {}", path.display()))
            }
        };
        Ok(Self::new(model))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create device dir failed: {}", dir.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&self.snapshot()).context("serialize device model failed")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("write device model failed: {}", path.display()))
    }

    pub fn snapshot(&self) -> DeviceModel {
        self.model_guard().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut DeviceModel)) {
        f(&mut self.model_guard());
    }

    /// Make every later call of `operation` fail with `err`.
    pub fn fail_on(&self, operation: &str, err: BackendError) {
        lock(&self.faults).insert(operation.to_string(), err);
    }

    pub fn clear_fault(&self, operation: &str) {
        lock(&self.faults).remove(operation);
    }

    /// Operation names in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.calls).iter().filter(|c| *c == operation).count()
    }

    /// Record a call and return the injected fault for it, if any.
    pub(crate) fn enter(&self, operation: &str) -> Result<(), BackendError> {
        lock(&self.calls).push(operation.to_string());
        match lock(&self.faults).get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub(crate) fn model_guard(&self) -> MutexGuard<'_, DeviceModel> {
        lock(&self.model)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_model_file_starts_managed() {
        let temp_dir = TempDir::new().unwrap();

        let device = SimulatedDevice::load(&temp_dir.path().join("device.json"))
            .await
            .unwrap();

        assert_eq!(device.snapshot(), DeviceModel::managed());
    }

    #[tokio::test]
    async fn test_save_and_load_keep_restrictions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("device.json");
        let device = SimulatedDevice::managed();
        device.update(|m| {
            m.restrictions.insert(Restriction::DisallowSafeBoot);
            m.sim_operator = Some("Airtel".into());
        });

        device.save(&path).await.unwrap();
        let loaded = SimulatedDevice::load(&path).await.unwrap();

        assert_eq!(loaded.snapshot(), device.snapshot());
    }

    #[test]
    fn test_faults_and_call_log() {
        let device = SimulatedDevice::managed();
        device.fail_on("lock_now", BackendError::Failed("boom".into()));

        assert!(device.enter("lock_now").is_err());
        device.clear_fault("lock_now");
        assert!(device.enter("lock_now").is_ok());
        assert_eq!(device.call_count("lock_now"), 2);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let model: DeviceModel = serde_json::from_str(r#"{"isDeviceOwner":true}"#).unwrap();

        assert!(model.is_device_owner);
        assert!(!model.is_admin_active);
        assert!(model.primary_surface_available);
    }
}
