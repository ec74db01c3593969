//! # Dependency Injection
//!
//! Builds concrete adapters and groups them into [`AppDeps`]. This is the
//! only place depending on `ma-infra`, `ma-platform` and `ma-app` at once.
//! Assembly only: no business decisions happen here.

use std::path::Path;
use std::sync::Arc;

use ma_app::AppDeps;
use ma_core::config::AgentConfig;
use ma_core::ports::StateStorePort;
use ma_infra::FileStateStore;
use ma_platform::{
    SimulatedDevice, SimulatedDeviceSettings, SimulatedLauncher, SimulatedPolicyBackend,
    SimulatedTelephony,
};

/// Dependencies wired against a simulated device.
///
/// The device handle is kept so the caller can persist its model after
/// commands ran.
pub struct SimulatedWiring {
    pub device: SimulatedDevice,
    pub deps: AppDeps,
}

/// Wire every port to the simulated device and the given state store.
pub fn wire_simulated(
    config: &AgentConfig,
    device: SimulatedDevice,
    state_store: Arc<dyn StateStorePort>,
) -> SimulatedWiring {
    let deps = AppDeps {
        policy_backend: Arc::new(SimulatedPolicyBackend::new(device.clone())),
        device_settings: Arc::new(SimulatedDeviceSettings::new(device.clone())),
        telephony: Arc::new(SimulatedTelephony::new(device.clone())),
        state_store,
        launcher: Arc::new(SimulatedLauncher::new(
            device.clone(),
            config.package_name.clone(),
        )),
    };
    SimulatedWiring { device, deps }
}

/// File-backed provisioning namespace under `state_dir`.
pub fn file_state_store(state_dir: &Path) -> Arc<dyn StateStorePort> {
    Arc::new(FileStateStore::with_base_dir(state_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ma_infra::InMemoryStateStore;

    #[tokio::test]
    async fn test_wired_ports_share_one_device() {
        let device = SimulatedDevice::managed();
        let wiring = wire_simulated(
            &AgentConfig::default(),
            device.clone(),
            Arc::new(InMemoryStateStore::new()),
        );

        wiring.deps.policy_backend.lock_now().await.unwrap();
        wiring.deps.launcher.launch_primary().await.unwrap();

        let model = device.snapshot();
        assert!(model.screen_locked);
        assert_eq!(
            model.foreground.as_deref(),
            Some(AgentConfig::default().package_name.as_str())
        );
    }
}
