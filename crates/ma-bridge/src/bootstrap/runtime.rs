//! Agent runtime and the use case accessor.

use std::sync::Arc;

use ma_app::usecases::{
    ApplyLockState, CheckTamperStatus, CustodyLock, GetAdminStatus, GetProvisioningRecord,
    GetSimInfo, KioskMode, LaunchFailover, LifecycleDispatcher, LockDevice, PendingDismissals,
    PolicyEnforcer, ProvisioningOrchestrator, ProvisioningSettings, ReleaseOwnership,
    RequestAdminElevation, TamperMonitor, WipeDevice,
};
use ma_app::AppDeps;
use ma_core::config::AgentConfig;

/// Wired dependencies plus the state shared across commands.
///
/// One runtime serves one admin identity, so it owns the single
/// [`CustodyLock`] every custody-sensitive use case is built with. It also
/// tracks the onboarding dismissals launches leave behind.
pub struct AgentRuntime {
    pub deps: AppDeps,
    config: AgentConfig,
    custody: CustodyLock,
    dismissals: PendingDismissals,
}

impl AgentRuntime {
    pub fn new(deps: AppDeps, config: AgentConfig) -> Self {
        Self {
            deps,
            config,
            custody: CustodyLock::new(),
            dismissals: PendingDismissals::new(),
        }
    }

    /// Wait until every scheduled onboarding dismissal has run. Call before
    /// shutting the runtime down.
    pub async fn drain_pending_dismissals(&self) {
        self.dismissals.drain().await;
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Use case accessor: builds use cases from the runtime's ports on demand.
pub struct UseCases<'a> {
    runtime: &'a AgentRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AgentRuntime) -> Self {
        Self { runtime }
    }

    fn deps(&self) -> &AppDeps {
        &self.runtime.deps
    }

    fn config(&self) -> &AgentConfig {
        &self.runtime.config
    }

    pub fn launch_failover(&self) -> LaunchFailover {
        LaunchFailover::new(
            self.deps().launcher.clone(),
            self.config().package_name.clone(),
            self.config().dismiss_delay(),
        )
        .with_dismissals(self.runtime.dismissals.clone())
    }

    pub fn provisioning_orchestrator(&self) -> ProvisioningOrchestrator {
        ProvisioningOrchestrator::new(
            self.deps().policy_backend.clone(),
            self.deps().state_store.clone(),
            self.launch_failover(),
            ProvisioningSettings::from_config(self.config()),
        )
    }

    pub fn lifecycle_dispatcher(&self) -> LifecycleDispatcher {
        LifecycleDispatcher::new(
            Arc::new(self.provisioning_orchestrator()),
            self.launch_failover(),
            self.check_tamper_status(),
        )
    }

    pub fn get_provisioning_record(&self) -> GetProvisioningRecord {
        GetProvisioningRecord::new(self.deps().state_store.clone())
    }

    pub fn policy_enforcer(&self) -> PolicyEnforcer {
        PolicyEnforcer::new(
            self.deps().policy_backend.clone(),
            self.runtime.custody.clone(),
            self.config().package_name.clone(),
        )
    }

    pub fn kiosk_mode(&self) -> KioskMode {
        KioskMode::new(self.deps().policy_backend.clone())
    }

    pub fn apply_lock_state(&self) -> ApplyLockState {
        ApplyLockState::new(self.policy_enforcer(), self.kiosk_mode())
    }

    pub fn lock_device(&self) -> LockDevice {
        LockDevice::new(self.deps().policy_backend.clone())
    }

    pub fn check_tamper_status(&self) -> CheckTamperStatus {
        CheckTamperStatus::new(
            self.deps().policy_backend.clone(),
            self.deps().device_settings.clone(),
        )
    }

    /// Spawn the periodic tamper audit on the current runtime.
    pub fn start_tamper_monitor(&self) -> TamperMonitor {
        TamperMonitor::spawn(
            self.check_tamper_status(),
            self.config().tamper_check_interval(),
        )
    }

    pub fn wipe_device(&self) -> WipeDevice {
        WipeDevice::new(
            self.deps().policy_backend.clone(),
            self.runtime.custody.clone(),
        )
    }

    pub fn release_ownership(&self) -> ReleaseOwnership {
        ReleaseOwnership::new(
            self.deps().policy_backend.clone(),
            self.runtime.custody.clone(),
            self.config().package_name.clone(),
        )
    }

    pub fn get_admin_status(&self) -> GetAdminStatus {
        GetAdminStatus::new(self.deps().policy_backend.clone())
    }

    pub fn request_admin_elevation(&self) -> RequestAdminElevation {
        RequestAdminElevation::new(
            self.deps().policy_backend.clone(),
            self.config().admin_explanation.clone(),
        )
    }

    pub fn get_sim_info(&self) -> GetSimInfo {
        GetSimInfo::new(self.deps().telephony.clone())
    }
}
