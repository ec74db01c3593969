//! Restriction enforcement, custody and tamper audit against the simulated
//! device.

use std::sync::Arc;

use ma_app::usecases::{
    ApplyLockState, CheckTamperStatus, CustodyLock, KioskMode, PolicyEnforcer, ReleaseOwnership,
    WipeDevice,
};
use ma_core::policy::{PolicyError, ReleaseError, Restriction, RestrictionSet, WipeError};
use ma_platform::{DeviceModel, SimulatedDevice, SimulatedDeviceSettings, SimulatedPolicyBackend};

const PACKAGE: &str = "com.nama.emi.app";

fn enforcer(device: &SimulatedDevice, custody: &CustodyLock) -> PolicyEnforcer {
    PolicyEnforcer::new(
        Arc::new(SimulatedPolicyBackend::new(device.clone())),
        custody.clone(),
        PACKAGE,
    )
}

#[tokio::test]
async fn non_owner_apply_performs_no_mutation() {
    let device = SimulatedDevice::new(DeviceModel {
        is_admin_active: true,
        ..DeviceModel::default()
    });

    let result = enforcer(&device, &CustodyLock::new())
        .apply_restrictions(&RestrictionSet::lockdown())
        .await;

    assert_eq!(result, Err(PolicyError::NotOwner));
    assert_eq!(device.calls(), vec!["is_device_owner"]);
}

#[tokio::test]
async fn network_restrictions_add_wifi_and_clear_mobile() {
    let device = SimulatedDevice::managed();
    device.update(|m| {
        m.restrictions.insert(Restriction::DisallowConfigMobileNetworks);
    });

    let state = enforcer(&device, &CustodyLock::new())
        .set_network_restrictions(true, false)
        .await
        .unwrap();

    assert!(state.wifi_disabled);
    assert!(!state.mobile_data_disabled);
    let restrictions = device.snapshot().restrictions;
    assert!(restrictions.contains(&Restriction::DisallowConfigWifi));
    assert!(!restrictions.contains(&Restriction::DisallowConfigMobileNetworks));
}

#[tokio::test]
async fn applying_twice_yields_same_device_state() {
    let device = SimulatedDevice::managed();
    let enforcer = enforcer(&device, &CustodyLock::new());
    let config = RestrictionSet {
        camera_disabled: Some(true),
        ..RestrictionSet::lockdown()
    };

    enforcer.apply_restrictions(&config).await.unwrap();
    let first = device.snapshot();
    enforcer.apply_restrictions(&config).await.unwrap();

    assert_eq!(device.snapshot(), first);
    assert!(first.camera_disabled);
    assert_eq!(first.lock_task_packages, vec![PACKAGE.to_string()]);
}

#[tokio::test]
async fn single_field_change_leaves_other_restrictions() {
    let device = SimulatedDevice::managed();
    let enforcer = enforcer(&device, &CustodyLock::new());
    enforcer
        .apply_restrictions(&RestrictionSet::lockdown())
        .await
        .unwrap();

    enforcer
        .apply_restrictions(&RestrictionSet {
            disallow_safe_boot: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let restrictions = device.snapshot().restrictions;
    assert!(!restrictions.contains(&Restriction::DisallowSafeBoot));
    assert!(restrictions.contains(&Restriction::DisallowFactoryReset));
    assert_eq!(restrictions.len(), 5);
}

#[tokio::test]
async fn concurrent_changes_do_not_interleave() {
    let device = SimulatedDevice::managed();
    let custody = CustodyLock::new();
    let first = enforcer(&device, &custody);
    let second = enforcer(&device, &custody);
    let lockdown = RestrictionSet::lockdown();
    let network = RestrictionSet {
        disallow_config_wifi: Some(true),
        disallow_config_mobile_networks: Some(true),
        ..Default::default()
    };

    let (a, b) = tokio::join!(
        first.apply_restrictions(&lockdown),
        second.apply_restrictions(&network)
    );
    a.unwrap();
    b.unwrap();

    // Each pass starts with its owner check; the calls of one pass must be
    // contiguous in the log.
    let calls = device.calls();
    let starts: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| *c == "is_device_owner")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(starts.len(), 2);
    let first_len = starts[1] - starts[0];
    assert!(first_len == 8 || first_len == 3, "interleaved calls: {calls:?}");
}

#[tokio::test]
async fn lock_state_pins_and_releases_kiosk() {
    let device = SimulatedDevice::managed();
    let backend = Arc::new(SimulatedPolicyBackend::new(device.clone()));
    let uc = ApplyLockState::new(
        PolicyEnforcer::new(backend.clone(), CustodyLock::new(), PACKAGE),
        KioskMode::new(backend),
    );

    uc.execute(true).await.unwrap();
    assert!(device.snapshot().lock_task_active);

    uc.execute(false).await.unwrap();
    let model = device.snapshot();
    assert!(!model.lock_task_active);
    assert!(model.restrictions.contains(&Restriction::DisallowFactoryReset));
}

#[tokio::test]
async fn wipe_then_tamper_check_reports_loss_of_control() {
    let device = SimulatedDevice::managed();
    let backend = Arc::new(SimulatedPolicyBackend::new(device.clone()));
    let tamper = CheckTamperStatus::new(
        backend.clone(),
        Arc::new(SimulatedDeviceSettings::new(device.clone())),
    );
    assert!(!tamper.execute().await.tampered);

    WipeDevice::new(backend.clone(), CustodyLock::new())
        .execute()
        .await
        .unwrap();

    assert!(device.snapshot().wiped);
    assert!(tamper.execute().await.tampered);
    assert_eq!(
        WipeDevice::new(backend, CustodyLock::new()).execute().await,
        Err(WipeError::NotAdminActive)
    );
}

#[tokio::test]
async fn release_clears_owner_and_second_release_is_rejected() {
    let device = SimulatedDevice::managed();
    let backend = Arc::new(SimulatedPolicyBackend::new(device.clone()));
    let release = ReleaseOwnership::new(backend, CustodyLock::new(), PACKAGE);

    release.execute().await.unwrap();

    assert!(!device.snapshot().is_device_owner);
    assert_eq!(release.execute().await, Err(ReleaseError::NotOwner));
}
