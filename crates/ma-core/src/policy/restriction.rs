use serde::{Deserialize, Serialize};

/// Named user restriction enforced platform-wide while owner status holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Restriction {
    DisallowFactoryReset,
    DisallowSafeBoot,
    DisallowAddUser,
    DisallowUsbFileTransfer,
    DisallowUninstallApps,
    DisallowModifyAccounts,
    DisallowConfigWifi,
    DisallowConfigMobileNetworks,
    DisallowInstallUnknownSources,
    DisallowInstallApps,
}

impl Restriction {
    /// Restriction key understood by the platform user manager.
    pub fn platform_key(self) -> &'static str {
        match self {
            Self::DisallowFactoryReset => "no_factory_reset",
            Self::DisallowSafeBoot => "no_safe_boot",
            Self::DisallowAddUser => "no_add_user",
            Self::DisallowUsbFileTransfer => "no_usb_file_transfer",
            Self::DisallowUninstallApps => "no_uninstall_apps",
            Self::DisallowModifyAccounts => "no_modify_accounts",
            Self::DisallowConfigWifi => "no_config_wifi",
            Self::DisallowConfigMobileNetworks => "no_config_mobile_networks",
            Self::DisallowInstallUnknownSources => "no_install_unknown_sources",
            Self::DisallowInstallApps => "no_install_apps",
        }
    }

    /// Name used in command payloads and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::DisallowFactoryReset => "disallowFactoryReset",
            Self::DisallowSafeBoot => "disallowSafeBoot",
            Self::DisallowAddUser => "disallowAddUser",
            Self::DisallowUsbFileTransfer => "disallowUsbFileTransfer",
            Self::DisallowUninstallApps => "disallowUninstallApps",
            Self::DisallowModifyAccounts => "disallowModifyAccounts",
            Self::DisallowConfigWifi => "disallowConfigWifi",
            Self::DisallowConfigMobileNetworks => "disallowConfigMobileNetworks",
            Self::DisallowInstallUnknownSources => "disallowInstallUnknownSources",
            Self::DisallowInstallApps => "disallowInstallApps",
        }
    }
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Steady-state policy configuration requested by an operator.
///
/// `None` leaves the corresponding platform setting untouched, so a set that
/// changes a single field never touches unrelated restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestrictionSet {
    pub disallow_factory_reset: Option<bool>,
    pub disallow_safe_boot: Option<bool>,
    pub disallow_add_user: Option<bool>,
    pub disallow_usb_file_transfer: Option<bool>,
    pub disallow_uninstall_apps: Option<bool>,
    pub disallow_modify_accounts: Option<bool>,
    pub disallow_config_wifi: Option<bool>,
    pub disallow_config_mobile_networks: Option<bool>,
    pub camera_disabled: Option<bool>,
    pub screen_capture_disabled: Option<bool>,
    /// Pin the lock-task allow-list to the managed package (`false` empties it)
    pub kiosk_lock_task: Option<bool>,
}

impl RestrictionSet {
    /// The historical "enforce device restrictions" preset: the six hardening
    /// restrictions on and the kiosk allow-list pinned to the managed package.
    pub fn lockdown() -> Self {
        Self {
            disallow_factory_reset: Some(true),
            disallow_safe_boot: Some(true),
            disallow_add_user: Some(true),
            disallow_usb_file_transfer: Some(true),
            disallow_uninstall_apps: Some(true),
            disallow_modify_accounts: Some(true),
            kiosk_lock_task: Some(true),
            ..Self::default()
        }
    }

    /// Requested user restrictions in application order.
    pub fn user_restrictions(&self) -> Vec<(Restriction, bool)> {
        [
            (Restriction::DisallowFactoryReset, self.disallow_factory_reset),
            (Restriction::DisallowSafeBoot, self.disallow_safe_boot),
            (Restriction::DisallowAddUser, self.disallow_add_user),
            (Restriction::DisallowUsbFileTransfer, self.disallow_usb_file_transfer),
            (Restriction::DisallowUninstallApps, self.disallow_uninstall_apps),
            (Restriction::DisallowModifyAccounts, self.disallow_modify_accounts),
            (Restriction::DisallowConfigWifi, self.disallow_config_wifi),
            (
                Restriction::DisallowConfigMobileNetworks,
                self.disallow_config_mobile_networks,
            ),
        ]
        .into_iter()
        .filter_map(|(restriction, enabled)| enabled.map(|enabled| (restriction, enabled)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
