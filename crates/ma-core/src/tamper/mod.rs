//! Tamper detection domain model

use serde::{Deserialize, Serialize};

/// Fresh audit of whether managed policy still holds. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TamperVerdict {
    #[serde(rename = "isDeviceOwner")]
    pub is_managed_owner: bool,
    pub is_admin_active: bool,
    /// Advisory only, does not contribute to `tampered`
    pub developer_options_enabled: bool,
    /// Advisory only, does not contribute to `tampered`
    pub adb_enabled: bool,
    pub tampered: bool,
}

impl TamperVerdict {
    /// Build a verdict, deriving `tampered` from owner and admin status only.
    pub fn new(
        is_managed_owner: bool,
        is_admin_active: bool,
        developer_options_enabled: bool,
        adb_enabled: bool,
    ) -> Self {
        Self {
            is_managed_owner,
            is_admin_active,
            developer_options_enabled,
            adb_enabled,
            tampered: !is_managed_owner || !is_admin_active,
        }
    }

    /// True when either advisory debugging signal is raised.
    pub fn has_advisories(&self) -> bool {
        self.developer_options_enabled || self.adb_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tampered_when_admin_inactive_regardless_of_advisories() {
        for dev in [false, true] {
            for adb in [false, true] {
                assert!(TamperVerdict::new(true, false, dev, adb).tampered);
            }
        }
    }

    #[test]
    fn test_tampered_when_owner_lost() {
        assert!(TamperVerdict::new(false, true, false, false).tampered);
    }

    #[test]
    fn test_advisories_do_not_tamper_healthy_device() {
        let verdict = TamperVerdict::new(true, true, true, true);
        assert!(!verdict.tampered);
        assert!(verdict.has_advisories());
    }

    #[test]
    fn test_serializes_with_host_field_names() {
        let json = serde_json::to_value(TamperVerdict::new(true, true, false, true)).unwrap();
        assert_eq!(json["isDeviceOwner"], true);
        assert_eq!(json["isAdminActive"], true);
        assert_eq!(json["developerOptionsEnabled"], false);
        assert_eq!(json["adbEnabled"], true);
        assert_eq!(json["tampered"], false);
    }
}
