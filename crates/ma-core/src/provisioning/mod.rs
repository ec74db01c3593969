//! Provisioning domain models
//!
//! This module defines the identity snapshot persisted when a device enters
//! managed state, and the recognized attributes of the provisioning event
//! delivered by the managing authority.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the key/value namespace holding provisioning facts.
///
/// Shared with the launch/UI collaborator, which reads [`KEY_IS_PROVISIONED`]
/// to choose between first-run and managed-run presentation.
pub const PROVISIONING_NAMESPACE: &str = "CapacitorStorage";

pub const KEY_DEVICE_ID: &str = "deviceId";
pub const KEY_CUSTOMER_NAME: &str = "customerName";
pub const KEY_CUSTOM_API_URL: &str = "custom_api_url";
pub const KEY_IS_PROVISIONED: &str = "isProvisioned";

/// Provisioning event keys as delivered by the managing authority.
pub const EXTRA_DEVICE_ID: &str = "deviceId";
pub const EXTRA_CUSTOMER_NAME: &str = "customerName";
pub const EXTRA_SERVER_URL: &str = "serverUrl";

/// Persisted identity/config snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningRecord {
    /// Unique device identifier assigned by the managing server
    pub device_id: Option<String>,
    pub customer_name: Option<String>,
    /// Overrides the compiled-in default server endpoint
    pub api_base_url: Option<String>,
    /// Set once identity was persisted with a device id; never reset by the agent
    pub is_provisioned: bool,
}

impl ProvisioningRecord {
    /// Endpoint the agent should talk to: the stored override or the default.
    pub fn effective_api_url<'a>(&'a self, default_url: &'a str) -> &'a str {
        self.api_base_url.as_deref().unwrap_or(default_url)
    }
}

/// Recognized identity attributes extracted from a provisioning event.
///
/// Unrecognized keys are dropped. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningExtras {
    pub device_id: Option<String>,
    pub customer_name: Option<String>,
    pub server_url: Option<String>,
}

impl ProvisioningExtras {
    /// Extract recognized keys from the raw event bundle.
    ///
    /// An absent bundle is a valid input and yields empty extras.
    pub fn from_map(extras: Option<&HashMap<String, String>>) -> Self {
        let Some(extras) = extras else {
            return Self::default();
        };

        Self {
            device_id: extras.get(EXTRA_DEVICE_ID).cloned(),
            customer_name: extras.get(EXTRA_CUSTOMER_NAME).cloned(),
            server_url: extras.get(EXTRA_SERVER_URL).cloned(),
        }
    }

    /// True when no recognized identity attribute is present.
    pub fn is_empty(&self) -> bool {
        self.device_id.is_none() && self.customer_name.is_none() && self.server_url.is_none()
    }
}
