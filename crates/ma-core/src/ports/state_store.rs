//! State store port
//!
//! Durable flat key/value namespace for provisioning facts. Writes go through
//! a [`StateBatch`] committed as one transaction: either every staged value
//! lands or none does.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::policy::StorageError;
use crate::provisioning::{
    ProvisioningRecord, KEY_CUSTOMER_NAME, KEY_CUSTOM_API_URL, KEY_DEVICE_ID, KEY_IS_PROVISIONED,
};

/// Value stored under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Str(String),
}

/// Writes staged for a single commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateBatch {
    writes: Vec<(String, StateValue)>,
}

impl StateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.writes
            .push((key.to_string(), StateValue::Str(value.into())));
        self
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.writes.push((key.to_string(), StateValue::Bool(value)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn writes(&self) -> &[(String, StateValue)] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<(String, StateValue)> {
        self.writes
    }
}

#[async_trait]
pub trait StateStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<StateValue>, StorageError>;

    /// Apply every staged write atomically.
    async fn commit(&self, batch: StateBatch) -> Result<(), StorageError>;

    async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.get(key).await? {
            Some(StateValue::Str(value)) => Ok(Some(value)),
            Some(StateValue::Bool(_)) => Err(StorageError::Corrupt(format!(
                "expected string under {key}"
            ))),
            None => Ok(None),
        }
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        match self.get(key).await? {
            Some(StateValue::Bool(value)) => Ok(Some(value)),
            Some(StateValue::Str(_)) => {
                Err(StorageError::Corrupt(format!("expected bool under {key}")))
            }
            None => Ok(None),
        }
    }

    /// Read the provisioning snapshot out of the namespace.
    async fn load_record(&self) -> Result<ProvisioningRecord, StorageError> {
        Ok(ProvisioningRecord {
            device_id: self.get_string(KEY_DEVICE_ID).await?,
            customer_name: self.get_string(KEY_CUSTOMER_NAME).await?,
            api_base_url: self.get_string(KEY_CUSTOM_API_URL).await?,
            is_provisioned: self.get_bool(KEY_IS_PROVISIONED).await?.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mockall::mock! {
    pub StateStore {}

    #[async_trait]
    impl StateStorePort for StateStore {
        async fn get(&self, key: &str) -> Result<Option<StateValue>, StorageError>;
        async fn commit(&self, batch: StateBatch) -> Result<(), StorageError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_record_maps_namespace_keys() {
        let mut store = MockStateStore::new();
        store.expect_get().returning(|key| {
            Ok(match key {
                KEY_DEVICE_ID => Some(StateValue::Str("D100".into())),
                KEY_CUSTOM_API_URL => Some(StateValue::Str("https://mdm.acme.test".into())),
                KEY_IS_PROVISIONED => Some(StateValue::Bool(true)),
                _ => None,
            })
        });

        let record = store.load_record().await.unwrap();

        assert_eq!(record.device_id.as_deref(), Some("D100"));
        assert!(record.customer_name.is_none());
        assert_eq!(record.api_base_url.as_deref(), Some("https://mdm.acme.test"));
        assert!(record.is_provisioned);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_corrupt() {
        let mut store = MockStateStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(StateValue::Str("yes".into()))));

        let err = store.get_bool(KEY_IS_PROVISIONED).await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_state_value_json_shape() {
        let json = serde_json::to_string(&StateValue::Bool(true)).unwrap();
        assert_eq!(json, "true");
        let back: StateValue = serde_json::from_str("\"D100\"").unwrap();
        assert_eq!(back, StateValue::Str("D100".into()));
    }
}
