use std::sync::Arc;

use tracing::{debug, info};

use ma_core::policy::StorageError;
use ma_core::ports::{StateBatch, StateStorePort};
use ma_core::provisioning::{
    ProvisioningExtras, KEY_CUSTOMER_NAME, KEY_CUSTOM_API_URL, KEY_DEVICE_ID, KEY_IS_PROVISIONED,
};

/// Result of persisting provisioning identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The event carried no recognized attribute; nothing was written.
    Skipped,
    Committed {
        keys: Vec<String>,
        marked_provisioned: bool,
    },
}

/// Use case writing the identity attributes of a provisioning event.
///
/// Only present attributes are written, all in one transaction. The
/// provisioned flag is staged in that same transaction, and only when a
/// device id is known, so it can never land without its identity.
pub struct PersistProvisioningIdentity {
    state_store: Arc<dyn StateStorePort>,
}

impl PersistProvisioningIdentity {
    pub fn new(state_store: Arc<dyn StateStorePort>) -> Self {
        Self { state_store }
    }

    pub async fn execute(&self, extras: &ProvisioningExtras) -> Result<PersistOutcome, StorageError> {
        if extras.is_empty() {
            debug!("no identity attributes in provisioning event");
            return Ok(PersistOutcome::Skipped);
        }

        let mut batch = StateBatch::new();
        if let Some(device_id) = &extras.device_id {
            batch.put_string(KEY_DEVICE_ID, device_id.as_str());
        }
        if let Some(customer_name) = &extras.customer_name {
            batch.put_string(KEY_CUSTOMER_NAME, customer_name.as_str());
        }
        if let Some(server_url) = &extras.server_url {
            batch.put_string(KEY_CUSTOM_API_URL, server_url.as_str());
        }

        let has_device_id = match extras.device_id {
            Some(_) => true,
            None => self.state_store.get_string(KEY_DEVICE_ID).await?.is_some(),
        };
        if has_device_id {
            batch.put_bool(KEY_IS_PROVISIONED, true);
        }

        let keys = batch.writes().iter().map(|(k, _)| k.clone()).collect();
        self.state_store.commit(batch).await?;
        info!(marked_provisioned = has_device_id, "provisioning identity persisted");

        Ok(PersistOutcome::Committed {
            keys,
            marked_provisioned: has_device_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockStore;
    use ma_core::ports::StateValue;

    fn extras(device_id: Option<&str>, customer: Option<&str>, url: Option<&str>) -> ProvisioningExtras {
        ProvisioningExtras {
            device_id: device_id.map(Into::into),
            customer_name: customer.map(Into::into),
            server_url: url.map(Into::into),
        }
    }

    #[tokio::test]
    async fn test_empty_extras_write_nothing() {
        let mut store = MockStore::new();
        store.expect_get().never();
        store.expect_commit().never();

        let uc = PersistProvisioningIdentity::new(Arc::new(store));

        assert_eq!(
            uc.execute(&ProvisioningExtras::default()).await,
            Ok(PersistOutcome::Skipped)
        );
    }

    #[tokio::test]
    async fn test_full_extras_commit_one_batch_with_flag() {
        let mut store = MockStore::new();
        store
            .expect_commit()
            .times(1)
            .withf(|batch| {
                batch.writes()
                    == [
                        (KEY_DEVICE_ID.to_string(), StateValue::Str("D100".into())),
                        (KEY_CUSTOMER_NAME.to_string(), StateValue::Str("Acme".into())),
                        (
                            KEY_CUSTOM_API_URL.to_string(),
                            StateValue::Str("https://mdm.acme.test".into()),
                        ),
                        (KEY_IS_PROVISIONED.to_string(), StateValue::Bool(true)),
                    ]
            })
            .returning(|_| Ok(()));

        let uc = PersistProvisioningIdentity::new(Arc::new(store));
        let outcome = uc
            .execute(&extras(Some("D100"), Some("Acme"), Some("https://mdm.acme.test")))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            PersistOutcome::Committed {
                marked_provisioned: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_without_any_device_id_flag_is_not_staged() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_commit()
            .withf(|batch| {
                batch.len() == 1 && batch.writes()[0].0 == KEY_CUSTOMER_NAME
            })
            .returning(|_| Ok(()));

        let uc = PersistProvisioningIdentity::new(Arc::new(store));
        let outcome = uc.execute(&extras(None, Some("Acme"), None)).await.unwrap();

        assert_eq!(
            outcome,
            PersistOutcome::Committed {
                keys: vec![KEY_CUSTOMER_NAME.to_string()],
                marked_provisioned: false,
            }
        );
    }

    #[tokio::test]
    async fn test_previously_stored_device_id_allows_flag() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(StateValue::Str("D100".into()))));
        store
            .expect_commit()
            .withf(|batch| {
                batch
                    .writes()
                    .contains(&(KEY_IS_PROVISIONED.to_string(), StateValue::Bool(true)))
            })
            .returning(|_| Ok(()));

        let uc = PersistProvisioningIdentity::new(Arc::new(store));
        let outcome = uc.execute(&extras(None, Some("Acme"), None)).await.unwrap();

        assert!(matches!(
            outcome,
            PersistOutcome::Committed {
                marked_provisioned: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_commit_failure_propagates() {
        let mut store = MockStore::new();
        store
            .expect_commit()
            .returning(|_| Err(StorageError::Write("disk full".into())));

        let uc = PersistProvisioningIdentity::new(Arc::new(store));

        assert_eq!(
            uc.execute(&extras(Some("D100"), None, None)).await,
            Err(StorageError::Write("disk full".into()))
        );
    }
}
