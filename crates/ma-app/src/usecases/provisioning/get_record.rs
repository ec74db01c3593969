use std::sync::Arc;

use ma_core::policy::StorageError;
use ma_core::ports::StateStorePort;
use ma_core::provisioning::ProvisioningRecord;

/// Use case for reading the persisted provisioning record.
pub struct GetProvisioningRecord {
    state_store: Arc<dyn StateStorePort>,
}

impl GetProvisioningRecord {
    pub fn new(state_store: Arc<dyn StateStorePort>) -> Self {
        Self { state_store }
    }

    pub async fn execute(&self) -> Result<ProvisioningRecord, StorageError> {
        self.state_store.load_record().await
    }
}
