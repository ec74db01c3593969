use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ma_core::policy::StorageError;
use ma_core::ports::{StateBatch, StateStorePort, StateValue};

use super::Namespace;

/// In-process namespace with switchable read/write failures.
///
/// Backs ephemeral CLI runs and tests that simulate a storage outage.
#[derive(Default)]
pub struct InMemoryStateStore {
    entries: Mutex<Namespace>,
    fail_reads: AtomicBool,
    fail_commits: AtomicBool,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (String, StateValue)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Namespace {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl StateStorePort for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<StateValue>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read("injected read failure".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned())
    }

    async fn commit(&self, batch: StateBatch) -> Result<(), StorageError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StorageError::Write("injected write failure".into()));
        }
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.extend(batch.into_writes());
        Ok(())
    }
}
