//! `StateStorePort` adapters for the provisioning namespace.

mod file_store;
mod memory_store;

pub use file_store::FileStateStore;
pub use memory_store::InMemoryStateStore;

use std::collections::BTreeMap;

use ma_core::ports::StateValue;

/// Contents of the provisioning namespace, ordered for stable output.
pub type Namespace = BTreeMap<String, StateValue>;
