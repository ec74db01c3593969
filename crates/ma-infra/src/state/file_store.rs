//! File-backed provisioning namespace
//!
//! The namespace is a single JSON object stored as
//! `<base_dir>/CapacitorStorage.json`. Commits rewrite the whole file through
//! a temporary sibling and a rename, so readers see either the previous
//! contents or the complete new contents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use ma_core::policy::StorageError;
use ma_core::ports::{StateBatch, StateStorePort, StateValue};
use ma_core::provisioning::PROVISIONING_NAMESPACE;

use super::Namespace;

pub struct FileStateStore {
    path: PathBuf,
    // Serializes read-modify-write commits within the process.
    write_lock: Mutex<()>,
}

impl FileStateStore {
    /// Create a store for the provisioning namespace under `base_dir`.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self::new(
            base_dir
                .as_ref()
                .join(format!("{PROVISIONING_NAMESPACE}.json")),
        )
    }

    /// Create a store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_namespace(&self) -> Result<Namespace> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Namespace::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read namespace failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Namespace::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse namespace failed: {}", self.path.display()))
    }

    async fn atomic_write(&self, namespace: &Namespace) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create state dir failed: {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(namespace).context("serialize namespace failed")?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("create temp namespace failed: {}", tmp_path.display()))?;
        file.write_all(content.as_bytes())
            .await
            .with_context(|| format!("write temp namespace failed: {}", tmp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("sync temp namespace failed: {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp namespace to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl StateStorePort for FileStateStore {
    async fn get(&self, key: &str) -> Result<Option<StateValue>, StorageError> {
        let mut namespace = self.read_namespace().await.map_err(read_error)?;
        Ok(namespace.remove(key))
    }

    async fn commit(&self, batch: StateBatch) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut namespace = self.read_namespace().await.map_err(read_error)?;
        let count = batch.len();
        for (key, value) in batch.into_writes() {
            namespace.insert(key, value);
        }

        self.atomic_write(&namespace)
            .await
            .map_err(|e| StorageError::Write(format!("{e:#}")))?;
        debug!(path = %self.path.display(), keys = count, "namespace committed");
        Ok(())
    }
}

fn read_error(err: anyhow::Error) -> StorageError {
    if err.is::<serde_json::Error>() {
        StorageError::Corrupt(format!("{err:#}"))
    } else {
        StorageError::Read(format!("{err:#}"))
    }
}
