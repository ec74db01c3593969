//! Custody use cases
//!
//! High-consequence operations on the managed-owner relationship: wipe,
//! ownership release, admin status and elevation. Failures are always
//! reported to the caller.

mod admin;
mod release;
mod wipe;

pub use admin::{AdminStatus, GetAdminStatus, RequestAdminElevation};
pub use release::ReleaseOwnership;
pub use wipe::WipeDevice;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Mutual exclusion per admin identity.
///
/// Restriction changes, wipe and ownership release all hold this lock, so
/// the individual platform calls of two overlapping commands never interleave.
#[derive(Debug, Clone, Default)]
pub struct CustodyLock {
    inner: Arc<Mutex<()>>,
}

impl CustodyLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_one_lock() {
        let lock = CustodyLock::new();
        let other = lock.clone();

        let _guard = lock.acquire().await;

        assert!(other.inner.try_lock().is_err());
    }
}
