use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Delayed onboarding-surface dismissals still in flight.
///
/// Clones share one set. Tasks still pending when the last clone drops are
/// aborted, so the owner of the runtime must [`drain`](Self::drain) before it
/// shuts down.
#[derive(Clone, Default)]
pub struct PendingDismissals {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl PendingDismissals {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self.tasks.lock() {
            Ok(mut tasks) => {
                tasks.spawn(task);
            }
            Err(poisoned) => {
                poisoned.into_inner().spawn(task);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for every pending dismissal, including ones scheduled while
    /// draining.
    pub async fn drain(&self) {
        loop {
            let mut batch = match self.tasks.lock() {
                Ok(mut tasks) => std::mem::take(&mut *tasks),
                Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
            };
            if batch.is_empty() {
                return;
            }
            debug!(pending = batch.len(), "waiting for onboarding dismissals");
            while let Some(joined) = batch.join_next().await {
                if let Err(err) = joined {
                    warn!(error = %err, "onboarding dismissal task ended abnormally");
                }
            }
        }
    }
}
