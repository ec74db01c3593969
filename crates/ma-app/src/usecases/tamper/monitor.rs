use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, info_span, warn, Instrument};

use ma_core::tamper::TamperVerdict;

use super::CheckTamperStatus;

/// Periodic tamper audit.
///
/// Runs [`CheckTamperStatus`] on a fixed interval until shut down and
/// publishes the latest verdict.
pub struct TamperMonitor {
    shutdown_tx: watch::Sender<bool>,
    verdict_rx: watch::Receiver<Option<TamperVerdict>>,
    handle: JoinHandle<()>,
}

impl TamperMonitor {
    /// Spawn the monitor on the current runtime. The first check runs
    /// immediately.
    pub fn spawn(check: CheckTamperStatus, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (verdict_tx, verdict_rx) = watch::channel(None);

        let handle = tokio::spawn(
            run(check, interval, shutdown_rx, verdict_tx)
                .instrument(info_span!("tamper_monitor", interval_secs = interval.as_secs())),
        );

        Self {
            shutdown_tx,
            verdict_rx,
            handle,
        }
    }

    pub fn latest(&self) -> Option<TamperVerdict> {
        *self.verdict_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TamperVerdict>> {
        self.verdict_rx.clone()
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = self.handle.await {
            warn!(error = %err, "tamper monitor task ended abnormally");
        }
    }
}

async fn run(
    check: CheckTamperStatus,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
    verdict_tx: watch::Sender<Option<TamperVerdict>>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("tamper monitor started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let verdict = check.execute().await;
                let previous = *verdict_tx.borrow();

                if verdict.tampered {
                    warn!(
                        is_device_owner = verdict.is_managed_owner,
                        is_admin_active = verdict.is_admin_active,
                        "managed policy no longer enforced"
                    );
                }
                if previous.is_some_and(|p| p != verdict) {
                    warn!(?previous, current = ?verdict, "tamper verdict changed");
                }

                verdict_tx.send_replace(Some(verdict));
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("tamper monitor stopped");
}
