use serde::Serialize;
use tracing::{info, info_span, Instrument};

use ma_core::policy::{EnforcementResult, PolicyError, RestrictionSet};

use super::{KioskMode, PolicyEnforcer};

/// What [`ApplyLockState`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStateReport {
    pub locked: bool,
    /// Lockdown enforcement, present only when locking
    pub enforcement: Option<EnforcementResult>,
}

/// Reconciles the device with a remotely decided lock state.
///
/// Locking applies the lockdown preset, so the allow-list holds the managed
/// package, then pins the surface. Unlocking only unpins; restrictions stay.
pub struct ApplyLockState {
    enforcer: PolicyEnforcer,
    kiosk: KioskMode,
}

impl ApplyLockState {
    pub fn new(enforcer: PolicyEnforcer, kiosk: KioskMode) -> Self {
        Self { enforcer, kiosk }
    }

    pub async fn execute(&self, locked: bool) -> Result<LockStateReport, PolicyError> {
        let span = info_span!("usecase.apply_lock_state.execute", locked);
        async {
            if !locked {
                self.kiosk.exit().await?;
                info!("device unlocked, kiosk released");
                return Ok(LockStateReport {
                    locked,
                    enforcement: None,
                });
            }

            let enforcement = self
                .enforcer
                .apply_restrictions(&RestrictionSet::lockdown())
                .await?;
            self.kiosk.enter().await?;
            info!("device locked, kiosk enforced");

            Ok(LockStateReport {
                locked,
                enforcement: Some(enforcement),
            })
        }
        .instrument(span)
        .await
    }
}
