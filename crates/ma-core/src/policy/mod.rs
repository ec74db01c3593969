//! Policy domain module.
//!
//! Restrictions, enforcement reports and the error taxonomy shared by the
//! provisioning and enforcement use cases.

mod error;
mod report;
mod restriction;

pub use error::{BackendError, PolicyError, ReleaseError, StorageError, WipeError};
pub use report::{
    EnforcedSetting, EnforcementResult, OrchestratorReport, PolicyStepResult, RestrictionOutcome,
};
pub use restriction::{Restriction, RestrictionSet};

use serde::{Deserialize, Serialize};

/// Runtime permission policy applied by the device owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionPolicy {
    Prompt,
    AutoGrant,
    AutoDeny,
}
