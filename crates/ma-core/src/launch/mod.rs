//! Launch domain models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Launchable entry point resolved for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchEntry {
    pub package: String,
    pub component: String,
}

/// How the managed app reached the foreground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum LaunchOutcome {
    /// The primary application surface was foregrounded.
    Primary,
    /// A launchable entry point resolved for the package was foregrounded.
    Fallback,
    /// Neither path worked. Reported, never escalated.
    LaunchFailed { reason: String },
}

impl LaunchOutcome {
    pub fn is_launched(&self) -> bool {
        !matches!(self, Self::LaunchFailed { .. })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("surface unavailable: {0}")]
    Unavailable(String),

    #[error("resolution failed: {0}")]
    Resolution(String),
}
