//! Launcher port
//!
//! Foregrounds application surfaces. Implemented by the platform layer.

use async_trait::async_trait;

use crate::launch::{LaunchEntry, LaunchError};

#[async_trait]
pub trait LauncherPort: Send + Sync {
    /// Bring the primary application surface to the foreground.
    async fn launch_primary(&self) -> Result<(), LaunchError>;

    /// Resolve any launchable entry point registered for `package`.
    async fn resolve_launch_entry(&self, package: &str)
        -> Result<Option<LaunchEntry>, LaunchError>;

    async fn launch_entry(&self, entry: &LaunchEntry) -> Result<(), LaunchError>;

    /// Tear down the onboarding surface. Dismissing twice is a no-op.
    async fn dismiss_onboarding_surface(&self) -> Result<(), LaunchError>;
}
