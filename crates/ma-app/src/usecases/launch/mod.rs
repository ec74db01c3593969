mod dismissals;
mod failover;

pub use dismissals::PendingDismissals;
pub use failover::LaunchFailover;
