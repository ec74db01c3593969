//! Steady-state policy enforcement
//!
//! Operator-driven restriction changes, kiosk pinning and immediate lock.
//! Unlike onboarding these run on demand, possibly overlapping, so every
//! mutation of the restriction set holds the [`CustodyLock`].
//!
//! [`CustodyLock`]: crate::usecases::CustodyLock

mod apply_restrictions;
mod kiosk;
mod lock_device;
mod lock_state;

pub use apply_restrictions::{NetworkRestrictionState, PolicyEnforcer};
pub use kiosk::KioskMode;
pub use lock_device::LockDevice;
pub use lock_state::{ApplyLockState, LockStateReport};
