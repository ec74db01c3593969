//! Command surface consumed by the UI/automation collaborator.
//!
//! Every command opens a `command.<area>.<name>` span, delegates to one use
//! case and returns a serializable DTO or a [`CommandError`]. Nothing panics
//! or throws past this boundary.

pub mod device;
pub mod dto;
pub mod error;
pub mod policy;
pub mod provisioning;
pub mod tamper;

pub use error::CommandError;
