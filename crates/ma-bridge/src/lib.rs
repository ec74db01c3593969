//! # ma-bridge
//!
//! Host-facing layer of the managed device agent: bootstrap (configuration,
//! tracing, dependency wiring) and the command surface the UI/automation
//! collaborator calls.

pub mod bootstrap;
pub mod commands;

pub use bootstrap::{AgentRuntime, UseCases};
pub use commands::error::CommandError;
