//! Managed device agent application layer
//!
//! This crate contains the provisioning, enforcement and audit use cases.
//! Every use case depends only on the ports declared in `ma-core`.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
