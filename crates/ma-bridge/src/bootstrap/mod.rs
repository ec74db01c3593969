pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_state_dir};
pub use runtime::{AgentRuntime, UseCases};
pub use wiring::{file_state_store, wire_simulated, SimulatedWiring};
