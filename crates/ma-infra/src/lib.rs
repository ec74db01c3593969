pub mod state;

pub use state::{FileStateStore, InMemoryStateStore};
