//! Tamper detection use cases

mod check;
mod monitor;

pub use check::CheckTamperStatus;
pub use monitor::TamperMonitor;
