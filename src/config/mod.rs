// This module re-exports the configuration pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod config;
pub mod logging;

pub use config::*;
pub use logging::*;
