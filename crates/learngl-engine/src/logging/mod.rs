//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else logs through the `log` facade.

mod init;

pub use init::{init_logging, LogTarget, LoggingConfig};
