//! Logging provider.
//!
//! The core logs through [`tracing`]; this module owns the two pieces that sit
//! around it:
//! - [`LogConfig`] / [`LogArgs`]: output format and level, with command-line overrides;
//! - [`Logger`]: the handle bound into every [`Context`](crate::Context), which names
//!   records after the application and flushes output on [`Logger::sync`].
//!
//! [`install`] sets the process-wide subscriber once; later calls are no-ops.

mod config;
mod logger;

pub use config::{LogArgs, LogConfig, LogFormat};
pub use logger::{install, Logger};
