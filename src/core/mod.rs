//! Runtime core: supervision and exit handling.
//!
//! This module contains the implementation of one supervised run. The public
//! API is re-exported from the crate root.
//!
//! Internal modules:
//! - [`runner`]: runs one task, turns panics into errors, logs the terminal state;
//! - [`group`]: runs tasks under one cancellation scope, resolves the outcome;
//! - [`signals`]: the `"signals"` task watching SIGINT/SIGTERM;
//! - [`app`]: the application task around the entry point;
//! - [`exit`]: maps the outcome to an exit action;
//! - [`launcher`]: wires context, container, tasks and exit translation.

mod app;
mod exit;
mod group;
mod launcher;
mod runner;
mod signals;

pub use app::{AppTask, Entry};
pub use exit::{translate, ExitAction, EXIT_FAILURE, EXIT_HELP};
pub use group::Group;
pub use launcher::{Launcher, LauncherBuilder, Report};
pub use signals::{Signal, SignalSource, SignalWatcher, SIGNALS_TASK};
