//! # runvisor
//!
//! **runvisor** supervises the lifetime of a process: it runs the
//! application's entry point next to an OS-signal watcher, under one
//! cancellation scope, and turns whatever ends first into an exit code.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   service()/tool()
//!          │  RunConfig (mode, app name, logging)
//!          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Launcher                                                         │
//! │  - Context (CancellationToken + Logger)                           │
//! │  - Container (typed singletons, filled by `configure`)            │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Group (one cancellation scope, child of the run's Context)       │
//! │                                                                   │
//! │   ┌────────────────────────┐        ┌────────────────────────┐    │
//! │   │  AppTask ("")          │        │  SignalWatcher         │    │
//! │   │  Fail (service)        │        │  ("signals", Exit)     │    │
//! │   │  Exit (tool)           │        │  SIGINT / SIGTERM      │    │
//! │   └───────────┬────────────┘        └───────────┬────────────┘    │
//! │               └──────── first trigger ──────────┘                 │
//! │                         cancels the scope,                        │
//! │                         every task is joined                      │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼ outcome: Result<(), TaskError>
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Exit translation                                                 │
//! │  Ok / own Canceled → 0   HelpRequested → 2   other → log, 1       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / functions                        |
//! |-------------------|--------------------------------------------------------------|----------------------------------------------|
//! | **Entry points**  | Run a service or a tool as the body of `main`.               | [`service`], [`tool`]                        |
//! | **Supervision**   | Tasks under one cancellation scope, one resolved outcome.    | [`Group`], [`Launcher`], [`ExitPolicy`]      |
//! | **Context**       | Cancellation token plus application logger.                  | [`Context`], [`Logger`]                      |
//! | **Dependencies**  | Typed singletons for the entry point.                        | [`Container`]                                |
//! | **Errors**        | Typed errors for tasks and bootstrap.                        | [`TaskError`], [`RuntimeError`]              |
//! | **Exit codes**    | 0 normal, 1 application error, 2 help requested.             | [`ExitAction`]                               |
//! | **Configuration** | Mode, name and logging settings.                             | [`RunConfig`], [`LogConfig`]                 |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use runvisor::{Container, Context, TaskError};
//!
//! struct Greeting(String);
//!
//! fn main() {
//!     let argv0 = std::env::args().next().unwrap_or_default();
//!     runvisor::service(
//!         &argv0,
//!         |c: &Container| c.singleton(Greeting("hello".into())),
//!         |ctx: Context, deps: Arc<Container>| async move {
//!             let greeting = deps.require::<Greeting>()?;
//!             tracing::info!("{}", greeting.0);
//!             ctx.cancelled().await;
//!             Err::<(), _>(TaskError::Canceled)
//!         },
//!     );
//! }
//! ```
mod config;
mod container;
mod context;
mod core;
mod error;
mod logging;
mod naming;
mod policies;
mod run;
mod tasks;

// ---- Public re-exports ----

pub use config::{Mode, RunConfig};
pub use container::Container;
pub use context::Context;
pub use core::{
    translate, AppTask, Entry, ExitAction, Group, Launcher, LauncherBuilder, Report, Signal,
    SignalSource, SignalWatcher, EXIT_FAILURE, EXIT_HELP, SIGNALS_TASK,
};
pub use error::{BoxError, RuntimeError, TaskError};
pub use logging::{install as install_logging, LogArgs, LogConfig, LogFormat, Logger};
pub use naming::app_name;
pub use policies::ExitPolicy;
pub use run::{service, tool};
pub use tasks::{Task, TaskFn, TaskRef, TaskSpec};
