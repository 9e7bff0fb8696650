//! # Process entry points.
//!
//! [`service`] and [`tool`] are meant to be the whole body of `main`:
//!
//! ```text
//! service(argv0, configure, entry)
//!   ├─► RunConfig::service(argv0)  + --log-format / --log-level from argv
//!   ├─► logging::install            (once per process)
//!   ├─► tokio runtime ─► Launcher::run(entry) ─► Report
//!   ├─► runtime dropped
//!   └─► ExitAction::apply           (return, or exit 1 / 2)
//! ```
//!
//! A bootstrap failure (bad logging flags, runtime construction) is printed
//! to stderr and exits with code 1 before any task starts.

use crate::config::RunConfig;
use crate::container::Container;
use crate::core::{Entry, ExitAction, Launcher, EXIT_FAILURE};
use crate::error::RuntimeError;
use crate::logging;

/// Runs a long-running service.
///
/// The application task runs with [`ExitPolicy::Fail`](crate::ExitPolicy::Fail):
/// an error tears the process down, SIGINT/SIGTERM cancels the entry point
/// and the process exits once it has returned.
pub fn service<C, E>(app_name: &str, configure: C, entry: E)
where
    C: FnOnce(&Container) + Send + 'static,
    E: Entry,
{
    launch(RunConfig::service(app_name), configure, entry);
}

/// Runs a short-lived tool.
///
/// The application task runs with [`ExitPolicy::Exit`](crate::ExitPolicy::Exit):
/// whenever the entry point returns, the process ends.
pub fn tool<C, E>(app_name: &str, configure: C, entry: E)
where
    C: FnOnce(&Container) + Send + 'static,
    E: Entry,
{
    launch(RunConfig::tool(app_name), configure, entry);
}

fn launch<C, E>(cfg: RunConfig, configure: C, entry: E)
where
    C: FnOnce(&Container) + Send + 'static,
    E: Entry,
{
    let action = match bootstrap(cfg, configure, entry) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("{err}");
            ExitAction::Exit(EXIT_FAILURE)
        }
    };
    action.apply();
}

fn bootstrap<C, E>(cfg: RunConfig, configure: C, entry: E) -> Result<ExitAction, RuntimeError>
where
    C: FnOnce(&Container) + Send + 'static,
    E: Entry,
{
    let log = cfg.log.clone().with_cli(std::env::args_os())?;
    let cfg = cfg.with_log(log);
    logging::install(&cfg.log)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| RuntimeError::Runtime { source })?;

    let launcher = Launcher::builder(cfg).configure(configure).build();
    let report = runtime.block_on(launcher.run(entry));
    Ok(report.action)
}
