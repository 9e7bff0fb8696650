//! # Launcher: wires one supervised run.
//!
//! ```text
//! Launcher::run(entry)
//!   ├─► Context::new(Logger named after the app)
//!   ├─► container.singleton(ctx); configure(&container)
//!   ├─► Group
//!   │     ├─ AppTask        (ExitPolicy from the mode: Fail / Exit)
//!   │     └─ SignalWatcher  ("signals", ExitPolicy::Exit)
//!   ├─► outcome = group.run().await      (every task joined)
//!   └─► action  = exit::translate(&outcome, group scope)
//! ```
//!
//! The launcher never terminates the process; the returned [`Report`] says
//! what should happen. [`crate::service`] and [`crate::tool`] apply it.

use std::sync::Arc;

use tracing::debug;

use crate::core::{
    app::{AppTask, Entry},
    exit::{self, ExitAction},
    group::Group,
    signals::{SignalSource, SignalWatcher},
};
use crate::{
    config::RunConfig,
    container::Container,
    context::Context,
    error::TaskError,
    logging::Logger,
    policies::ExitPolicy,
    tasks::TaskSpec,
};

type Configure = Box<dyn FnOnce(&Container) + Send>;

/// Result of a run.
#[derive(Debug)]
pub struct Report {
    /// Resolved group outcome.
    pub outcome: Result<(), TaskError>,
    /// What the process should do next.
    pub action: ExitAction,
}

/// Builder for [`Launcher`].
pub struct LauncherBuilder {
    cfg: RunConfig,
    configure: Option<Configure>,
    signals: SignalSource,
    container: Option<Arc<Container>>,
}

impl LauncherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: RunConfig) -> Self {
        Self {
            cfg,
            configure: None,
            signals: SignalSource::Os,
            container: None,
        }
    }

    /// Sets the callback that fills the container; it runs once, before any task starts.
    pub fn configure<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&Container) + Send + 'static,
    {
        self.configure = Some(Box::new(configure));
        self
    }

    /// Replaces the OS as the source of termination signals.
    pub fn with_signals(mut self, signals: SignalSource) -> Self {
        self.signals = signals;
        self
    }

    /// Uses an existing container instead of a fresh one.
    pub fn with_container(mut self, container: Arc<Container>) -> Self {
        self.container = Some(container);
        self
    }

    /// Builds the launcher.
    pub fn build(self) -> Launcher {
        Launcher {
            cfg: self.cfg,
            configure: self.configure,
            signals: self.signals,
            container: self.container.unwrap_or_default(),
        }
    }
}

/// One supervised run of an application.
pub struct Launcher {
    cfg: RunConfig,
    configure: Option<Configure>,
    signals: SignalSource,
    container: Arc<Container>,
}

impl Launcher {
    /// Starts building a launcher for `cfg`.
    pub fn builder(cfg: RunConfig) -> LauncherBuilder {
        LauncherBuilder::new(cfg)
    }

    /// The container the entry point will receive.
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Runs `entry` next to the signal watcher until the group settles.
    pub async fn run(self, entry: impl Entry) -> Report {
        let Launcher {
            cfg,
            configure,
            signals,
            container,
        } = self;

        let logger = match cfg.app_name.as_deref() {
            Some(name) => Logger::new().named(name),
            None => Logger::new(),
        };
        let ctx = Context::new(logger);

        container.singleton(ctx.clone());
        if let Some(configure) = configure {
            configure(&container);
        }

        let mut group = Group::new(&ctx);
        group
            .add(TaskSpec::new(
                Arc::new(AppTask::new(entry, Arc::clone(&container))),
                cfg.app_policy(),
            ))
            .add(TaskSpec::new(
                Arc::new(SignalWatcher::new(signals)),
                ExitPolicy::Exit,
            ));

        let scope = group.context().clone();
        debug!(mode = ?cfg.mode, app = ?cfg.app_name, "run starting");
        let outcome = group.run().await;
        let action = exit::translate(&outcome, &scope);
        debug!(code = action.code(), "run finished");

        Report { outcome, action }
    }
}
