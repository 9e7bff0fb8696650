//! # Application logger handle.
//!
//! A [`Logger`] does not own a sink: records go through the process-wide
//! `tracing` subscriber set by [`install`]. The handle carries the
//! application's name and turns it into the `app` span every task runs in, so
//! records read `app{name="my-service"}: ...`. An unnamed logger uses a
//! disabled span and records carry no name tag.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::config::{LogConfig, LogFormat};
use crate::error::RuntimeError;

/// Serializes installation of the global subscriber; `true` once done.
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Named handle to the process logger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Logger {
    name: Option<Arc<str>>,
}

impl Logger {
    /// Unnamed logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a logger tagged with `name`; an empty name removes the tag.
    pub fn named(mut self, name: &str) -> Self {
        self.name = (!name.is_empty()).then(|| Arc::from(name));
        self
    }

    /// Application name carried by this logger, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Span that tags records with the application name.
    pub fn span(&self) -> Span {
        match &self.name {
            Some(name) => tracing::info_span!("app", name = %name),
            None => Span::none(),
        }
    }

    /// Flushes buffered log output.
    pub fn sync(&self) -> io::Result<()> {
        io::stderr().flush()?;
        io::stdout().flush()
    }
}

/// Installs the global subscriber described by `cfg`.
///
/// Only the first successful call per process has an effect. When another
/// global subscriber is already in place (an embedding application or a test
/// harness set one) it is kept.
pub fn install(cfg: &LogConfig) -> Result<(), RuntimeError> {
    let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        return Ok(());
    }

    let filter = cfg.filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    let res = match cfg.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Console => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init(),
    };
    if let Err(err) = res {
        debug!(error = %err, "global subscriber already set, keeping it");
    }

    *installed = true;
    Ok(())
}
