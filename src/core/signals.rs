//! # Signal watcher task.
//!
//! [`SignalWatcher`] is the `"signals"` task of every run. It subscribes to
//! termination signals first and only then waits, so a signal delivered after
//! the subscription is never lost.
//!
//! ```text
//! WAITING ──► cancelled ─► Err(Canceled)         (nothing new to report)
//!         └─► signal    ─► info "Signal received, terminating..." ─► Ok(())
//! ```
//!
//! Run with [`ExitPolicy::Exit`](crate::ExitPolicy::Exit): either way the
//! sibling application task is cancelled.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! Any other signal is not observed.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use crate::{context::Context, error::TaskError, tasks::Task};

/// Name of the watcher task.
pub const SIGNALS_TASK: &str = "signals";

/// Termination signal observed by the watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// `SIGINT` / Ctrl-C.
    Interrupt,
    /// `SIGTERM`.
    Terminate,
}

impl Signal {
    /// Conventional signal name.
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the watcher receives signals from.
#[derive(Debug, Default)]
pub enum SignalSource {
    /// The operating system (default).
    #[default]
    Os,
    /// An in-process channel; lets embedders and tests deliver signals directly.
    Channel(mpsc::Receiver<Signal>),
}

impl SignalSource {
    /// Channel-backed source with a one-slot buffer, plus its sender.
    pub fn channel() -> (mpsc::Sender<Signal>, Self) {
        let (tx, rx) = mpsc::channel(1);
        (tx, SignalSource::Channel(rx))
    }
}

/// The `"signals"` task.
///
/// A channel source is consumed by the first run; any later run subscribes
/// to OS signals afresh.
#[derive(Debug, Default)]
pub struct SignalWatcher {
    source: Mutex<Option<SignalSource>>,
}

impl SignalWatcher {
    /// Watcher reading from `source`.
    pub fn new(source: SignalSource) -> Self {
        Self {
            source: Mutex::new(Some(source)),
        }
    }

    fn take_source(&self) -> SignalSource {
        self.source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Task for SignalWatcher {
    fn name(&self) -> &str {
        SIGNALS_TASK
    }

    async fn run(&self, ctx: Context) -> Result<(), TaskError> {
        let mut listener = Listener::subscribe(self.take_source())
            .map_err(|source| TaskError::Signal { source })?;

        let received = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(TaskError::Canceled),
            sig = listener.recv() => sig,
        };

        match received {
            Some(sig) => {
                info!(signal = %sig, "Signal received, terminating...");
                Ok(())
            }
            None => {
                // The source closed: no signal can arrive any more.
                ctx.cancelled().await;
                Err(TaskError::Canceled)
            }
        }
    }
}

/// Active subscription.
enum Listener {
    Os(OsSignals),
    Channel(mpsc::Receiver<Signal>),
}

impl Listener {
    fn subscribe(source: SignalSource) -> std::io::Result<Self> {
        Ok(match source {
            SignalSource::Os => Listener::Os(OsSignals::subscribe()?),
            SignalSource::Channel(rx) => Listener::Channel(rx),
        })
    }

    /// Next signal, or `None` once the source can no longer deliver any.
    async fn recv(&mut self) -> Option<Signal> {
        match self {
            Listener::Os(os) => os.recv().await,
            Listener::Channel(rx) => rx.recv().await,
        }
    }
}

#[cfg(unix)]
struct OsSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    fn subscribe() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> Option<Signal> {
        tokio::select! {
            Some(()) = self.interrupt.recv() => Some(Signal::Interrupt),
            Some(()) = self.terminate.recv() => Some(Signal::Terminate),
            else => None,
        }
    }
}

#[cfg(not(unix))]
struct OsSignals;

#[cfg(not(unix))]
impl OsSignals {
    fn subscribe() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> Option<Signal> {
        tokio::signal::ctrl_c().await.ok().map(|()| Signal::Interrupt)
    }
}
