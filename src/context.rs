//! # Execution context.
//!
//! A [`Context`] pairs a [`CancellationToken`] with the application [`Logger`].
//! Every task receives one; the group cancels it to tear the run down.
//!
//! ## Rules
//! - Cancellation is monotonic: once cancelled, a context stays cancelled and
//!   [`Context::err`] keeps returning [`TaskError::Canceled`].
//! - [`Context::derive`] shares the token (cancelling either cancels both).
//! - [`Context::child`] creates a child token: cancelled with its parent, but
//!   cancelling the child leaves the parent untouched.
//!
//! ## Contract for entry points
//! Cancellation is cooperative. Every suspension point inside an entry point
//! should race its work against [`Context::cancelled`]; a task that never
//! looks at its context delays process shutdown indefinitely.
//!
//! ```rust
//! # use std::time::Duration;
//! use runvisor::{Context, TaskError};
//!
//! async fn tick(ctx: Context) -> Result<(), TaskError> {
//!     loop {
//!         tokio::select! {
//!             _ = ctx.cancelled() => return Err(TaskError::Canceled),
//!             _ = tokio::time::sleep(Duration::from_secs(1)) => tracing::info!("tick"),
//!         }
//!     }
//! }
//! ```

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::error::TaskError;
use crate::logging::Logger;

/// Cancellable, loggable context of work.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    logger: Logger,
}

impl Context {
    /// Creates a root context with a fresh cancellation token.
    pub fn new(logger: Logger) -> Self {
        Self {
            token: CancellationToken::new(),
            logger,
        }
    }

    /// Creates a context around an existing token.
    pub fn with_token(token: CancellationToken, logger: Logger) -> Self {
        Self { token, logger }
    }

    /// Same cancellation signal, `logger` attached instead of the current one.
    pub fn derive(&self, logger: Logger) -> Self {
        Self {
            token: self.token.clone(),
            logger,
        }
    }

    /// New cancellation scope below this one, same logger.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            logger: self.logger.clone(),
        }
    }

    /// Attached logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels this context and every child. Further calls are no-ops.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has fired.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once the context is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// `Some(TaskError::Canceled)` after cancellation, `None` before.
    pub fn err(&self) -> Option<TaskError> {
        self.is_cancelled().then_some(TaskError::Canceled)
    }
}
