//! # Run a single task to completion.
//!
//! Executes one [`Task`] with its [`Context`], converts a panic into an error
//! and logs the terminal state.
//!
//! ## Outcome flow
//!
//! ```text
//! Success:
//!   task.run() → Ok(())            → debug "task stopped"
//!
//! Cancellation:
//!   task.run() → Err(Canceled)     → debug "task stopped" (graceful exit)
//!
//! Failure:
//!   task.run() → Err(..)           → debug "task failed"
//!
//! Panic:
//!   task.run() unwinds → Err(Panicked { task, message }) → debug "task failed"
//! ```
//!
//! ## Rules
//! - Always logs **exactly one** terminal record per run.
//! - `Canceled` is a graceful exit, not a failure.
//! - A panic never escapes: it becomes the task's error and takes part in the
//!   group's outcome like any other error.
//!
//! **Warning**: `AssertUnwindSafe` is used, so state shared by the task behind
//! a lock may be left inconsistent after a panic.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::debug;

use crate::{context::Context, error::TaskError, tasks::TaskRef};

/// Runs `task` once with `ctx` and returns its result, panics included.
pub async fn run_once(task: TaskRef, ctx: Context) -> Result<(), TaskError> {
    debug!(task = task.name(), "task starting");

    let res = match AssertUnwindSafe(task.run(ctx)).catch_unwind().await {
        Ok(res) => res,
        Err(panic) => Err(TaskError::Panicked {
            task: task.name().to_string(),
            message: panic_message(panic.as_ref()),
        }),
    };

    match &res {
        Ok(()) | Err(TaskError::Canceled) => {
            debug!(task = task.name(), canceled = res.is_err(), "task stopped");
        }
        Err(err) => {
            debug!(task = task.name(), error = %err, label = err.as_label(), "task failed");
        }
    }
    res
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
