//! # Exit translator.
//!
//! Maps the outcome of a run to what the process does next. This is the only
//! place where a failure becomes user-visible output.
//!
//! | Outcome                          | Action    | Logged                      |
//! |----------------------------------|-----------|-----------------------------|
//! | `Ok(())`                         | `Return`  | nothing                     |
//! | `Err(Canceled)`, ctx cancelled   | `Return`  | nothing (expected shutdown) |
//! | `Err(HelpRequested)`             | `Exit(2)` | nothing                     |
//! | any other error                  | `Exit(1)` | one `error` record          |
//!
//! `Canceled` counts as a normal shutdown only when it is the context's own
//! cancellation; an uncancelled context turns it into an application failure.

use tracing::error;

use crate::{context::Context, error::TaskError};

/// Exit code for an application error.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when command-line help was requested.
pub const EXIT_HELP: i32 = 2;

/// What the process does once the run has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitAction {
    /// Return normally (exit code 0).
    Return,
    /// Terminate the process with the given code.
    Exit(i32),
}

impl ExitAction {
    /// Pure classification of `outcome` produced under `ctx`.
    ///
    /// # Example
    /// ```
    /// use runvisor::{Context, ExitAction, TaskError};
    ///
    /// let ctx = Context::default();
    /// assert_eq!(ExitAction::from_outcome(&Err(TaskError::Canceled), &ctx), ExitAction::Exit(1));
    ///
    /// ctx.cancel();
    /// assert_eq!(ExitAction::from_outcome(&Err(TaskError::Canceled), &ctx), ExitAction::Return);
    /// assert_eq!(ExitAction::from_outcome(&Err(TaskError::HelpRequested), &ctx).code(), 2);
    /// ```
    pub fn from_outcome(outcome: &Result<(), TaskError>, ctx: &Context) -> Self {
        match outcome {
            Ok(()) => ExitAction::Return,
            Err(TaskError::Canceled) if ctx.is_cancelled() => ExitAction::Return,
            Err(TaskError::HelpRequested) => ExitAction::Exit(EXIT_HELP),
            Err(_) => ExitAction::Exit(EXIT_FAILURE),
        }
    }

    /// Process exit code this action results in.
    pub fn code(self) -> i32 {
        match self {
            ExitAction::Return => 0,
            ExitAction::Exit(code) => code,
        }
    }

    /// Returns for [`ExitAction::Return`]; terminates the process otherwise.
    ///
    /// Call only after every task has been joined and the runtime shut down.
    pub fn apply(self) {
        if let ExitAction::Exit(code) = self {
            std::process::exit(code);
        }
    }
}

/// Classifies `outcome` and logs it through the logger of `ctx` when it is a failure.
///
/// Exactly one `error` record is emitted for an application failure; the
/// logger is synced afterwards since the process may exit right away.
pub fn translate(outcome: &Result<(), TaskError>, ctx: &Context) -> ExitAction {
    let action = ExitAction::from_outcome(outcome, ctx);
    if let (ExitAction::Exit(EXIT_FAILURE), Err(err)) = (action, outcome) {
        let logger = ctx.logger();
        let _span = logger.span().entered();
        error!(
            error = err as &(dyn std::error::Error + 'static),
            "Application returned error: {err}"
        );
        let _ = logger.sync();
    }
    action
}
