//! Error types used by the runvisor runtime and tasks.
//!
//! This module defines two main error enums:
//!
//! - [`TaskError`]: errors produced by supervised tasks; the group resolves
//!   exactly one of them (or `Ok`) as the outcome of a run.
//! - [`RuntimeError`]: failures of the process bootstrap itself, before any
//!   task is started (logger configuration, tokio runtime construction).
//!
//! Both types provide `as_label` for logs.

use thiserror::Error;

/// Boxed application error carried by [`TaskError::Fail`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by task execution.
///
/// The exit translator classifies them:
/// - [`TaskError::Canceled`] is an expected shutdown (exit code 0);
/// - [`TaskError::HelpRequested`] means the command line asked for help (exit code 2);
/// - everything else is an application failure (logged, exit code 1).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task was cancelled because its context was cancelled.
    #[error("context cancelled")]
    Canceled,

    /// Command-line help was requested; not a failure.
    #[error("help requested")]
    HelpRequested,

    /// The application returned an error.
    #[error("{error}")]
    Fail {
        /// The underlying error.
        #[source]
        error: BoxError,
    },

    /// The task panicked; the panic was caught by the group.
    #[error("task {task:?} panicked: {message}")]
    Panicked {
        /// Name of the task (may be empty for the application task).
        task: String,
        /// Panic payload rendered as text.
        message: String,
    },

    /// The task returned [`TaskError::Canceled`] although its context was never cancelled.
    #[error("task {task:?} reported cancellation before its context was cancelled")]
    UnexpectedCancel {
        /// Name of the task.
        task: String,
    },

    /// Subscribing to OS termination signals failed.
    #[error("signal subscription failed: {source}")]
    Signal {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The entry point asked the container for a dependency nobody registered.
    #[error("dependency not registered: {type_name}")]
    MissingDependency {
        /// Rust type name of the missing dependency.
        type_name: &'static str,
    },
}

impl TaskError {
    /// Wraps any error as an application failure.
    ///
    /// # Example
    /// ```
    /// use runvisor::TaskError;
    ///
    /// let err = TaskError::fail("disk full");
    /// assert_eq!(err.to_string(), "disk full");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn fail(error: impl Into<BoxError>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Canceled => "task_canceled",
            TaskError::HelpRequested => "help_requested",
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::UnexpectedCancel { .. } => "task_unexpected_cancel",
            TaskError::Signal { .. } => "signal_subscription_failed",
            TaskError::MissingDependency { .. } => "missing_dependency",
        }
    }

    /// `true` for the context's own cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }

    /// `true` for the help-requested marker.
    pub fn is_help_requested(&self) -> bool {
        matches!(self, TaskError::HelpRequested)
    }
}

impl From<clap::Error> for TaskError {
    /// Help requests become [`TaskError::HelpRequested`]; any other parse
    /// failure is an application error.
    fn from(err: clap::Error) -> Self {
        use clap::error::ErrorKind;

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                TaskError::HelpRequested
            }
            _ => TaskError::fail(err),
        }
    }
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        TaskError::fail(err)
    }
}

/// # Errors produced while bootstrapping a run.
///
/// None of these reach the task group: they stop the process before any task starts.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The tokio runtime could not be built.
    #[error("failed to build async runtime: {source}")]
    Runtime {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log filter directive is invalid.
    #[error("invalid log filter {directive:?}: {source}")]
    LogFilter {
        /// The rejected directive.
        directive: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// Logging flags on the command line could not be parsed.
    #[error("invalid logging flags: {source}")]
    LogFlags {
        /// Parser error.
        #[from]
        source: clap::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Runtime { .. } => "runtime_build_failed",
            RuntimeError::LogFilter { .. } => "runtime_log_filter",
            RuntimeError::LogFlags { .. } => "runtime_log_flags",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> clap::Error {
        clap::Command::new("demo")
            .arg(clap::Arg::new("port").long("port").required(true))
            .try_get_matches_from(args)
            .unwrap_err()
    }

    #[test]
    fn test_help_flag_maps_to_marker() {
        let err = TaskError::from(parse(&["demo", "--help"]));
        assert!(err.is_help_requested());
        assert_eq!(err.as_label(), "help_requested");
    }

    #[test]
    fn test_other_clap_errors_are_failures() {
        let err = TaskError::from(parse(&["demo", "--bogus"]));
        assert!(matches!(err, TaskError::Fail { .. }));
        assert!(!err.is_help_requested());
    }

    #[test]
    fn test_fail_keeps_message_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = TaskError::from(io);
        assert_eq!(err.to_string(), "disk full");
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "disk full");
    }

    #[test]
    fn test_panicked_display() {
        let err = TaskError::Panicked {
            task: "signals".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "task \"signals\" panicked: boom");
        assert!(!err.is_canceled());
    }
}
