//! # Run configuration.
//!
//! [`RunConfig`] centralizes the settings of one supervised run:
//! - **Mode**: service (long-running) or tool (short-lived);
//! - **Application name**: tags the logger; derived from the binary path;
//! - **Logging**: format and filter.
//!
//! ## Mode semantics
//! The mode only decides the exit policy of the application task:
//! - `Mode::Service` → [`ExitPolicy::Fail`]: an error tears the run down, a
//!   clean return ends the run once the signal watcher is cancelled;
//! - `Mode::Tool` → [`ExitPolicy::Exit`]: any return ends the run at once.
//!
//! The signal watcher is always [`ExitPolicy::Exit`].

use crate::logging::LogConfig;
use crate::naming::app_name;
use crate::policies::ExitPolicy;

/// Kind of program being supervised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Long-running service.
    Service,
    /// Short-lived command-line tool.
    Tool,
}

impl Mode {
    /// Exit policy of the application task in this mode.
    pub fn app_policy(self) -> ExitPolicy {
        match self {
            Mode::Service => ExitPolicy::Fail,
            Mode::Tool => ExitPolicy::Exit,
        }
    }

    /// Default logging configuration for this mode.
    pub fn default_log(self) -> LogConfig {
        match self {
            Mode::Service => LogConfig::service_default(),
            Mode::Tool => LogConfig::tool_default(),
        }
    }
}

/// Configuration of one supervised run.
///
/// All fields are public; the constructors fill in per-mode defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Name used to tag log records (`None` = untagged).
    pub app_name: Option<String>,
    /// Service or tool.
    pub mode: Mode,
    /// Log output settings.
    pub log: LogConfig,
}

impl RunConfig {
    /// Configuration for `mode`; `app` is usually `argv[0]` and is reduced to
    /// its final path component.
    pub fn new(app: &str, mode: Mode) -> Self {
        Self {
            app_name: app_name(app),
            mode,
            log: mode.default_log(),
        }
    }

    /// Service configuration with service logging defaults.
    pub fn service(app: &str) -> Self {
        Self::new(app, Mode::Service)
    }

    /// Tool configuration with tool logging defaults.
    pub fn tool(app: &str) -> Self {
        Self::new(app, Mode::Tool)
    }

    /// Returns the config with `log` replaced.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Exit policy of the application task.
    #[inline]
    pub fn app_policy(&self) -> ExitPolicy {
        self.mode.app_policy()
    }
}
