//! # Log output configuration.
//!
//! [`LogConfig`] selects the output format and the default filter directive.
//! Services default to JSON lines, tools to human-readable console output.
//!
//! ## Command-line overrides
//! [`LogConfig::with_cli`] looks for `--log-format <console|json>` and
//! `--log-level <directive>` (also in `--flag=value` form) and ignores every
//! other argument, so applications keep full control of their own flags.
//! Applications that parse their command line with clap can
//! `#[command(flatten)]` [`LogArgs`] to get the same flags in `--help`.
//!
//! `RUST_LOG`, when set and non-empty, takes precedence over the level.

use std::ffi::OsString;

use clap::{Args, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::error::RuntimeError;

const LOG_FLAGS: [&str; 2] = ["--log-format", "--log-level"];

/// Output format of log records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Console,
    /// One JSON object per record.
    Json,
}

/// Logging flags shared with the application's own parser.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Log output format.
    #[arg(long = "log-format", value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Log filter directive (e.g. `info`, `debug`, `my_app=trace`).
    #[arg(long = "log-level", value_name = "DIRECTIVE")]
    pub log_level: Option<String>,
}

#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct LogFlags {
    #[command(flatten)]
    args: LogArgs,
}

/// Logging configuration for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
}

impl LogConfig {
    /// Defaults for long-running services: JSON records at `info`.
    pub fn service_default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
        }
    }

    /// Defaults for short-lived tools: console records at `info`.
    pub fn tool_default() -> Self {
        Self {
            format: LogFormat::Console,
            level: "info".to_string(),
        }
    }

    /// Applies parsed [`LogArgs`] on top of this config.
    pub fn with_args(mut self, args: &LogArgs) -> Self {
        if let Some(format) = args.log_format {
            self.format = format;
        }
        if let Some(level) = &args.log_level {
            self.level = level.clone();
        }
        self
    }

    /// Applies `--log-format` / `--log-level` found in `args` (first item is the binary name).
    ///
    /// Unrelated arguments are skipped; scanning stops at `--`.
    ///
    /// # Example
    /// ```
    /// use runvisor::{LogConfig, LogFormat};
    ///
    /// let cfg = LogConfig::service_default()
    ///     .with_cli(["app", "--port", "80", "--log-format=console", "--log-level", "debug"])
    ///     .unwrap();
    /// assert_eq!(cfg.format, LogFormat::Console);
    /// assert_eq!(cfg.level, "debug");
    /// ```
    pub fn with_cli<I, T>(self, args: I) -> Result<Self, RuntimeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let flags = LogFlags::try_parse_from(pick_log_flags(args))?;
        Ok(self.with_args(&flags.args))
    }

    /// Builds the filter: `RUST_LOG` when set, otherwise [`LogConfig::level`].
    pub fn filter(&self) -> Result<EnvFilter, RuntimeError> {
        match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directive) if !directive.trim().is_empty() => parse_filter(&directive),
            _ => parse_filter(&self.level),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::tool_default()
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, RuntimeError> {
    EnvFilter::try_new(directive).map_err(|source| RuntimeError::LogFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Keeps the binary name plus the logging flags (and their values) from `args`.
fn pick_log_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut picked = vec![iter.next().unwrap_or_else(|| OsString::from("runvisor"))];

    while let Some(arg) = iter.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        if text == "--" {
            break;
        }
        if LOG_FLAGS.contains(&text) {
            picked.push(arg.clone());
            if let Some(value) = iter.next() {
                picked.push(value);
            }
        } else if LOG_FLAGS
            .iter()
            .any(|flag| text.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')))
        {
            picked.push(arg.clone());
        }
    }
    picked
}
