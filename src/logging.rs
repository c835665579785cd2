//! Tracing setup.
//!
//! CLI commands log to stderr. The interactive board owns the terminal, so it
//! logs to a file in the data directory instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Where log lines go.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Build the filter: an explicit level wins, then `RUST_LOG`, then `warn`.
/// A malformed `RUST_LOG` is an error rather than silently ignored.
fn filter(level: Option<LogLevel>) -> Result<EnvFilter> {
    match level {
        Some(level) => Ok(EnvFilter::try_new(format!("task_board={},warn", level.as_str()))?),
        None => match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) => EnvFilter::try_new(&directives)
                .with_context(|| format!("invalid {}: {directives}", EnvFilter::DEFAULT_ENV)),
            Err(_) => Ok(EnvFilter::new("warn")),
        },
    }
}

/// Install the global subscriber.
pub fn init(level: Option<LogLevel>, target: LogTarget<'_>) -> Result<()> {
    let filter = filter(level)?;
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LogLevel::Error, "task_board=error")]
    #[case(LogLevel::Debug, "task_board=debug")]
    #[case(LogLevel::Trace, "task_board=trace")]
    fn explicit_level_scopes_the_crate(#[case] level: LogLevel, #[case] directive: &str) {
        let filter = filter(Some(level)).unwrap().to_string();
        assert!(filter.contains(directive), "{filter}");
        assert!(filter.contains("warn"));
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::from_str("DEBUG", true), Ok(LogLevel::Debug));
        assert!(LogLevel::from_str("verbose", true).is_err());
    }
}
