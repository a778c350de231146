//! Logging
//!
//! Diagnostics from the `feesplit` CLI go to standard error; these flags pick
//! the verbosity and whether lines are for people or for log collectors.

use clap::Args;

/// Shape of the log lines written to standard error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event, for a terminal
    Compact,

    /// One JSON object per event, including the active span
    Json,
}

/// Logging flags of the `feesplit` CLI.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` holds no valid filter
    /// (e.g. `debug`, `feesplit_app=trace`)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
