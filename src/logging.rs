//! `tracing` subscriber setup.
//!
//! Logs go to stderr so stdout carries only the monitor's console output.
//! `RUST_LOG`, when set, takes precedence over the configured level.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Build the event filter for `level`, preferring `RUST_LOG` when present.
pub fn filter_for(level: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logging(e.to_string()))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggingConfig) -> AppResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&config.level)?)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| AppError::Logging(e.to_string()))
}
