use crate::config::ConfigError;
use crate::monitor::MonitorError;
use crate::port::PortError;
use thiserror::Error;

/// Unified application error type for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Failed to install logging: {0}")]
    Logging(String),

    #[error("Monitor task failed: {0}")]
    Task(String),
}

/// A specialized `Result` type for application entry points.
pub type AppResult<T> = Result<T, AppError>;
