//! Configuration module for serial_line_monitor.
//!
//! This module provides TOML-based configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `LINE_MONITOR_CONFIG` environment variable (explicit path)
//! 2. `./config.toml` (current directory)
//! 3. `serial-line-monitor/config.toml` in the platform config directory
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! The pattern is: `LINE_MONITOR_<SECTION>_<KEY>`
//!
//! Examples:
//! - `LINE_MONITOR_SERIAL_PORT=COM13`
//! - `LINE_MONITOR_SERIAL_BAUD=115200`
//! - `LINE_MONITOR_LOGGING_LEVEL=debug`
//!
//! # Example
//!
//! ```rust,no_run
//! use serial_line_monitor::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load()?;
//! let config = loader.config();
//!
//! println!("Port: {} @ {}", config.serial.port, config.serial.baud);
//! # Ok::<(), serial_line_monitor::config::ConfigError>(())
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    get_default_config_dir, get_default_config_path, resolve_config_path, ConfigLoader,
};
pub use schema::{Config, LogFormat, LoggingConfig, MonitorConfig, SerialConfig};
