//! Serial Line Monitor Library
//!
//! Opens a single serial port, prints every line it receives, and closes the
//! port on every way out.
//!
//! # Modules
//!
//! - `config`: Configuration management with TOML support
//! - `port`: Port abstraction layer for serial communication
//! - `monitor`: The poll loop, line decoding and console output
//! - `logging`: `tracing` subscriber setup
//! - `error`: Unified error handling

pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod port;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult};
pub use monitor::{
    Console, InvalidBytes, Language, LineMonitor, MonitorError, MonitorReport, MonitorSettings,
    ReadErrorPolicy, StopFlag,
};
pub use port::{
    MockSerialPort, PortConfiguration, PortError, PortOpener, SerialPortAdapter, SyncSerialPort,
    SystemPortOpener,
};

// Re-export config types
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
