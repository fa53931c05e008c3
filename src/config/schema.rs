//! Configuration schema definitions.
//!
//! This module defines the structure of the configuration file using serde.
//! All configuration sections are defined here with appropriate defaults.

use super::error::{ConfigError, ConfigResult};
use crate::monitor::{InvalidBytes, Language, ReadErrorPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial port configuration
    pub serial: SerialConfig,
    /// Line monitor behaviour
    pub monitor: MonitorConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject values the monitor cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::validation("serial.port", "must not be empty"));
        }
        if self.serial.baud == 0 {
            return Err(ConfigError::validation("serial.baud", "must be greater than 0"));
        }
        match self.serial.timeout {
            Some(secs) => {
                let usable = Duration::try_from_secs_f64(secs).is_ok_and(|d| !d.is_zero());
                if !usable {
                    return Err(ConfigError::validation(
                        "serial.timeout",
                        "must be a positive number of seconds",
                    ));
                }
            }
            None if self.serial.timeout_ms == 0 => {
                return Err(ConfigError::validation(
                    "serial.timeout_ms",
                    "must be greater than 0",
                ));
            }
            None => {}
        }
        if self.monitor.poll_interval_ms == 0 {
            return Err(ConfigError::validation(
                "monitor.poll_interval_ms",
                "must be greater than 0",
            ));
        }
        if self.monitor.max_line_bytes == 0 {
            return Err(ConfigError::validation(
                "monitor.max_line_bytes",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Serial port configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device address, or an alias from `port_aliases`
    pub port: String,
    /// Baud rate
    pub baud: u32,
    /// Read timeout in milliseconds
    pub timeout_ms: u64,
    /// Read timeout in seconds; takes precedence over `timeout_ms` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    /// Port aliases for convenience
    #[serde(default)]
    pub port_aliases: HashMap<String, String>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port_name().to_string(),
            baud: 115200,
            timeout_ms: 1000,
            timeout: None,
            port_aliases: HashMap::new(),
        }
    }
}

impl SerialConfig {
    /// Get the read timeout as Duration
    pub fn timeout(&self) -> Duration {
        self.timeout
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or_else(|| Duration::from_millis(self.timeout_ms))
    }

    /// Set the read timeout in milliseconds, dropping any seconds value.
    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
        self.timeout = None;
    }

    /// Resolve a port name through aliases
    pub fn resolve_port(&self, name: &str) -> String {
        self.port_aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// The configured port with aliases applied.
    pub fn resolved_port(&self) -> String {
        self.resolve_port(&self.port)
    }
}

#[cfg(target_os = "windows")]
fn default_port_name() -> &'static str {
    "COM13"
}

#[cfg(not(target_os = "windows"))]
fn default_port_name() -> &'static str {
    "/dev/ttyUSB0"
}

/// Monitor configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pause between availability checks, in milliseconds
    pub poll_interval_ms: u64,
    /// Longest line accepted before it is cut and printed
    pub max_line_bytes: usize,
    /// What to do with bytes that are not valid UTF-8
    pub invalid_bytes: InvalidBytes,
    /// What to do when a read fails mid-run
    pub read_errors: ReadErrorPolicy,
    /// Prefix each line with a local timestamp
    pub show_timestamps: bool,
    /// Console message language: "en" or "ru"
    pub language: Language,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_line_bytes: 4096,
            invalid_bytes: InvalidBytes::default(),
            read_errors: ReadErrorPolicy::default(),
            show_timestamps: false,
            language: Language::default(),
        }
    }
}

impl MonitorConfig {
    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format
    Json,
    /// Pretty format with colors
    #[default]
    Pretty,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.serial.baud, 115200);
        assert_eq!(config.serial.timeout(), Duration::from_secs(1));
        assert_eq!(config.monitor.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.monitor.invalid_bytes, InvalidBytes::Ignore);
        assert_eq!(config.monitor.read_errors, ReadErrorPolicy::Ignore);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_alias_resolution() {
        let mut config = SerialConfig::default();
        config
            .port_aliases
            .insert("esp32".to_string(), "COM13".to_string());

        assert_eq!(config.resolve_port("esp32"), "COM13");
        assert_eq!(config.resolve_port("COM5"), "COM5");

        config.port = "esp32".to_string();
        assert_eq!(config.resolved_port(), "COM13");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[serial]"));
        assert!(toml_str.contains("[monitor]"));
        assert!(toml_str.contains("invalid_bytes = \"ignore\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [serial]
            port = "COM13"
            baud = 9600

            [monitor]
            invalid_bytes = "replace"
            read_errors = "fatal"
            language = "ru"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.serial.port, "COM13");
        assert_eq!(config.serial.baud, 9600);
        assert_eq!(config.monitor.invalid_bytes, InvalidBytes::Replace);
        assert_eq!(config.monitor.read_errors, ReadErrorPolicy::Fatal);
        assert_eq!(config.monitor.language, Language::Russian);
        // Defaults should still work
        assert_eq!(config.serial.timeout_ms, 1000);
        assert_eq!(config.monitor.poll_interval_ms, 100);
    }

    #[test]
    fn test_timeout_in_seconds() {
        let config: Config = toml::from_str("[serial]\ntimeout = 1.5\ntimeout_ms = 20").unwrap();
        assert_eq!(config.serial.timeout(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());

        let mut serial = config.serial;
        serial.set_timeout_ms(250);
        assert_eq!(serial.timeout, None);
        assert_eq!(serial.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = Config::default();
        config.serial.baud = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { ref key, .. }) if key == "serial.baud"
        ));

        let mut config = Config::default();
        config.serial.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.serial.timeout = Some(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { ref key, .. }) if key == "serial.timeout"
        ));

        let mut config = Config::default();
        config.serial.timeout = Some(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.monitor.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.monitor.max_line_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.serial.port = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
