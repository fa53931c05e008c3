//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "LINE_MONITOR";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "LINE_MONITOR_CONFIG";

/// Application directory name under the platform config dir
const APP_DIR_NAME: &str = "serial-line-monitor";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `LINE_MONITOR_CONFIG` environment variable (explicit path)
    /// 2. `./config.toml` (current directory)
    /// 3. `<platform config dir>/serial-line-monitor/config.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables override any config file values.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = match config_path {
            Some(ref path) => load_from_file(path)?,
            None => Config::default(),
        };

        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    ///
    /// Environment overrides still apply.
    pub fn with_defaults() -> ConfigResult<Self> {
        let mut config = Config::default();
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: None,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. Platform config directory
    get_default_config_path().filter(|path| path.exists())
}

/// Get the platform config directory for this application.
pub fn get_default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_DIR_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the default config file path.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_default_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Read `LINE_MONITOR_<suffix>` and parse it, if set.
fn env_value<T: FromStr>(suffix: &str, what: &str) -> ConfigResult<Option<T>> {
    let var = format!("{}_{}", ENV_PREFIX, suffix);
    match std::env::var(&var) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::env_parse(var, format!("Invalid {what}"))),
        Err(_) => Ok(None),
    }
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `LINE_MONITOR_<SECTION>_<KEY>`
/// For example:
/// - `LINE_MONITOR_SERIAL_PORT=COM13`
/// - `LINE_MONITOR_SERIAL_BAUD=9600`
/// - `LINE_MONITOR_MONITOR_LANGUAGE=ru`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    // Serial overrides
    if let Some(val) = env_value::<String>("SERIAL_PORT", "port name")? {
        config.serial.port = val;
    }
    if let Some(val) = env_value("SERIAL_BAUD", "baud rate")? {
        config.serial.baud = val;
    }
    if let Some(val) = env_value("SERIAL_TIMEOUT", "timeout in seconds")? {
        config.serial.timeout = Some(val);
    }
    if let Some(val) = env_value("SERIAL_TIMEOUT_MS", "timeout")? {
        config.serial.set_timeout_ms(val);
    }

    // Monitor overrides
    if let Some(val) = env_value("MONITOR_POLL_INTERVAL_MS", "poll interval")? {
        config.monitor.poll_interval_ms = val;
    }
    if let Some(val) = env_value("MONITOR_LANGUAGE", "language")? {
        config.monitor.language = val;
    }

    // Logging overrides
    if let Some(val) = env_value::<String>("LOGGING_LEVEL", "log level")? {
        config.logging.level = val;
    }

    Ok(())
}
