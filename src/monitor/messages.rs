//! Console message catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the separator printed under the banner.
pub const SEPARATOR_WIDTH: usize = 50;

/// Language of the console messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "ru", alias = "russian")]
    Russian,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ru" | "russian" => Ok(Self::Russian),
            other => Err(format!("unknown language '{other}', expected 'en' or 'ru'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "en"),
            Self::Russian => write!(f, "ru"),
        }
    }
}

impl Language {
    pub fn opened(self, port_name: &str) -> String {
        match self {
            Self::English => format!("Serial monitor opened: {port_name}"),
            Self::Russian => format!("Монитор порта открыт: {port_name}"),
        }
    }

    pub fn exit_hint(self) -> &'static str {
        match self {
            Self::English => "Press Ctrl+C to exit",
            Self::Russian => "Нажмите Ctrl+C для выхода",
        }
    }

    pub fn open_failed(self, reason: &dyn fmt::Display) -> String {
        match self {
            Self::English => format!("Failed to open port: {reason}"),
            Self::Russian => format!("Ошибка открытия порта: {reason}"),
        }
    }

    pub fn check_heading(self) -> &'static str {
        match self {
            Self::English => "Check:",
            Self::Russian => "Проверьте:",
        }
    }

    /// The usual reasons an open fails, in the order they are printed.
    pub fn open_causes(self, port_name: &str) -> [String; 3] {
        match self {
            Self::English => [
                format!("1. Is the device plugged in and attached to {port_name}"),
                "2. Is the port already used by another application".to_string(),
                "3. Is the port name configured correctly".to_string(),
            ],
            Self::Russian => [
                format!("1. Подключено ли устройство к {port_name}"),
                "2. Не занят ли порт другим приложением".to_string(),
                "3. Правильно ли указан номер порта".to_string(),
            ],
        }
    }

    pub fn read_failed(self, reason: &dyn fmt::Display) -> String {
        match self {
            Self::English => format!("Read error: {reason}"),
            Self::Russian => format!("Ошибка чтения: {reason}"),
        }
    }

    pub fn stopped(self) -> &'static str {
        match self {
            Self::English => "\nMonitor stopped",
            Self::Russian => "\nМонитор остановлен",
        }
    }

    pub fn closed(self) -> &'static str {
        match self {
            Self::English => "Port closed",
            Self::Russian => "Порт закрыт",
        }
    }
}
