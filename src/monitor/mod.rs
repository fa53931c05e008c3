//! The line monitor.
//!
//! Opens one port, polls it for incoming bytes and prints each decoded line
//! until the [`StopFlag`] is raised. The port is held by a [`PortGuard`], so
//! it is closed exactly once on every way out of [`LineMonitor::run`].
//!
//! ```text
//! open ──ok──> banner ──> check ─┬─ bytes? ─> read line ─> decode ─> print ─┬─> sleep ─> check
//!   │                            └─ idle ───────────────────────────────────┘
//!   └─fail──> diagnostic          stop ─> notice ─> close
//! ```

mod console;
mod decode;
mod guard;
mod line;
mod messages;
mod shutdown;

pub use console::{Console, SharedBuffer};
pub use decode::{decode_line, decode_trimmed, InvalidBytes};
pub use guard::PortGuard;
pub use line::{LineBuffer, LINE_TERMINATOR};
pub use messages::{Language, SEPARATOR_WIDTH};
pub use shutdown::StopFlag;

use crate::config::Config;
use crate::port::{PortConfiguration, PortError, PortOpener, SerialPortAdapter};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

/// Handling of transport errors once the port is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Log the error and keep polling.
    #[default]
    Ignore,
    /// Stop the monitor and report the error.
    Fatal,
}

/// Errors that end a monitor run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The single open attempt failed; the loop never started.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: PortError,
    },

    /// A read failed under [`ReadErrorPolicy::Fatal`]; the port was closed.
    #[error("reading from {port} failed: {source}")]
    Read {
        port: String,
        #[source]
        source: PortError,
    },
}

/// Everything the monitor loop needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub port: PortConfiguration,
    pub poll_interval: Duration,
    pub max_line_bytes: usize,
    pub invalid_bytes: InvalidBytes,
    pub read_errors: ReadErrorPolicy,
}

impl MonitorSettings {
    pub fn new(port: PortConfiguration) -> Self {
        Self {
            port,
            poll_interval: Duration::from_millis(100),
            max_line_bytes: 4096,
            invalid_bytes: InvalidBytes::default(),
            read_errors: ReadErrorPolicy::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            port: PortConfiguration::new(
                config.serial.resolved_port(),
                config.serial.baud,
                config.serial.timeout(),
            ),
            poll_interval: config.monitor.poll_interval(),
            max_line_bytes: config.monitor.max_line_bytes,
            invalid_bytes: config.monitor.invalid_bytes,
            read_errors: config.monitor.read_errors,
        }
    }
}

/// Summary of a run that ended by interruption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub port_name: String,
    /// Lines printed.
    pub lines: usize,
    /// Bytes received, including blank and undecodable lines.
    pub bytes_received: usize,
    /// Read errors skipped under [`ReadErrorPolicy::Ignore`].
    pub read_errors: usize,
}

pub struct LineMonitor<O: PortOpener> {
    opener: O,
    settings: MonitorSettings,
    console: Console,
    stop: StopFlag,
}

impl<O: PortOpener> LineMonitor<O> {
    pub fn new(opener: O, settings: MonitorSettings, console: Console, stop: StopFlag) -> Self {
        Self {
            opener,
            settings,
            console,
            stop,
        }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Open the port and print lines until stopped.
    ///
    /// Returns `Ok` after an interruption, once the port has been closed.
    pub fn run(&self) -> Result<MonitorReport, MonitorError> {
        let config = &self.settings.port;

        let port = match self.opener.open(config) {
            Ok(port) => port,
            Err(source) => {
                error!(port = %config.port_name, error = %source, "failed to open serial port");
                self.console.open_failed(&config.port_name, &source);
                return Err(MonitorError::Open {
                    port: config.port_name.clone(),
                    source,
                });
            }
        };

        info!(
            port = %port.name(),
            baud = config.baud_rate,
            timeout = ?config.timeout,
            "serial port opened"
        );

        let mut port = PortGuard::new(port, self.console.clone());
        self.console.banner(port.name());

        let mut report = MonitorReport {
            port_name: port.name().to_string(),
            ..Default::default()
        };
        let outcome = self.poll(&mut port, &mut report);
        debug!(
            lines = report.lines,
            bytes = report.bytes_received,
            read_errors = report.read_errors,
            "monitor loop finished"
        );

        port.close();
        outcome.map(|()| report)
    }

    fn poll(&self, port: &mut O::Port, report: &mut MonitorReport) -> Result<(), MonitorError> {
        let mut buffer = LineBuffer::new(self.settings.max_line_bytes);

        while !self.stop.is_raised() {
            if let Err(source) = self.poll_once(port, &mut buffer, report) {
                buffer.clear();
                match self.settings.read_errors {
                    ReadErrorPolicy::Ignore => {
                        report.read_errors += 1;
                        warn!(port = %port.name(), error = %source, "read failed, continuing");
                    }
                    ReadErrorPolicy::Fatal => {
                        error!(port = %port.name(), error = %source, "read failed, stopping");
                        self.console.read_failed(&source);
                        return Err(MonitorError::Read {
                            port: port.name().to_string(),
                            source,
                        });
                    }
                }
            }

            // Every check is followed by a pause, busy or idle.
            thread::sleep(self.settings.poll_interval);
        }

        info!(port = %port.name(), "stop requested");
        self.console.stopped();
        Ok(())
    }

    /// One availability check, and one line read if anything is waiting.
    fn poll_once(
        &self,
        port: &mut O::Port,
        buffer: &mut LineBuffer,
        report: &mut MonitorReport,
    ) -> Result<(), PortError> {
        if port.bytes_to_read()? == 0 {
            return Ok(());
        }

        let received = buffer.read_line(port, self.settings.port.timeout)?;
        report.bytes_received += received;

        if let Some(text) = buffer.take_text(self.settings.invalid_bytes) {
            trace!(port = %port.name(), line = %text, "line received");
            self.console.line(&text);
            report.lines += 1;
        }

        Ok(())
    }
}
