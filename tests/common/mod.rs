//! Shared test utilities for the line monitor tests.
//!
//! - Console capture
//! - A port wrapper that raises the stop flag after a number of polls
//! - Settings tuned for fast test loops

#![allow(dead_code)]

use serial_line_monitor::monitor::{
    Console, Language, LineMonitor, MonitorError, MonitorReport, MonitorSettings, SharedBuffer,
    StopFlag,
};
use serial_line_monitor::port::{MockSerialPort, PortConfiguration, PortError, SerialPortAdapter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A console writing into a buffer the test can read back.
pub fn capture_console(language: Language) -> (Console, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (Console::new(buffer.clone(), language), buffer)
}

/// Settings with a short timeout and a 1 ms poll interval.
pub fn fast_settings(port_name: &str) -> MonitorSettings {
    let mut settings = MonitorSettings::new(PortConfiguration::new(
        port_name,
        115200,
        Duration::from_millis(20),
    ));
    settings.poll_interval = Duration::from_millis(1);
    settings
}

/// Stands in for the user pressing Ctrl+C: raises `stop` on the n-th
/// availability check.
pub struct StopAfterPolls<P> {
    inner: P,
    remaining: AtomicUsize,
    stop: StopFlag,
}

impl<P: SerialPortAdapter> StopAfterPolls<P> {
    pub fn new(inner: P, polls: usize, stop: StopFlag) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(polls),
            stop,
        }
    }
}

impl<P: SerialPortAdapter> SerialPortAdapter for StopAfterPolls<P> {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        self.inner.read_bytes(buffer)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn bytes_to_read(&self) -> Result<usize, PortError> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left <= 1 {
            self.stop.raise();
        } else {
            self.remaining.store(left - 1, Ordering::SeqCst);
        }
        self.inner.bytes_to_read()
    }

    fn close(&mut self) -> Result<(), PortError> {
        self.inner.close()
    }
}

/// Outcome of [`run_mock`]: the run result plus the console transcript.
pub struct MockRun {
    pub result: Result<MonitorReport, MonitorError>,
    pub console: SharedBuffer,
}

impl MockRun {
    /// Console lines after the banner block.
    pub fn body(&self) -> Vec<String> {
        self.console.lines().into_iter().skip(3).collect()
    }
}

/// Run a monitor over `port` until `polls` availability checks have happened.
pub fn run_mock(port: MockSerialPort, polls: usize, settings: MonitorSettings) -> MockRun {
    let (console, buffer) = capture_console(Language::English);
    let stop = StopFlag::new();
    let flag = stop.clone();

    let opener = move |_: &PortConfiguration| -> Result<StopAfterPolls<MockSerialPort>, PortError> {
        Ok(StopAfterPolls::new(port.clone(), polls, flag.clone()))
    };

    let result = LineMonitor::new(opener, settings, console, stop).run();
    MockRun {
        result,
        console: buffer,
    }
}
