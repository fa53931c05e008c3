//! Mock serial port implementation for testing.
//!
//! Provides a `MockSerialPort` that simulates a receiving serial port without
//! requiring actual hardware. Clones share state, so a test can keep one
//! handle for inspection while the monitor owns another.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Inner state of the mock port, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockPortState {
    /// Queue of bytes to be returned by read operations.
    read_queue: VecDeque<u8>,
    /// Errors handed out by the next read operations, before any data.
    read_errors: VecDeque<PortError>,
    /// Errors handed out by the next availability checks.
    availability_errors: VecDeque<PortError>,
    /// Number of successful `close` calls.
    close_count: usize,
    /// Number of `bytes_to_read` calls.
    poll_count: usize,
}

/// Mock serial port implementation for testing.
///
/// # Example
/// ```
/// use serial_line_monitor::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"HELLO\n");
///
/// assert_eq!(port.bytes_to_read().unwrap(), 6);
/// let mut buffer = [0u8; 6];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"HELLO\n");
///
/// port.close().unwrap();
/// assert_eq!(port.close_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    /// The port name/identifier.
    name: String,
    /// The internal state, shared between clones.
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState::default())),
        }
    }

    /// Enqueue bytes to be returned by subsequent read operations.
    pub fn enqueue_read(&self, data: &[u8]) {
        self.state.lock().read_queue.extend(data);
    }

    /// Make the next read fail with `error`.
    pub fn fail_next_read(&self, error: PortError) {
        self.state.lock().read_errors.push_back(error);
    }

    /// Make the next availability check fail with `error`.
    pub fn fail_next_poll(&self, error: PortError) {
        self.state.lock().availability_errors.push_back(error);
    }

    /// Get the number of bytes available to read.
    pub fn available_bytes(&self) -> usize {
        self.state.lock().read_queue.len()
    }

    /// How many times the port has been closed.
    pub fn close_count(&self) -> usize {
        self.state.lock().close_count
    }

    /// Whether the port has been closed.
    pub fn is_closed(&self) -> bool {
        self.close_count() > 0
    }

    /// How many times availability has been checked.
    pub fn poll_count(&self) -> usize {
        self.state.lock().poll_count
    }

    fn ensure_open(state: &MockPortState) -> Result<(), PortError> {
        if state.close_count > 0 {
            Err(PortError::NotOpen)
        } else {
            Ok(())
        }
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();
        Self::ensure_open(&state)?;

        if let Some(error) = state.read_errors.pop_front() {
            return Err(error);
        }

        // Read as many bytes as possible from the queue
        let mut bytes_read = 0;
        for byte in buffer.iter_mut() {
            match state.read_queue.pop_front() {
                Some(queued_byte) => {
                    *byte = queued_byte;
                    bytes_read += 1;
                }
                None => break,
            }
        }

        if bytes_read == 0 && !buffer.is_empty() {
            // Nothing queued: behave like an expired read timeout
            Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "No data available",
            )))
        } else {
            Ok(bytes_read)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bytes_to_read(&self) -> Result<usize, PortError> {
        let mut state = self.state.lock();
        Self::ensure_open(&state)?;
        state.poll_count += 1;
        match state.availability_errors.pop_front() {
            Some(error) => Err(error),
            None => Ok(state.read_queue.len()),
        }
    }

    fn close(&mut self) -> Result<(), PortError> {
        let mut state = self.state.lock();
        Self::ensure_open(&state)?;
        state.close_count += 1;
        Ok(())
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("available_bytes", &self.available_bytes())
            .field("closed", &self.is_closed())
            .finish()
    }
}
