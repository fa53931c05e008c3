//! Core traits for serial port abstraction.
//!
//! `SerialPortAdapter` is the handle the monitor reads from, `PortOpener` is
//! how it gets one. Real ports and mocks are interchangeable behind both.

use super::error::PortError;
use std::time::Duration;

/// Connection parameters for a serial port.
///
/// Framing is always 8N1 without flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConfiguration {
    /// System path of the device (e.g. "COM13" or "/dev/ttyUSB0").
    pub port_name: String,

    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Bound on a single blocking read.
    pub timeout: Duration,
}

impl PortConfiguration {
    pub fn new(port_name: impl Into<String>, baud_rate: u32, timeout: Duration) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            timeout,
        }
    }
}

/// Trait for serial port I/O operations.
///
/// This trait abstracts over the synchronous operations the monitor needs,
/// allowing both real hardware ports and mock implementations for testing.
pub trait SerialPortAdapter: Send {
    /// Read bytes from the serial port into the provided buffer.
    ///
    /// Returns the number of bytes actually read. An expired read timeout is
    /// reported as an error for which [`PortError::is_timeout`] is true.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Get the name/path of this serial port.
    fn name(&self) -> &str;

    /// Number of received bytes waiting to be read.
    fn bytes_to_read(&self) -> Result<usize, PortError>;

    /// Release the device.
    ///
    /// After a successful close every other operation returns
    /// [`PortError::NotOpen`]. Closing twice is an error as well.
    fn close(&mut self) -> Result<(), PortError>;
}

/// Something that can open a [`SerialPortAdapter`].
pub trait PortOpener {
    type Port: SerialPortAdapter;

    /// Make a single attempt to open the configured device.
    fn open(&self, config: &PortConfiguration) -> Result<Self::Port, PortError>;
}

impl<F, P> PortOpener for F
where
    F: Fn(&PortConfiguration) -> Result<P, PortError>,
    P: SerialPortAdapter,
{
    type Port = P;

    fn open(&self, config: &PortConfiguration) -> Result<P, PortError> {
        self(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;

    #[test]
    fn test_configuration_new() {
        let config = PortConfiguration::new("COM13", 115200, Duration::from_secs(1));
        assert_eq!(config.port_name, "COM13");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_closure_opener() {
        let opener = |config: &PortConfiguration| -> Result<MockSerialPort, PortError> {
            Ok(MockSerialPort::new(config.port_name.clone()))
        };
        let config = PortConfiguration::new("MOCK7", 9600, Duration::from_millis(10));

        let port = opener.open(&config).unwrap();
        assert_eq!(port.name(), "MOCK7");
    }

    #[test]
    fn test_closure_opener_failure() {
        let opener = |config: &PortConfiguration| -> Result<MockSerialPort, PortError> {
            Err(PortError::not_found(config.port_name.clone()))
        };
        let config = PortConfiguration::new("COM99", 9600, Duration::from_millis(10));

        assert!(matches!(opener.open(&config), Err(PortError::NotFound(_))));
    }
}
