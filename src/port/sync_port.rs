//! Synchronous serial port implementation.
//!
//! Wraps the `serialport` crate's `SerialPort` trait with our own `SerialPortAdapter`
//! trait for dependency injection and testing.

use super::error::PortError;
use super::traits::{PortConfiguration, PortOpener, SerialPortAdapter};
use std::io::Read;

/// Synchronous serial port implementation wrapping `serialport::SerialPort`.
pub struct SyncSerialPort {
    /// The underlying serial port; `None` once closed.
    port: Option<Box<dyn serialport::SerialPort>>,
    /// The port name/path for identification.
    name: String,
}

impl SyncSerialPort {
    /// Open a serial port with the given configuration.
    ///
    /// # Example
    /// ```no_run
    /// use serial_line_monitor::port::{PortConfiguration, SyncSerialPort};
    /// use std::time::Duration;
    ///
    /// let config = PortConfiguration::new("/dev/ttyUSB0", 115200, Duration::from_secs(1));
    /// let port = SyncSerialPort::open(&config)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(config: &PortConfiguration) -> Result<Self, PortError> {
        let port = serialport::new(&config.port_name, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .flow_control(serialport::FlowControl::None)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(config.timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => PortError::not_found(&config.port_name),
                serialport::ErrorKind::InvalidInput => PortError::config(e.to_string()),
                _ => PortError::Serial(e),
            })?;

        Ok(Self {
            port: Some(port),
            name: config.port_name.clone(),
        })
    }

    fn raw(&self) -> Result<&dyn serialport::SerialPort, PortError> {
        self.port.as_deref().ok_or(PortError::NotOpen)
    }

    fn raw_mut(&mut self) -> Result<&mut Box<dyn serialport::SerialPort>, PortError> {
        self.port.as_mut().ok_or(PortError::NotOpen)
    }
}

impl SerialPortAdapter for SyncSerialPort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        self.raw_mut()?.read(buffer).map_err(PortError::Io)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bytes_to_read(&self) -> Result<usize, PortError> {
        self.raw()?
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(PortError::Serial)
    }

    fn close(&mut self) -> Result<(), PortError> {
        // Dropping the handle releases the file descriptor / COM handle.
        self.port.take().map(drop).ok_or(PortError::NotOpen)
    }
}

impl std::fmt::Debug for SyncSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSerialPort")
            .field("name", &self.name)
            .field("baud_rate", &self.port.as_ref().and_then(|p| p.baud_rate().ok()))
            .field("open", &self.port.is_some())
            .finish()
    }
}

/// Opens real devices through the `serialport` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPortOpener;

impl PortOpener for SystemPortOpener {
    type Port = SyncSerialPort;

    fn open(&self, config: &PortConfiguration) -> Result<SyncSerialPort, PortError> {
        SyncSerialPort::open(config)
    }
}

/// One entry of [`list_ports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortListing {
    pub port_name: String,
    pub kind: String,
}

/// Enumerate the serial devices currently present on the system.
pub fn list_ports() -> Result<Vec<PortListing>, PortError> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|p| PortListing {
            port_name: p.port_name,
            kind: describe_port_type(&p.port_type),
        })
        .collect())
}

fn describe_port_type(port_type: &serialport::SerialPortType) -> String {
    match port_type {
        serialport::SerialPortType::UsbPort(usb) => {
            let mut desc = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
            if let Some(product) = usb.product.as_deref().or(usb.manufacturer.as_deref()) {
                desc.push(' ');
                desc.push_str(product);
            }
            desc
        }
        serialport::SerialPortType::PciPort => "PCI".to_string(),
        serialport::SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        serialport::SerialPortType::Unknown => "unknown".to_string(),
    }
}
