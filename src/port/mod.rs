//! Port abstraction layer for serial communication.
//!
//! Provides the traits the monitor reads through, the `serialport`-backed
//! implementation, and a mock for tests.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::{list_ports, PortListing, SyncSerialPort, SystemPortOpener};
pub use traits::*;
