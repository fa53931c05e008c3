//! Scoped ownership of the open port.

use super::console::Console;
use crate::port::SerialPortAdapter;
use std::ops::{Deref, DerefMut};
use tracing::{info, warn};

/// Owns an open port and closes it when dropped.
///
/// Dropping is the only place the port gets closed, so every way out of the
/// monitor (normal return, `?`, panic unwinding) closes it exactly once.
pub struct PortGuard<P: SerialPortAdapter> {
    port: P,
    console: Console,
}

impl<P: SerialPortAdapter> PortGuard<P> {
    pub fn new(port: P, console: Console) -> Self {
        Self { port, console }
    }

    /// Close now. Equivalent to dropping the guard.
    pub fn close(self) {
        drop(self);
    }
}

impl<P: SerialPortAdapter> Deref for PortGuard<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.port
    }
}

impl<P: SerialPortAdapter> DerefMut for PortGuard<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P: SerialPortAdapter> Drop for PortGuard<P> {
    fn drop(&mut self) {
        match self.port.close() {
            Ok(()) => {
                info!(port = %self.port.name(), "serial port closed");
                self.console.port_closed();
            }
            Err(e) => warn!(port = %self.port.name(), error = %e, "failed to close serial port"),
        }
    }
}
