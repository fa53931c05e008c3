//! Line accumulation from a serial port.

use super::decode::{decode_trimmed, InvalidBytes};
use crate::port::{PortError, SerialPortAdapter};
use std::time::{Duration, Instant};

/// Byte that ends a line in the incoming stream.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Bytes of the line currently being received.
///
/// The buffer is reused across lines; [`LineBuffer::take_text`] decodes and
/// empties it.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    max_len: usize,
}

impl LineBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(max_len.min(256)),
            max_len: max_len.max(1),
        }
    }

    /// Read one line's worth of bytes from `port`.
    ///
    /// Stops at [`LINE_TERMINATOR`] (kept in the buffer), when `timeout`
    /// has elapsed, when the port reports an expired read, or when the
    /// buffer holds `max_len` bytes. Returns how many bytes this call added.
    ///
    /// Transport errors other than timeouts are returned; bytes read before
    /// the error stay in the buffer.
    pub fn read_line<P>(&mut self, port: &mut P, timeout: Duration) -> Result<usize, PortError>
    where
        P: SerialPortAdapter + ?Sized,
    {
        let deadline = Instant::now() + timeout;
        let mut byte = [0u8; 1];
        let mut added = 0;

        while self.bytes.len() < self.max_len {
            match port.read_bytes(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    self.bytes.push(byte[0]);
                    added += 1;
                    if byte[0] == LINE_TERMINATOR {
                        break;
                    }
                }
                Err(e) if e.is_timeout() => break,
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                break;
            }
        }

        Ok(added)
    }

    /// Whether the buffer ends with a complete line.
    pub fn is_terminated(&self) -> bool {
        self.bytes.last() == Some(&LINE_TERMINATOR)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Decode and trim the buffered bytes, then empty the buffer.
    ///
    /// Returns `None` when nothing but whitespace (or undecodable bytes) was
    /// received.
    pub fn take_text(&mut self, invalid: InvalidBytes) -> Option<String> {
        let text = decode_trimmed(&self.bytes, invalid);
        self.bytes.clear();
        text
    }
}
