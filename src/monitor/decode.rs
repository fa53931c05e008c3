//! Text decoding for received lines.
//!
//! Decoding never fails: bytes that are not valid UTF-8 are either dropped or
//! replaced, so malformed input can never stop the monitor.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Treatment of byte sequences that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidBytes {
    /// Drop invalid sequences silently.
    #[default]
    Ignore,
    /// Substitute U+FFFD for each invalid sequence.
    Replace,
}

/// Decode `bytes` as UTF-8 under the given policy.
pub fn decode_line(bytes: &[u8], invalid: InvalidBytes) -> Cow<'_, str> {
    match invalid {
        InvalidBytes::Replace => String::from_utf8_lossy(bytes),
        InvalidBytes::Ignore => match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => Cow::Owned(drop_invalid(bytes)),
        },
    }
}

/// Decode, trim surrounding whitespace, and discard the result if nothing is left.
pub fn decode_trimmed(bytes: &[u8], invalid: InvalidBytes) -> Option<String> {
    let decoded = decode_line(bytes, invalid);
    let trimmed = decoded.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn drop_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                // `None` means a sequence truncated by the end of the input.
                let skip = e.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }
}
