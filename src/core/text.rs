//! Single-byte (latin1) text conversion.
//!
//! Every text field on the wire stores one byte per character. Native strings are
//! re-encoded on write and rejected if they hold a character above U+00FF.

use crate::error::{ProtocolError, Result};

/// Encode `text` as one byte per character
pub fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                ProtocolError::Encoding(format!(
                    "character {c:?} (U+{:04X}) has no single-byte form",
                    u32::from(c)
                ))
            })
        })
        .collect()
}

/// Decode single-byte text; every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
