//! Binary codec for protocol messages.
//!
//! This module contains helper functions for:
//! - Converting text to and from its UTF-8 bit representation.
//! - Bitwise XOR of equal-length bit strings.
//! - Hexadecimal rendering of byte-aligned bit strings.

use crate::core::bits::BitString;
use crate::core::errors::{CodecError, ProtocolError};

/// Encodes a message as 8 bits per UTF-8 byte, most significant bit first.
pub fn encode(message: &str) -> BitString {
    BitString::from_bytes(message.as_bytes())
}

/// Decodes a bit string produced by [`encode`] back into text.
pub fn decode(bits: &BitString) -> Result<String, CodecError> {
    let bytes = bits.to_bytes()?;
    Ok(String::from_utf8(bytes)?)
}

/// Position-wise XOR of two bit strings of equal length.
pub fn xor(a: &BitString, b: &BitString) -> Result<BitString, ProtocolError> {
    if a.len() != b.len() {
        return Err(ProtocolError::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// Lowercase hexadecimal rendering of the byte grouping of `bits`.
pub fn to_hex(bits: &BitString) -> Result<String, CodecError> {
    Ok(hex::encode(bits.to_bytes()?))
}
