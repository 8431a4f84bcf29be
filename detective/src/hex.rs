// SPDX-License-Identifier: MIT

//! Lowercase hex encoding and decoding for digests.

#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use crate::error::HashError;


/// Hex alphabet table in [`u8`] (lowercase).
///
/// Digests are always *encoded* with this (lowercase) alphabet,
/// two characters per byte, most significant nibble first.
#[cfg(feature = "alloc")]
pub(crate) const HEX_TABLE_U8: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7',
    b'8', b'9', b'a', b'b', b'c', b'd', b'e', b'f',
];

/// Reverse byte to hex nibble value table.
///
/// This table has all 256 entries for branchless lookup, even on safe Rust.
/// Both lowercase and uppercase digits are accepted on decoding
/// (encoding always emits lowercase).
#[cfg(feature = "alloc")]
const HEX_REV_TABLE_U8: [u8; 256] = [
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
];

/// The constant representing an "invalid" hex nibble value.
#[cfg(feature = "alloc")]
pub(crate) const HEX_INVALID: u8 = 0x10;

/// Tries to convert a hex digit into its nibble value.
///
/// If `ch` is not a valid hex digit, [`HEX_INVALID`] is returned.
///
/// Bound checking will not be performed on optimized settings because
/// [`HEX_REV_TABLE_U8`] covers all possible values of [`u8`].
#[cfg(feature = "alloc")]
#[inline]
pub(crate) fn hex_index(ch: u8) -> u8 {
    HEX_REV_TABLE_U8[ch as usize]
}

/// Encodes a byte sequence into a lowercase hex string.
///
/// The result has exactly `2 * bytes.len()` characters, two per byte,
/// with no separators.
///
/// # Example
///
/// ```
/// assert_eq!(detective_core::encode_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(detective_core::encode_hex(&[]), "");
/// ```
#[cfg(feature = "alloc")]
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        hex.push(HEX_TABLE_U8[(byte >> 4) as usize] as char);
        hex.push(HEX_TABLE_U8[(byte & 0x0f) as usize] as char);
    }
    hex
}

/// Decodes a hex string into a byte sequence.
///
/// Both lowercase and uppercase digits are accepted.  An odd-length input
/// or a non-hex character results in
/// [`HashError::InvalidEncoding`](crate::HashError::InvalidEncoding).
///
/// Round-trip exact: `decode_hex(&encode_hex(b))` recovers `b` for all `b`.
///
/// # Examples
///
/// ```
/// use detective_core::{decode_hex, HashError};
///
/// assert_eq!(decode_hex("deadbeef").unwrap(), [0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(decode_hex("abc"), Err(HashError::InvalidEncoding));
/// assert_eq!(decode_hex("zz"), Err(HashError::InvalidEncoding));
/// ```
#[cfg(feature = "alloc")]
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, HashError> {
    let hex = hex.as_bytes();
    if hex.len() % 2 != 0 {
        return Err(HashError::InvalidEncoding);
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for pair in hex.chunks_exact(2) {
        let hi = hex_index(pair[0]);
        let lo = hex_index(pair[1]);
        if hi == HEX_INVALID || lo == HEX_INVALID {
            return Err(HashError::InvalidEncoding);
        }
        bytes.push((hi << 4) | lo);
    }
    Ok(bytes)
}
