// SPDX-License-Identifier: MIT

#![cfg(feature = "easy-functions")]

use crate::blake3::Blake3;

#[cfg(feature = "alloc")]
use alloc::string::String;

#[cfg(feature = "alloc")]
use crate::hex::encode_hex;

/// Generates a digest from a given buffer.
///
/// # Example
///
/// ```
/// use detective_core::{hash_buf, Blake3};
///
/// assert_eq!(hash_buf(b"Hello, World!\n"), Blake3::hash(b"Hello, World!\n"));
/// ```
pub fn hash_buf(buffer: &[u8]) -> [u8; Blake3::OUT_LEN] {
    Blake3::hash(buffer)
}

/// Generates a digest from a given buffer as a lowercase hex string.
///
/// # Example
///
/// ```
/// let hex = detective_core::hash_buf_hex(b"Hello, World!\n");
/// assert_eq!(hex.len(), 64);
/// ```
#[cfg(feature = "alloc")]
pub fn hash_buf_hex(buffer: &[u8]) -> String {
    encode_hex(&hash_buf(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_buf_usage() {
        assert_eq!(hash_buf(b"Hello, World!\n"), Blake3::hash(b"Hello, World!\n"));
        assert_ne!(hash_buf(b"Hello, World!\n"), hash_buf(b"Hello, World!"));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn hash_buf_hex_usage() {
        use crate::hex::decode_hex;
        let hex = hash_buf_hex(b"Hello, World!\n");
        assert_eq!(hex.len(), Blake3::OUT_LEN * 2);
        assert_eq!(decode_hex(&hex).unwrap(), hash_buf(b"Hello, World!\n"));
    }
}
