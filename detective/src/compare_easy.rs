// SPDX-License-Identifier: MIT

//! Easy similarity scoring of hex-encoded digests.

#![cfg(all(feature = "easy-functions", feature = "alloc"))]

use crate::compare::similarity;
use crate::error::HashError;
use crate::hex::decode_hex;


/// Scores the similarity of two hex-encoded digests, in `[0.0, 1.0]`.
///
/// Either string failing to decode results in
/// [`HashError::InvalidEncoding`]; decoded digests that are empty or of
/// different lengths result in [`HashError::InvalidInput`].
///
/// # Example
///
/// ```
/// use detective_core::similarity_hex;
///
/// assert_eq!(similarity_hex("ffff", "ffff")?, 1.0);
/// assert_eq!(similarity_hex("ff", "0f")?, 0.5);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn similarity_hex(lhs: &str, rhs: &str) -> Result<f64, HashError> {
    let lhs = decode_hex(lhs)?;
    let rhs = decode_hex(rhs)?;
    similarity(&lhs, &rhs)
}
