// SPDX-License-Identifier: MIT

//! Digest comparison: exact equality, Hamming distance, and similarity.

use crate::error::HashError;
use crate::macros::{invariant, optionally_unsafe};

#[cfg(test)]
mod tests;

/// Returns whether two digests are byte-for-byte equal.
///
/// A length mismatch is not an error; digests of different lengths are
/// simply not equal.
///
/// # Example
///
/// ```
/// use detective_core::digests_equal;
///
/// assert!(digests_equal(&[0x12, 0x34], &[0x12, 0x34]));
/// assert!(!digests_equal(&[0x12, 0x34], &[0x12, 0x35]));
/// assert!(!digests_equal(&[0x12, 0x34], &[0x12]));
/// ```
pub fn digests_equal(lhs: &[u8], rhs: &[u8]) -> bool {
    lhs == rhs
}

/// Computes the Hamming distance between two digests, in bits.
///
/// Both digests must be non-empty and of equal length; anything else
/// results in [`HashError::InvalidInput`].
///
/// # Example
///
/// ```
/// use detective_core::hamming_distance;
///
/// assert_eq!(hamming_distance(&[0xff], &[0xff])?, 0);
/// assert_eq!(hamming_distance(&[0xff], &[0x00])?, 8);
/// assert_eq!(hamming_distance(&[0b1010_0000], &[0b0101_0000])?, 4);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn hamming_distance(lhs: &[u8], rhs: &[u8]) -> Result<u32, HashError> {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return Err(HashError::InvalidInput);
    }
    let mut distance = 0u32;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        distance += (a ^ b).count_ones();
    }
    Ok(distance)
}

/// Computes the bitwise similarity of two digests, in `[0.0, 1.0]`.
///
/// Defined as `1.0 - hamming_distance / bit_length`; `1.0` means identical
/// digests and `0.0` means every bit differs.  Symmetric in its arguments.
/// Both digests must be non-empty and of equal length; anything else
/// results in [`HashError::InvalidInput`].
///
/// # Example
///
/// ```
/// use detective_core::similarity;
///
/// assert_eq!(similarity(&[0xff, 0xff], &[0xff, 0xff])?, 1.0);
/// assert_eq!(similarity(&[0xff, 0xff], &[0x00, 0x00])?, 0.0);
/// assert_eq!(similarity(&[0xff], &[0x0f])?, 0.5);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn similarity(lhs: &[u8], rhs: &[u8]) -> Result<f64, HashError> {
    let distance = hamming_distance(lhs, rhs)?;
    let bits = (lhs.len() * 8) as u32;
    optionally_unsafe! {
        invariant!(distance <= bits);
    }
    Ok(1.0 - f64::from(distance) / f64::from(bits))
}
