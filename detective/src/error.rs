// SPDX-License-Identifier: MIT

//! The common error type of this crate.


/// The error type for digest generation, comparison, and batch operations.
///
/// Every fallible operation in this crate reports its failure through this
/// enum.  Errors are always returned to the immediate caller; no operation
/// silently substitutes a zero digest or a partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// A required argument is absent or empty.
    ///
    /// Examples: an empty target digest or an empty candidate list passed to
    /// a batch operation, or zero-length / length-mismatched digests passed
    /// to the comparator.
    InvalidInput,

    /// The requested digest length is outside the construction's
    /// supported range.
    ///
    /// [`Blake2b::new()`](crate::Blake2b::new()) supports output lengths of
    /// `1..=64` bytes.
    LengthInvalid,

    /// The output length requested at finalization disagrees with the
    /// length bound at initialization.
    ///
    /// Returned by [`Blake2b::finalize_into()`](crate::Blake2b::finalize_into())
    /// when the output buffer does not match the length passed to
    /// [`Blake2b::new()`](crate::Blake2b::new()).
    LengthMismatch,

    /// A batch result buffer could not be allocated.
    ///
    /// Batch operations fail as a whole; a partially-populated result is
    /// never handed back.
    AllocationFailure,

    /// A hex string could not be decoded (odd length or a non-hex
    /// character).
    InvalidEncoding,
}

impl HashError {
    /// Returns whether the error is related to a digest length constraint.
    ///
    /// This returns [`true`] for [`LengthInvalid`](Self::LengthInvalid) and
    /// [`LengthMismatch`](Self::LengthMismatch).
    pub fn is_length_error(&self) -> bool {
        matches!(self, HashError::LengthInvalid | HashError::LengthMismatch)
    }
}

impl core::fmt::Display for HashError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            HashError::InvalidInput => "a required argument is absent or empty",
            HashError::LengthInvalid => "requested digest length is not supported",
            HashError::LengthMismatch => {
                "output length disagrees with the length bound at initialization"
            }
            HashError::AllocationFailure => "failed to allocate a batch result buffer",
            HashError::InvalidEncoding => "input is not a valid hex string",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HashError {}
