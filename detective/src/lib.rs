// SPDX-License-Identifier: MIT

//! # `detective-core`: content hashing and similarity search
//!
//! This crate implements the hashing core of the Detective-H signature
//! toolkit:
//!
//! *   [`Blake2b`]: a sequential BLAKE2b hasher (RFC 7693) with a variable
//!     output length of 1 to 64 bytes, bound at construction.
//! *   [`Blake3`]: a BLAKE3-style chunked tree hasher with extendable
//!     output and keyed / key-derivation modes.  Its root-output scheme is
//!     this crate's own (see the [`blake3`-module docs](Blake3)); digests
//!     are deterministic and prefix-stable but do not match official
//!     BLAKE3 test vectors.
//! *   Hex encoding and decoding of digests ([`encode_hex()`],
//!     [`decode_hex()`]).
//! *   Digest comparison ([`digests_equal()`], [`hamming_distance()`],
//!     [`similarity()`]).
//! *   Batch operations over candidate sets ([`batch_hash()`],
//!     [`batch_exact_match()`], [`batch_similarity_search()`]).
//!
//! The crate is `no_std`-compatible; batch operations and hex strings
//! require the `"alloc"` feature and file hashing requires `"std"`
//! (both default-enabled).
//!
//! # Example
//!
//! ```
//! use detective_core::{batch_similarity_search, Blake3};
//!
//! let target = Blake3::hash(b"suspicious payload");
//! let known = [
//!     Blake3::hash(b"benign payload"),
//!     Blake3::hash(b"suspicious payload"),
//! ];
//! let candidates = [Some(known[0].as_slice()), Some(known[1].as_slice())];
//! let hits = batch_similarity_search(&target, &candidates, 0.9)?;
//! assert_eq!(hits[0].index, 1);
//! assert_eq!(hits[0].score, 1.0);
//! # Ok::<(), detective_core::HashError>(())
//! ```

// no_std
#![cfg_attr(not(any(test, doc, feature = "std")), no_std)]
// In the code maintenance mode, disallow all warnings.
#![cfg_attr(feature = "maint-code", deny(warnings))]
// unsafe code is *only* allowed on enabling the "unsafe" feature or on
// the tests.
#![cfg_attr(not(any(feature = "unsafe", test)), forbid(unsafe_code))]
// Non-test code requires documents
#![cfg_attr(not(test), warn(missing_docs))]
#![cfg_attr(not(test), warn(clippy::missing_docs_in_private_items))]
// Unless in the maintenance mode, allow unknown lints.
#![cfg_attr(not(feature = "maint-lints"), allow(unknown_lints))]
// Unless in the maintenance mode, allow old lint names.
#![cfg_attr(not(feature = "maint-lints"), allow(renamed_and_removed_lints))]
// Tests: allow unused unsafe blocks (invariant! will not need unsafe
// on tests but others may need this macro).
#![cfg_attr(test, allow(unused_unsafe))]
// Tests: constant (and/or obvious) assertions should be allowed.
#![cfg_attr(test, allow(clippy::assertions_on_constants))]

// alloc is required when the "alloc" feature is enabled or testing (including doctests).
#[cfg(any(feature = "alloc", test, doc))]
extern crate alloc;

mod batch;
mod blake2b;
mod blake3;
mod compare;
mod compare_easy;
mod error;
mod generate_easy;
mod generate_easy_std;
mod hex;
mod macros;

#[cfg(feature = "alloc")]
pub use batch::{batch_exact_match, batch_hash, batch_similarity_search, SimilarityResult};
pub use blake2b::Blake2b;
pub use blake3::Blake3;
pub use compare::{digests_equal, hamming_distance, similarity};
#[cfg(all(feature = "easy-functions", feature = "alloc"))]
pub use compare_easy::similarity_hex;
pub use error::HashError;
#[cfg(feature = "easy-functions")]
pub use generate_easy::hash_buf;
#[cfg(all(feature = "easy-functions", feature = "alloc"))]
pub use generate_easy::hash_buf_hex;
#[cfg(all(feature = "easy-functions", feature = "std"))]
pub use generate_easy_std::{hash_file, hash_stream};
#[cfg(feature = "alloc")]
pub use hex::{decode_hex, encode_hex};

/// The default digest length of [`Blake3`], in bytes.
pub const DIGEST_LEN: usize = Blake3::OUT_LEN;

/// The length of a default digest's hex representation, in characters.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// Constant assertions related to the base requirements.
#[doc(hidden)]
mod const_asserts {
    use super::*;
    use static_assertions::const_assert;
    use static_assertions::const_assert_eq;

    // We expect that usize is at least 32 bits in width
    // (chunk and batch indexing assume it).
    const_assert!(usize::BITS >= 32);

    // A hex digest holds exactly two characters per byte.
    const_assert_eq!(HEX_LEN, DIGEST_LEN * 2);

    // The default tree digest fits in a single output block.
    const_assert!(DIGEST_LEN <= Blake3::BLOCK_LEN);

    // The sequential construction covers the default digest length.
    const_assert!(DIGEST_LEN <= Blake2b::MAX_OUT_LEN);
}
