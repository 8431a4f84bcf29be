// SPDX-License-Identifier: MIT

//! Batch hashing, exact matching, and similarity search over candidate sets.
//!
//! Candidates are passed as `Option<&[u8]>` so a sparse candidate set (for
//! instance, one with entries that failed to load) can be searched without
//! re-indexing; absent entries are skipped and never scored.

#![cfg(feature = "alloc")]

use alloc::vec::Vec;

use crate::blake3::Blake3;
use crate::compare::{digests_equal, similarity};
use crate::error::HashError;

#[cfg(test)]
mod tests;

/// One hit from [`batch_similarity_search()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityResult {
    /// The index of the candidate in the input slice.
    pub index: usize,

    /// The similarity score against the target, in `[0.0, 1.0]`.
    pub score: f64,
}

/// Hashes every input buffer, returning the digests in input order.
///
/// The result is one-to-one with `inputs`.  An empty input list results in
/// [`HashError::InvalidInput`]; a result buffer that cannot be allocated
/// results in [`HashError::AllocationFailure`] with nothing partially
/// returned.
///
/// # Example
///
/// ```
/// use detective_core::{batch_hash, Blake3};
///
/// let digests = batch_hash(&[b"aaa".as_slice(), b"bbb".as_slice()])?;
/// assert_eq!(digests, [Blake3::hash(b"aaa"), Blake3::hash(b"bbb")]);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn batch_hash(inputs: &[&[u8]]) -> Result<Vec<[u8; Blake3::OUT_LEN]>, HashError> {
    if inputs.is_empty() {
        return Err(HashError::InvalidInput);
    }
    let mut digests = Vec::new();
    digests
        .try_reserve_exact(inputs.len())
        .map_err(|_| HashError::AllocationFailure)?;
    for input in inputs {
        digests.push(Blake3::hash(input));
    }
    Ok(digests)
}

/// Returns the indices of all candidates byte-for-byte equal to `target`.
///
/// Indices are ascending.  Absent (`None`) candidates are skipped.  An empty
/// target or an empty candidate list results in [`HashError::InvalidInput`];
/// no match at all is `Ok` with an empty vector.
///
/// # Example
///
/// ```
/// use detective_core::batch_exact_match;
///
/// let candidates = [
///     Some(b"aaa".as_slice()),
///     Some(b"bbb".as_slice()),
///     None,
///     Some(b"bbb".as_slice()),
/// ];
/// assert_eq!(batch_exact_match(b"bbb", &candidates)?, [1, 3]);
/// assert_eq!(batch_exact_match(b"zzz", &candidates)?, []);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn batch_exact_match(
    target: &[u8],
    candidates: &[Option<&[u8]>],
) -> Result<Vec<usize>, HashError> {
    if target.is_empty() || candidates.is_empty() {
        return Err(HashError::InvalidInput);
    }
    let mut matches = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(candidate) = candidate else {
            continue;
        };
        if digests_equal(target, candidate) {
            matches.push(index);
        }
    }
    Ok(matches)
}

/// Scores every candidate against `target` and returns the hits at or above
/// `threshold`.
///
/// Absent (`None`) candidates and candidates whose length differs from the
/// target's are skipped, never zero-scored.  A candidate scoring exactly
/// `threshold` is retained.  Hits are ordered by descending score; equal
/// scores are ordered by ascending index.
///
/// An empty target or an empty candidate list results in
/// [`HashError::InvalidInput`]; no hit at all is `Ok` with an empty vector.
///
/// # Example
///
/// ```
/// use detective_core::batch_similarity_search;
///
/// let candidates = [Some([0xff, 0xff].as_slice()), Some([0xff, 0x00].as_slice())];
/// let hits = batch_similarity_search(&[0xff, 0xff], &candidates, 0.75)?;
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].index, 0);
/// assert_eq!(hits[0].score, 1.0);
/// # Ok::<(), detective_core::HashError>(())
/// ```
pub fn batch_similarity_search(
    target: &[u8],
    candidates: &[Option<&[u8]>],
    threshold: f64,
) -> Result<Vec<SimilarityResult>, HashError> {
    if target.is_empty() || candidates.is_empty() {
        return Err(HashError::InvalidInput);
    }
    let mut hits = Vec::new();
    hits.try_reserve_exact(candidates.len())
        .map_err(|_| HashError::AllocationFailure)?;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(candidate) = candidate else {
            continue;
        };
        if candidate.len() != target.len() {
            continue;
        }
        // Equal non-zero lengths make similarity() infallible here.
        let score = similarity(target, candidate)?;
        if score >= threshold {
            hits.push(SimilarityResult { index, score });
        }
    }
    // Scores are in [0.0, 1.0] and never NaN, so total_cmp is a plain
    // numeric order here.
    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
    hits.shrink_to_fit();
    Ok(hits)
}
