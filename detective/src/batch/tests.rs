// SPDX-License-Identifier: MIT

//! Tests: [`crate::batch`].

#![cfg(test)]

use alloc::vec::Vec;

use super::{batch_exact_match, batch_hash, batch_similarity_search, SimilarityResult};
use crate::blake3::Blake3;
use crate::error::HashError;

#[test]
fn hash_matches_one_shot() {
    let inputs: [&[u8]; 4] = [b"", b"aaa", b"bbb", b"a longer input buffer"];
    let digests = batch_hash(&inputs).unwrap();
    assert_eq!(digests.len(), inputs.len());
    for (input, digest) in inputs.iter().zip(digests.iter()) {
        assert_eq!(*digest, Blake3::hash(input));
    }
}

#[test]
fn hash_rejects_empty_list() {
    assert_eq!(batch_hash(&[]), Err(HashError::InvalidInput));
}

#[test]
fn exact_match_basic() {
    let candidates = [
        Some(b"aaa".as_slice()),
        Some(b"bbb".as_slice()),
        Some(b"ccc".as_slice()),
        Some(b"bbb".as_slice()),
        Some(b"ddd".as_slice()),
    ];
    assert_eq!(batch_exact_match(b"bbb", &candidates).unwrap(), [1, 3]);
    assert_eq!(batch_exact_match(b"aaa", &candidates).unwrap(), [0]);
    assert_eq!(batch_exact_match(b"zzz", &candidates).unwrap(), Vec::<usize>::new());
}

#[test]
fn exact_match_skips_absent() {
    let candidates = [None, Some(b"bbb".as_slice()), None, Some(b"bbb".as_slice())];
    assert_eq!(batch_exact_match(b"bbb", &candidates).unwrap(), [1, 3]);
    let all_absent: [Option<&[u8]>; 3] = [None, None, None];
    assert_eq!(batch_exact_match(b"bbb", &all_absent).unwrap(), Vec::<usize>::new());
}

#[test]
fn exact_match_errors() {
    let candidates = [Some(b"bbb".as_slice())];
    assert_eq!(batch_exact_match(b"", &candidates), Err(HashError::InvalidInput));
    assert_eq!(batch_exact_match(b"bbb", &[]), Err(HashError::InvalidInput));
}

#[test]
fn similarity_search_orders_by_score() {
    let target = [0xff, 0xff];
    let candidates = [
        Some([0x00, 0x00].as_slice()), // score 0.0
        Some([0xff, 0xff].as_slice()), // score 1.0
        Some([0xff, 0x00].as_slice()), // score 0.5
        Some([0xff, 0x0f].as_slice()), // score 0.75
    ];
    let hits = batch_similarity_search(&target, &candidates, 0.0).unwrap();
    let indices: Vec<usize> = hits.iter().map(|hit| hit.index).collect();
    assert_eq!(indices, [1, 3, 2, 0]);
    assert_eq!(hits[0].score, 1.0);
    assert_eq!(hits[1].score, 0.75);
    assert_eq!(hits[2].score, 0.5);
    assert_eq!(hits[3].score, 0.0);
}

#[test]
fn similarity_search_tie_break_is_ascending_index() {
    let target = [0xff];
    let candidates = [
        Some([0x0f].as_slice()), // 0.5
        Some([0xf0].as_slice()), // 0.5
        Some([0xff].as_slice()), // 1.0
        Some([0x3c].as_slice()), // 0.5
    ];
    let hits = batch_similarity_search(&target, &candidates, 0.0).unwrap();
    let indices: Vec<usize> = hits.iter().map(|hit| hit.index).collect();
    assert_eq!(indices, [2, 0, 1, 3]);
}

#[test]
fn similarity_search_threshold_boundary() {
    let target = [0xff];
    let candidates = [Some([0x0f].as_slice())]; // score 0.5 exactly
    assert_eq!(batch_similarity_search(&target, &candidates, 0.5).unwrap().len(), 1);
    assert_eq!(batch_similarity_search(&target, &candidates, 0.500001).unwrap().len(), 0);
    // threshold 0.0 keeps everything, 1.0 keeps exact matches only
    assert_eq!(batch_similarity_search(&target, &candidates, 0.0).unwrap().len(), 1);
    assert_eq!(batch_similarity_search(&target, &candidates, 1.0).unwrap().len(), 0);
    let exact = [Some([0xff].as_slice())];
    assert_eq!(batch_similarity_search(&target, &exact, 1.0).unwrap().len(), 1);
}

#[test]
fn similarity_search_skips_absent_and_mismatched() {
    let target = [0xff, 0xff];
    let candidates = [
        None,
        Some([0xff].as_slice()),             // length mismatch: skipped
        Some([0xff, 0xff, 0xff].as_slice()), // length mismatch: skipped
        Some([0xff, 0xff].as_slice()),
    ];
    let hits = batch_similarity_search(&target, &candidates, 0.0).unwrap();
    assert_eq!(hits, [SimilarityResult { index: 3, score: 1.0 }]);
}

#[test]
fn similarity_search_errors() {
    let candidates = [Some([0xff].as_slice())];
    assert_eq!(
        batch_similarity_search(&[], &candidates, 0.0),
        Err(HashError::InvalidInput)
    );
    assert_eq!(
        batch_similarity_search(&[0xff], &[], 0.0),
        Err(HashError::InvalidInput)
    );
}

#[test]
fn similarity_search_empty_result_is_ok() {
    let target = [0xff];
    let candidates = [Some([0x00].as_slice())];
    assert_eq!(batch_similarity_search(&target, &candidates, 0.9).unwrap(), []);
}
