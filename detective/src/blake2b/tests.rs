// SPDX-License-Identifier: MIT

//! Tests: [`crate::blake2b`].

#![cfg(test)]

use alloc::vec::Vec;

use super::Blake2b;
use crate::error::HashError;

/// The official BLAKE2b-512 digest of the empty message (RFC 7693 parameters).
const EMPTY_512_HEX: &str = "\
    786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
    d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce";

/// Convenience wrapper returning the digest as a [`Vec<u8>`].
fn hash(input: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; out_len];
    Blake2b::hash_into(input, &mut out).unwrap();
    out
}

#[test]
fn empty_input_official_vector() {
    let expected: Vec<u8> = EMPTY_512_HEX
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let hex = core::str::from_utf8(pair).unwrap();
            u8::from_str_radix(hex, 16).unwrap()
        })
        .collect();
    assert_eq!(hash(b"", 64), expected);
}

#[test]
fn new_rejects_bad_lengths() {
    assert_eq!(Blake2b::new(0).unwrap_err(), HashError::LengthInvalid);
    assert_eq!(Blake2b::new(65).unwrap_err(), HashError::LengthInvalid);
    for out_len in 1..=Blake2b::MAX_OUT_LEN {
        assert_eq!(Blake2b::new(out_len).unwrap().out_len(), out_len);
    }
}

#[test]
fn finalize_rejects_mismatched_output() {
    let hasher = Blake2b::new(32).unwrap();
    let mut short = [0u8; 31];
    let mut long = [0u8; 33];
    assert_eq!(hasher.finalize_into(&mut short), Err(HashError::LengthMismatch));
    assert_eq!(hasher.finalize_into(&mut long), Err(HashError::LengthMismatch));
    let mut exact = [0u8; 32];
    assert!(hasher.finalize_into(&mut exact).is_ok());
}

#[test]
fn deterministic() {
    assert_eq!(hash(b"abc", 64), hash(b"abc", 64));
    assert_ne!(hash(b"abc", 64), hash(b"abd", 64));
    assert_ne!(hash(b"abc", 64), hash(b"", 64));
}

#[test]
fn streaming_matches_one_shot() {
    let mut hasher = Blake2b::new(64).unwrap();
    hasher.update(b"abcd").update(b"efgh");
    let mut streamed = [0u8; 64];
    hasher.finalize_into(&mut streamed).unwrap();
    assert_eq!(streamed.to_vec(), hash(b"abcdefgh", 64));
}

#[test]
fn streaming_all_split_points() {
    let input: Vec<u8> = (0..300u16).map(|i| (i % 251) as u8).collect();
    let expected = hash(&input, 32);
    for split in 0..=input.len() {
        let mut hasher = Blake2b::new(32).unwrap();
        hasher.update(&input[..split]).update(&input[split..]);
        let mut digest = [0u8; 32];
        hasher.finalize_into(&mut digest).unwrap();
        assert_eq!(digest.to_vec(), expected, "split={}", split);
    }
}

#[test]
fn block_boundary_lengths() {
    // Exact multiples of the block size exercise the held-back final block.
    for len in [0usize, 1, 127, 128, 129, 255, 256, 257, 1024] {
        let input = alloc::vec![0xa5u8; len];
        let one_shot = hash(&input, 64);
        let mut hasher = Blake2b::new(64).unwrap();
        for byte in &input {
            hasher.update(core::slice::from_ref(byte));
        }
        let mut streamed = [0u8; 64];
        hasher.finalize_into(&mut streamed).unwrap();
        assert_eq!(streamed.to_vec(), one_shot, "len={}", len);
    }
}

#[test]
fn update_after_finalize() {
    // finalize_into() leaves the hasher usable; continuing to update
    // must behave as if the first finalization never happened.
    let mut hasher = Blake2b::new(64).unwrap();
    hasher.update(b"abcd");
    let mut first = [0u8; 64];
    hasher.finalize_into(&mut first).unwrap();
    assert_eq!(first.to_vec(), hash(b"abcd", 64));

    hasher.update(b"efgh");
    let mut second = [0u8; 64];
    hasher.finalize_into(&mut second).unwrap();
    assert_eq!(second.to_vec(), hash(b"abcdefgh", 64));
}

#[test]
fn output_length_is_bound_into_state() {
    // Shorter digests are not prefixes of longer ones
    // because the parameter block differs.
    let long = hash(b"abc", 64);
    let short = hash(b"abc", 32);
    assert_ne!(short, long[..32].to_vec());
}

#[test]
fn distinct_lengths_all_work() {
    for out_len in 1..=Blake2b::MAX_OUT_LEN {
        let digest = hash(b"length sweep", out_len);
        assert_eq!(digest.len(), out_len);
    }
}
