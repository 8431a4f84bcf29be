// SPDX-License-Identifier: MIT

//! Tests: [`crate::compare`].

#![cfg(test)]

use super::{digests_equal, hamming_distance, similarity};
use crate::error::HashError;

#[test]
fn equality() {
    assert!(digests_equal(&[], &[]));
    assert!(digests_equal(&[0xab, 0xcd], &[0xab, 0xcd]));
    assert!(!digests_equal(&[0xab, 0xcd], &[0xab, 0xce]));
    // Length mismatch is inequality, not an error.
    assert!(!digests_equal(&[0xab], &[0xab, 0x00]));
    assert!(!digests_equal(&[], &[0x00]));
}

#[test]
fn distance_basic() {
    assert_eq!(hamming_distance(&[0x00], &[0x00]).unwrap(), 0);
    assert_eq!(hamming_distance(&[0xff], &[0x00]).unwrap(), 8);
    assert_eq!(hamming_distance(&[0xf0, 0x0f], &[0x0f, 0xf0]).unwrap(), 16);
    assert_eq!(hamming_distance(&[0b0000_0001], &[0b0000_0011]).unwrap(), 1);
}

#[test]
fn distance_identity_and_symmetry() {
    let a = [0x13, 0x37, 0xca, 0xfe];
    let b = [0xde, 0xad, 0xbe, 0xef];
    assert_eq!(hamming_distance(&a, &a).unwrap(), 0);
    assert_eq!(hamming_distance(&a, &b).unwrap(), hamming_distance(&b, &a).unwrap());
}

#[test]
fn distance_errors() {
    assert_eq!(hamming_distance(&[], &[]), Err(HashError::InvalidInput));
    assert_eq!(hamming_distance(&[], &[0x00]), Err(HashError::InvalidInput));
    assert_eq!(hamming_distance(&[0x00], &[]), Err(HashError::InvalidInput));
    assert_eq!(hamming_distance(&[0x00], &[0x00, 0x00]), Err(HashError::InvalidInput));
}

#[test]
fn similarity_basic() {
    assert_eq!(similarity(&[0xff; 4], &[0xff; 4]).unwrap(), 1.0);
    assert_eq!(similarity(&[0xff; 4], &[0x00; 4]).unwrap(), 0.0);
    assert_eq!(similarity(&[0xff], &[0x0f]).unwrap(), 0.5);
    assert_eq!(similarity(&[0xff, 0xff], &[0xff, 0x00]).unwrap(), 0.5);
}

#[test]
fn similarity_range_and_symmetry() {
    let a = [0x13, 0x37, 0xca, 0xfe];
    let b = [0xde, 0xad, 0xbe, 0xef];
    let score = similarity(&a, &b).unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert_eq!(score, similarity(&b, &a).unwrap());
}

#[test]
fn similarity_errors() {
    assert_eq!(similarity(&[], &[]), Err(HashError::InvalidInput));
    assert_eq!(similarity(&[0x00], &[0x00, 0x00]), Err(HashError::InvalidInput));
}
