// SPDX-License-Identifier: MIT

//! Tests: [`crate::macros`].

#![cfg(test)]

use crate::macros::{invariant, optionally_unsafe};

#[test]
fn optionally_unsafe_block_is_transparent() {
    let mut value = 0u32;
    optionally_unsafe! {
        value += 1;
    }
    assert_eq!(value, 1);
}

#[test]
fn invariant_holds() {
    let index = 3usize;
    let array = [0, 1, 2, 3];
    optionally_unsafe! {
        invariant!(index < array.len());
    }
    assert_eq!(array[index], 3);
}
