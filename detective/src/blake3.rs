// SPDX-License-Identifier: MIT

//! The BLAKE3-style chunked tree digest engine with extendable output.
//!
//! The chunking, compression function, and chaining-value stack follow the
//! BLAKE3 design.  Root output blocks are produced by compressing the root
//! chaining value with itself as a 32-byte zero-padded message block under
//! an incrementing output-block counter, so digests are internally defined
//! (deterministic and prefix-stable) but intentionally do not match official
//! BLAKE3 test vectors.

use crate::macros::{invariant, optionally_unsafe};


/// The default digest length in bytes.
const OUT_LEN: usize = 32;

/// The key length in bytes for the keyed mode.
const KEY_LEN: usize = 32;

/// The message block size in bytes.
const BLOCK_LEN: usize = 64;

/// The chunk size in bytes (16 blocks).
const CHUNK_LEN: usize = 1024;

/// The chaining-value stack capacity.
///
/// A stack entry exists per set bit of the completed chunk count, so 54
/// entries cover the 64-bit byte counter (`2^54` chunks of 1024 bytes).
const CV_STACK_LEN: usize = 54;

/// Flag bit: first block of a chunk.
const CHUNK_START: u32 = 1 << 0;
/// Flag bit: last block of a chunk.
const CHUNK_END: u32 = 1 << 1;
/// Flag bit: parent node compression.
const PARENT: u32 = 1 << 2;
/// Flag bit: root output compression.
const ROOT: u32 = 1 << 3;
/// Flag bit: keyed hashing mode.
const KEYED_HASH: u32 = 1 << 4;
/// Flag bit: key-derivation context hashing.
const DERIVE_KEY_CONTEXT: u32 = 1 << 5;
/// Flag bit: key-derivation output hashing.
const DERIVE_KEY_MATERIAL: u32 = 1 << 6;

/// The initialization vector (shared with SHA-256).
const IV: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

/// The message word schedule for the seven rounds.
#[rustfmt::skip]
const MSG_SCHEDULE: [[usize; 16]; 7] = [
    [ 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15],
    [ 2,  6,  3, 10,  7,  0,  4, 13,  1, 11, 12,  5,  9, 14, 15,  8],
    [ 3,  4, 10, 12, 13,  2,  7, 14,  6,  5,  9,  0, 11, 15,  8,  1],
    [10,  7, 12,  9, 14,  3, 13, 15,  4,  0, 11,  2,  5,  8,  1,  6],
    [12, 13,  9, 11, 15, 10, 14,  8,  7,  2,  5,  3,  0,  1,  6,  4],
    [ 9, 14, 11,  5,  8, 12, 15,  1, 13,  3,  0, 10,  2,  6,  4,  7],
    [11, 15,  5,  0,  1,  9,  8,  6, 14, 10,  2, 12,  3,  4,  7, 13],
];

/// The G mixing function with the 16/12/8/7 rotation constants.
#[inline(always)]
fn g(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, mx: u32, my: u32) {
    state[a] = state[a].wrapping_add(state[b]).wrapping_add(mx);
    state[d] = (state[d] ^ state[a]).rotate_right(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_right(12);
    state[a] = state[a].wrapping_add(state[b]).wrapping_add(my);
    state[d] = (state[d] ^ state[a]).rotate_right(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_right(7);
}

/// Applies one round of column and diagonal mixing.
#[inline(always)]
fn round(state: &mut [u32; 16], m: &[u32; 16], s: &[usize; 16]) {
    // Columns.
    g(state, 0, 4, 8, 12, m[s[0]], m[s[1]]);
    g(state, 1, 5, 9, 13, m[s[2]], m[s[3]]);
    g(state, 2, 6, 10, 14, m[s[4]], m[s[5]]);
    g(state, 3, 7, 11, 15, m[s[6]], m[s[7]]);
    // Diagonals.
    g(state, 0, 5, 10, 15, m[s[8]], m[s[9]]);
    g(state, 1, 6, 11, 12, m[s[10]], m[s[11]]);
    g(state, 2, 7, 8, 13, m[s[12]], m[s[13]]);
    g(state, 3, 4, 9, 14, m[s[14]], m[s[15]]);
}

/// The compression function, returning the full 16-word state.
///
/// The feed-forward folds the second half into the first and the input
/// chaining value into the second half, so callers can take either the
/// 8-word chaining value or all 16 words for extendable output.
fn compress(
    cv: &[u32; 8],
    block_words: &[u32; 16],
    counter: u64,
    block_len: u32,
    flags: u32,
) -> [u32; 16] {
    let mut state = [
        cv[0],
        cv[1],
        cv[2],
        cv[3],
        cv[4],
        cv[5],
        cv[6],
        cv[7],
        IV[0],
        IV[1],
        IV[2],
        IV[3],
        counter as u32,
        (counter >> 32) as u32,
        block_len,
        flags,
    ];
    for s in &MSG_SCHEDULE {
        round(&mut state, block_words, s);
    }
    for i in 0..8 {
        state[i] ^= state[i + 8];
        state[i + 8] ^= cv[i];
    }
    state
}

/// Takes the chaining value (first half) of a compression output.
#[inline]
fn first_8_words(state: [u32; 16]) -> [u32; 8] {
    let mut cv = [0u32; 8];
    cv.copy_from_slice(&state[..8]);
    cv
}

/// Loads a message block into 16 little-endian words.
#[inline]
fn words_from_le_bytes(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        *word = u32::from_le_bytes(buf);
    }
    words
}

/// Loads a 32-byte key into 8 little-endian words.
#[inline]
fn key_words_from_le_bytes(key: &[u8; KEY_LEN]) -> [u32; 8] {
    let mut words = [0u32; 8];
    for (word, bytes) in words.iter_mut().zip(key.chunks_exact(4)) {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        *word = u32::from_le_bytes(buf);
    }
    words
}

/// Compresses two child chaining values into their parent.
#[inline]
fn parent_chaining_value(
    left: &[u32; 8],
    right: &[u32; 8],
    key_words: &[u32; 8],
    flags: u32,
) -> [u32; 8] {
    let mut block_words = [0u32; 16];
    block_words[..8].copy_from_slice(left);
    block_words[8..].copy_from_slice(right);
    first_8_words(compress(
        key_words,
        &block_words,
        0,
        BLOCK_LEN as u32,
        flags | PARENT,
    ))
}

/// The initialization mode, selecting the key schedule and the mode flags.
#[derive(Debug, Clone, Copy)]
enum Mode {
    /// Regular (unkeyed) hashing.
    Hash,
    /// Keyed hashing with a 32-byte key.
    Keyed([u32; 8]),
    /// Context hashing inside key derivation.
    DeriveKeyContext,
    /// Output hashing inside key derivation, keyed by the context digest.
    DeriveKeyMaterial([u32; 8]),
}

impl Mode {
    /// Returns the 8-word key schedule of this mode.
    #[inline]
    fn key_words(&self) -> [u32; 8] {
        match self {
            Mode::Hash | Mode::DeriveKeyContext => IV,
            Mode::Keyed(key_words) | Mode::DeriveKeyMaterial(key_words) => *key_words,
        }
    }

    /// Returns the flag bits of this mode.
    #[inline]
    fn flags(&self) -> u32 {
        match self {
            Mode::Hash => 0,
            Mode::Keyed(_) => KEYED_HASH,
            Mode::DeriveKeyContext => DERIVE_KEY_CONTEXT,
            Mode::DeriveKeyMaterial(_) => DERIVE_KEY_MATERIAL,
        }
    }
}

/// The state of the chunk currently being filled.
#[derive(Debug, Clone)]
struct ChunkState {
    /// The running chaining value over the compressed blocks so far.
    cv: [u32; 8],

    /// The index of this chunk in the message (0-origin).
    chunk_counter: u64,

    /// The pending message block.
    ///
    /// Unused bytes are always zero, so a partial final block needs no
    /// explicit padding at output time.
    buf: [u8; BLOCK_LEN],

    /// The number of pending bytes in [`buf`](Self::buf).
    buf_len: usize,

    /// The number of blocks already compressed into [`cv`](Self::cv)
    /// (`0..=15`).
    blocks_compressed: u8,

    /// The mode flag bits carried by every compression of this chunk.
    flags: u32,
}

impl ChunkState {
    /// Creates the state for chunk number `chunk_counter`.
    fn new(key_words: [u32; 8], chunk_counter: u64, flags: u32) -> Self {
        Self {
            cv: key_words,
            chunk_counter,
            buf: [0; BLOCK_LEN],
            buf_len: 0,
            blocks_compressed: 0,
            flags,
        }
    }

    /// Returns the number of message bytes fed into this chunk.
    #[inline]
    fn len(&self) -> usize {
        BLOCK_LEN * self.blocks_compressed as usize + self.buf_len
    }

    /// Returns [`CHUNK_START`] if no block has been compressed yet.
    #[inline]
    fn start_flag(&self) -> u32 {
        if self.blocks_compressed == 0 {
            CHUNK_START
        } else {
            0
        }
    }

    /// Feeds message bytes into this chunk.
    ///
    /// The caller never feeds more than the chunk has room for.  A full
    /// buffered block is compressed only once further input arrives, so the
    /// final block of the chunk is always still buffered when the chunk's
    /// output is taken.
    fn update(&mut self, mut input: &[u8]) {
        optionally_unsafe! {
            invariant!(self.len() + input.len() <= CHUNK_LEN);
        }
        while !input.is_empty() {
            if self.buf_len == BLOCK_LEN {
                let block_words = words_from_le_bytes(&self.buf);
                self.cv = first_8_words(compress(
                    &self.cv,
                    &block_words,
                    self.chunk_counter,
                    BLOCK_LEN as u32,
                    self.flags | self.start_flag(),
                ));
                self.blocks_compressed += 1;
                self.buf = [0; BLOCK_LEN];
                self.buf_len = 0;
            }
            let take = usize::min(BLOCK_LEN - self.buf_len, input.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&input[..take]);
            self.buf_len += take;
            input = &input[take..];
        }
    }

    /// Returns the chaining value of this chunk as a tree leaf.
    ///
    /// Does not consume the state; the buffered final block (zero-padded by
    /// construction) is compressed on a copy of the running chaining value.
    fn output_chaining_value(&self) -> [u32; 8] {
        let block_words = words_from_le_bytes(&self.buf);
        first_8_words(compress(
            &self.cv,
            &block_words,
            self.chunk_counter,
            self.buf_len as u32,
            self.flags | self.start_flag() | CHUNK_END,
        ))
    }
}

/// A streaming chunked tree hasher with extendable output.
///
/// Completed 1024-byte chunks become leaves of a binary tree; the
/// chaining-value stack holds the roots of the maximal complete subtrees
/// not yet merged, one entry per set bit of the completed chunk count.
///
/// # Examples
///
/// ```
/// use detective_core::Blake3;
///
/// let mut hasher = Blake3::new();
/// hasher.update(b"sample ").update(b"number 5");
/// let mut digest = [0u8; Blake3::OUT_LEN];
/// hasher.finalize_into(&mut digest);
/// assert_eq!(digest, Blake3::hash(b"sample number 5"));
/// ```
#[derive(Debug, Clone)]
pub struct Blake3 {
    /// The chunk currently being filled.
    chunk_state: ChunkState,

    /// The 8-word key schedule ([`IV`] when unkeyed).
    key_words: [u32; 8],

    /// The chaining values of completed, unmerged subtrees.
    cv_stack: [[u32; 8]; CV_STACK_LEN],

    /// The number of live entries in [`cv_stack`](Self::cv_stack).
    cv_stack_len: u8,

    /// The mode flag bits carried by every compression.
    flags: u32,
}

impl Blake3 {
    /// The default digest length in bytes.
    pub const OUT_LEN: usize = OUT_LEN;

    /// The key length in bytes for [`new_keyed()`](Self::new_keyed).
    pub const KEY_LEN: usize = KEY_LEN;

    /// The message block size in bytes.
    pub const BLOCK_LEN: usize = BLOCK_LEN;

    /// The chunk size in bytes.
    pub const CHUNK_LEN: usize = CHUNK_LEN;

    /// Creates a hasher for the given initialization mode.
    fn with_mode(mode: Mode) -> Self {
        let key_words = mode.key_words();
        let flags = mode.flags();
        Self {
            chunk_state: ChunkState::new(key_words, 0, flags),
            key_words,
            cv_stack: [[0; 8]; CV_STACK_LEN],
            cv_stack_len: 0,
            flags,
        }
    }

    /// Creates a regular (unkeyed) hasher.
    pub fn new() -> Self {
        Self::with_mode(Mode::Hash)
    }

    /// Creates a keyed hasher.
    ///
    /// Keyed digests are unrelated to unkeyed digests of the same message.
    pub fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
        Self::with_mode(Mode::Keyed(key_words_from_le_bytes(key)))
    }

    /// Creates a key-derivation hasher for the given context.
    ///
    /// The context is hashed first and its 32-byte digest keys the hasher
    /// that the key material is then fed into.
    pub fn new_derive_key(context: &[u8]) -> Self {
        let mut context_hasher = Self::with_mode(Mode::DeriveKeyContext);
        context_hasher.update(context);
        let mut context_key = [0u8; KEY_LEN];
        context_hasher.finalize_into(&mut context_key);
        Self::with_mode(Mode::DeriveKeyMaterial(key_words_from_le_bytes(
            &context_key,
        )))
    }

    /// Pushes a chaining value onto the subtree stack.
    #[inline]
    fn push_stack(&mut self, cv: [u32; 8]) {
        optionally_unsafe! {
            invariant!((self.cv_stack_len as usize) < CV_STACK_LEN);
        }
        self.cv_stack[self.cv_stack_len as usize] = cv;
        self.cv_stack_len += 1;
    }

    /// Pops the most recent chaining value off the subtree stack.
    #[inline]
    fn pop_stack(&mut self) -> [u32; 8] {
        optionally_unsafe! {
            invariant!(self.cv_stack_len > 0);
        }
        self.cv_stack_len -= 1;
        self.cv_stack[self.cv_stack_len as usize]
    }

    /// Merges a completed chunk's chaining value into the subtree stack.
    ///
    /// `total_chunks` is the number of completed chunks including this one.
    /// Each trailing zero bit of `total_chunks` is a completed subtree whose
    /// root is on the stack and now gains a right sibling, so the carry
    /// propagates exactly like a binary counter increment.
    fn add_chunk_chaining_value(&mut self, mut new_cv: [u32; 8], mut total_chunks: u64) {
        while total_chunks & 1 == 0 {
            let left = self.pop_stack();
            new_cv = parent_chaining_value(&left, &new_cv, &self.key_words, self.flags);
            total_chunks >>= 1;
        }
        self.push_stack(new_cv);
    }

    /// Feeds message bytes into the hasher.
    ///
    /// Splitting the message across any number of `update()` calls produces
    /// the same digest as one call over the concatenation.
    pub fn update(&mut self, mut input: &[u8]) -> &mut Self {
        while !input.is_empty() {
            // A full chunk is closed only once further input follows it, so
            // the final chunk is always the one still open at finalization.
            if self.chunk_state.len() == CHUNK_LEN {
                let chunk_cv = self.chunk_state.output_chaining_value();
                let total_chunks = self.chunk_state.chunk_counter + 1;
                self.add_chunk_chaining_value(chunk_cv, total_chunks);
                self.chunk_state = ChunkState::new(self.key_words, total_chunks, self.flags);
            }
            let take = usize::min(CHUNK_LEN - self.chunk_state.len(), input.len());
            self.chunk_state.update(&input[..take]);
            input = &input[take..];
        }
        self
    }

    /// Writes `out.len()` digest bytes without consuming the hasher.
    ///
    /// Any output length is accepted, including zero.  Shorter outputs are
    /// prefixes of longer ones, and the hasher can keep accepting
    /// [`update()`](Self::update) calls after finalization.
    pub fn finalize_into(&self, out: &mut [u8]) {
        // Fold the open chunk through the subtree stack.  The top of the
        // stack is the nearest completed subtree, which sits to the left of
        // everything folded so far.
        let mut root_cv = self.chunk_state.output_chaining_value();
        for left in self.cv_stack[..self.cv_stack_len as usize].iter().rev() {
            root_cv = parent_chaining_value(left, &root_cv, &self.key_words, self.flags);
        }

        // Each output block compresses the root chaining value with itself
        // as a 32-byte zero-padded message block, counted per block.
        let mut root_block = [0u8; BLOCK_LEN];
        for (bytes, word) in root_block.chunks_exact_mut(4).zip(root_cv.iter()) {
            bytes.copy_from_slice(&word.to_le_bytes());
        }
        let block_words = words_from_le_bytes(&root_block);
        for (block_counter, out_block) in out.chunks_mut(BLOCK_LEN).enumerate() {
            let state = compress(
                &root_cv,
                &block_words,
                block_counter as u64,
                OUT_LEN as u32,
                self.flags | ROOT,
            );
            let mut block = [0u8; BLOCK_LEN];
            for (bytes, word) in block.chunks_exact_mut(4).zip(state.iter()) {
                bytes.copy_from_slice(&word.to_le_bytes());
            }
            out_block.copy_from_slice(&block[..out_block.len()]);
        }
    }

    /// Hashes `input` in one shot into a 32-byte digest.
    pub fn hash(input: &[u8]) -> [u8; OUT_LEN] {
        let mut hasher = Self::new();
        hasher.update(input);
        let mut out = [0u8; OUT_LEN];
        hasher.finalize_into(&mut out);
        out
    }
}

impl Default for Blake3 {
    fn default() -> Self {
        Self::new()
    }
}
