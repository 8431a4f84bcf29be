// SPDX-License-Identifier: MIT

//! The BLAKE2b digest engine (sequential, variable output length).

use crate::error::HashError;
use crate::macros::{invariant, optionally_unsafe};

#[cfg(test)]
mod tests;

/// The internal block size of BLAKE2b, in bytes.
const BLOCK_LEN: usize = 128;

/// The number of mixing rounds per compression.
const ROUNDS: usize = 12;

/// The BLAKE2b initialization vector.
///
/// The fractional parts of the square roots of the first eight primes,
/// as specified in RFC 7693.
const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

/// The message word permutation schedule.
///
/// Rounds 10 and 11 repeat rounds 0 and 1 (RFC 7693, section 2.7).
#[rustfmt::skip]
const SIGMA: [[usize; 16]; ROUNDS] = [
    [ 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15],
    [14, 10,  4,  8,  9, 15, 13,  6,  1, 12,  0,  2, 11,  7,  5,  3],
    [11,  8, 12,  0,  5,  2, 15, 13, 10, 14,  3,  6,  7,  1,  9,  4],
    [ 7,  9,  3,  1, 13, 12, 11, 14,  2,  6,  5, 10,  4,  0, 15,  8],
    [ 9,  0,  5,  7,  2,  4, 10, 15, 14,  1, 11, 12,  6,  8,  3, 13],
    [ 2, 12,  6, 10,  0, 11,  8,  3,  4, 13,  7,  5, 15, 14,  1,  9],
    [12,  5,  1, 15, 14, 13,  4, 10,  0,  7,  6,  3,  9,  2,  8, 11],
    [13, 11,  7, 14, 12,  1,  3,  9,  5,  0, 15,  4,  8,  6,  2, 10],
    [ 6, 15, 14,  9, 11,  3,  0,  8, 12,  2, 13,  7,  1,  4, 10,  5],
    [10,  2,  8,  4,  7,  6,  1,  5, 15, 11,  9, 14,  3, 12, 13,  0],
    [ 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15],
    [14, 10,  4,  8,  9, 15, 13,  6,  1, 12,  0,  2, 11,  7,  5,  3],
];

/// The G mixing function.
///
/// Mixes two message words into four state words with the
/// 32/24/16/63 rotation constants.
#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// A streaming BLAKE2b hasher with a variable output length.
///
/// The output length is fixed at construction (`1..=64` bytes) and bound
/// into the parameter block, so two hashers with different output lengths
/// produce unrelated digests even over the same input.
///
/// # Examples
///
/// ```
/// use detective_core::Blake2b;
///
/// let mut hasher = Blake2b::new(Blake2b::MAX_OUT_LEN)?;
/// hasher.update(b"Hello, ").update(b"World!");
/// let mut digest = [0u8; Blake2b::MAX_OUT_LEN];
/// hasher.finalize_into(&mut digest)?;
/// # Ok::<(), detective_core::HashError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Blake2b {
    /// The chained state.
    h: [u64; 8],

    /// The 128-bit message byte counter (`t[0]` is the low word).
    t: [u64; 2],

    /// The finalization flags (`f[0]` is set to all ones on the last block).
    f: [u64; 2],

    /// The pending message block.
    ///
    /// The last block of the message is always held back here so that the
    /// final compression can be flagged, even when the message length is an
    /// exact multiple of [`BLOCK_LEN`].
    buf: [u8; BLOCK_LEN],

    /// The number of pending bytes in [`buf`](Self::buf) (`0..=BLOCK_LEN`).
    buf_len: usize,

    /// The output length bound at construction.
    out_len: usize,
}

impl Blake2b {
    /// The maximum digest length in bytes.
    pub const MAX_OUT_LEN: usize = 64;

    /// Creates a new hasher producing an `out_len`-byte digest.
    ///
    /// `out_len` must be in `1..=64`; anything else results in
    /// [`HashError::LengthInvalid`].
    pub fn new(out_len: usize) -> Result<Self, HashError> {
        if out_len == 0 || out_len > Self::MAX_OUT_LEN {
            return Err(HashError::LengthInvalid);
        }
        let mut h = IV;
        // Parameter block word 0: digest length, fanout 1, depth 1.
        h[0] ^= 0x0101_0000 ^ (out_len as u64);
        Ok(Self {
            h,
            t: [0; 2],
            f: [0; 2],
            buf: [0; BLOCK_LEN],
            buf_len: 0,
            out_len,
        })
    }

    /// Returns the output length bound at construction.
    #[inline]
    pub fn out_len(&self) -> usize {
        self.out_len
    }

    /// Advances the message byte counter by `n`.
    #[inline]
    fn increment_counter(&mut self, n: u64) {
        self.t[0] = self.t[0].wrapping_add(n);
        if self.t[0] < n {
            self.t[1] = self.t[1].wrapping_add(1);
        }
    }

    /// Compresses one message block into the chained state.
    fn compress(&mut self, block: &[u8; BLOCK_LEN]) {
        let mut m = [0u64; 16];
        for (word, bytes) in m.iter_mut().zip(block.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            *word = u64::from_le_bytes(buf);
        }

        let mut v = [0u64; 16];
        v[..8].copy_from_slice(&self.h);
        v[8..].copy_from_slice(&IV);
        v[12] ^= self.t[0];
        v[13] ^= self.t[1];
        v[14] ^= self.f[0];
        v[15] ^= self.f[1];

        for s in &SIGMA {
            g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
            g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
            g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
            g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
            g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
            g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
            g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
            g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
        }

        for (i, word) in self.h.iter_mut().enumerate() {
            *word ^= v[i] ^ v[i + 8];
        }
    }

    /// Feeds message bytes into the hasher.
    ///
    /// Splitting the message across any number of `update()` calls produces
    /// the same digest as one call over the concatenation.
    pub fn update(&mut self, mut input: &[u8]) -> &mut Self {
        if input.is_empty() {
            return self;
        }
        // Compress the pending block only once more input follows it,
        // so the final block is always available to flag at finalization.
        if self.buf_len + input.len() > BLOCK_LEN {
            let fill = BLOCK_LEN - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&input[..fill]);
            input = &input[fill..];
            self.increment_counter(BLOCK_LEN as u64);
            let block = self.buf;
            self.compress(&block);
            self.buf_len = 0;
            while input.len() > BLOCK_LEN {
                optionally_unsafe! {
                    invariant!(input.len() >= BLOCK_LEN);
                }
                let mut block = [0u8; BLOCK_LEN];
                block.copy_from_slice(&input[..BLOCK_LEN]);
                input = &input[BLOCK_LEN..];
                self.increment_counter(BLOCK_LEN as u64);
                self.compress(&block);
            }
        }
        self.buf[self.buf_len..self.buf_len + input.len()].copy_from_slice(input);
        self.buf_len += input.len();
        self
    }

    /// Writes the digest into `out` without consuming the hasher.
    ///
    /// `out.len()` must equal the output length bound at construction;
    /// anything else results in [`HashError::LengthMismatch`].  The hasher
    /// itself is left untouched, so it can keep accepting
    /// [`update()`](Self::update) calls and be finalized again later.
    pub fn finalize_into(&self, out: &mut [u8]) -> Result<(), HashError> {
        if out.len() != self.out_len {
            return Err(HashError::LengthMismatch);
        }
        let mut state = self.clone();
        state.increment_counter(state.buf_len as u64);
        state.f[0] = u64::MAX;
        state.buf[state.buf_len..].fill(0);
        let block = state.buf;
        state.compress(&block);

        let mut digest = [0u8; Self::MAX_OUT_LEN];
        for (bytes, word) in digest.chunks_exact_mut(8).zip(state.h.iter()) {
            bytes.copy_from_slice(&word.to_le_bytes());
        }
        optionally_unsafe! {
            invariant!(out.len() <= Self::MAX_OUT_LEN);
        }
        out.copy_from_slice(&digest[..out.len()]);
        Ok(())
    }

    /// Hashes `input` in one shot into `out`.
    ///
    /// `out.len()` selects the digest length and must be in `1..=64`.
    ///
    /// # Example
    ///
    /// ```
    /// use detective_core::{encode_hex, Blake2b};
    ///
    /// let mut digest = [0u8; 64];
    /// Blake2b::hash_into(b"", &mut digest)?;
    /// assert_eq!(
    ///     encode_hex(&digest),
    ///     "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
    ///      d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
    /// );
    /// # Ok::<(), detective_core::HashError>(())
    /// ```
    pub fn hash_into(input: &[u8], out: &mut [u8]) -> Result<(), HashError> {
        let mut hasher = Self::new(out.len())?;
        hasher.update(input);
        hasher.finalize_into(out)
    }
}
