// SPDX-License-Identifier: MIT

#![cfg(all(feature = "std", feature = "easy-functions"))]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::blake3::Blake3;
use crate::macros::{invariant, optionally_unsafe};

/// Constant temporary buffer size for "easy" functions.
const BUFFER_SIZE: usize = 32768;

/// Generates a digest from a given reader stream.
///
/// This is an internal function to allow other functions to
/// prepare a [`Blake3`] hasher.
#[inline]
fn hash_stream_common<R: Read>(
    hasher: &mut Blake3,
    reader: &mut R,
) -> std::io::Result<[u8; Blake3::OUT_LEN]> {
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let len = reader.read(&mut buffer)?;
        if len == 0 {
            break;
        }
        optionally_unsafe! {
            invariant!(len <= buffer.len());
        }
        hasher.update(&buffer[0..len]);
    }
    let mut digest = [0u8; Blake3::OUT_LEN];
    hasher.finalize_into(&mut digest);
    Ok(digest)
}

/// Generates a digest from a given reader stream.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
///
/// use detective_core::{hash_stream, Blake3};
///
/// let mut stream = Cursor::new(b"Hello, World!\n");
/// let digest = hash_stream(&mut stream)?;
/// assert_eq!(digest, Blake3::hash(b"Hello, World!\n"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn hash_stream<R: Read>(reader: &mut R) -> std::io::Result<[u8; Blake3::OUT_LEN]> {
    let mut hasher = Blake3::new();
    hash_stream_common(&mut hasher, reader)
}

/// Generates a digest from a given file.
///
/// The file is read through a fixed 32 KiB buffer, so arbitrarily large
/// files are hashed in constant memory.  If the file could change while
/// being hashed and a consistent snapshot matters, hash a copy or use
/// [`hash_stream()`] over a reader you control.
pub fn hash_file<P: AsRef<Path>>(path: P) -> std::io::Result<[u8; Blake3::OUT_LEN]> {
    let mut file = File::open(path)?;
    let mut hasher = Blake3::new();
    hash_stream_common(&mut hasher, &mut file)
}
