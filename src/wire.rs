//! Fixed-endian primitives of the Luxtronik wire format.
//!
//! Everything on the wire is big-endian. Replies are decoded from a buffered cursor: each `take_*`
//! function either consumes exactly what it needs or returns `None`, leaving the caller to wait
//! for more bytes from the transport. This is how partial reads are retried without ever
//! consuming half a word.

use tokio_util::bytes::{BufMut, BytesMut};

pub const WORD_SIZE: usize = 4;

pub fn take_u32<'a>(cursor: &mut &'a [u8]) -> Option<u32> {
    let buffer: &'a [u8] = *cursor;
    let (word, remainder) = buffer.split_first_chunk::<WORD_SIZE>()?;
    *cursor = remainder;
    Some(u32::from_be_bytes(*word))
}

pub fn take_u8<'a>(cursor: &mut &'a [u8]) -> Option<u8> {
    let buffer: &'a [u8] = *cursor;
    let (byte, remainder) = buffer.split_first()?;
    *cursor = remainder;
    Some(*byte)
}

/// Take exactly `count` bytes, or nothing at all.
pub fn take_exact<'a>(cursor: &mut &'a [u8], count: usize) -> Option<&'a [u8]> {
    let buffer: &'a [u8] = *cursor;
    let (taken, remainder) = buffer.split_at_checked(count)?;
    *cursor = remainder;
    Some(taken)
}

/// Append `words` as one contiguous run of big-endian signed integers.
pub fn put_words(dst: &mut BytesMut, words: &[i32]) {
    dst.reserve(words.len() * WORD_SIZE);
    for &word in words {
        dst.put_i32(word);
    }
}
