//! Byte-level scanning helpers over `BufRead`.
//!
//! Archives interleave whitespace-delimited text (keys, text vectors) with
//! raw binary payloads, so all parsing peeks at single bytes rather than
//! going through line or token iterators that would over-read.

use std::io::{self, BufRead};

/// Look at the next byte without consuming it. `None` at end of stream.
pub(crate) fn peek_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let buf = reader.fill_buf()?;
    Ok(buf.first().copied())
}

/// Consume and return the next byte. `None` at end of stream.
pub(crate) fn next_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Skip ASCII whitespace. Returns false if the stream ended.
pub(crate) fn skip_whitespace<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<bool> {
    loop {
        match peek_byte(reader)? {
            Some(b) if b.is_ascii_whitespace() => reader.consume(1),
            Some(_) => return Ok(true),
            None => return Ok(false),
        }
    }
}

/// Read a maximal run of non-whitespace bytes, leaving the delimiter unread.
pub(crate) fn read_word<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut word = Vec::new();
    while let Some(b) = peek_byte(reader)? {
        if b.is_ascii_whitespace() {
            break;
        }
        word.push(b);
        reader.consume(1);
    }
    Ok(word)
}
