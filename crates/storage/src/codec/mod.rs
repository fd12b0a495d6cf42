//! Single-resource vector codec.
//!
//! A serialized object is self-describing: binary objects start with the
//! two-byte marker `\0B`, anything else is text. Reading returns the
//! detected mode alongside the vector; writing takes it explicitly.
//!
//! # Usage
//!
//! ```ignore
//! use vecscale_storage::codec;
//!
//! codec::write_resource(&vector, "out.vec", true)?;
//! let (back, binary) = codec::read_resource("out.vec")?;
//! assert!(binary);
//! ```

pub mod binary;
pub mod text;

use std::io::{BufRead, Write};

use vecscale_core::{Error, Result, Vector};

use crate::scan::{next_byte, peek_byte};
use crate::xfilename::{Input, Output};

/// Leading marker of a binary object.
pub const BINARY_MARKER: [u8; 2] = [0, b'B'];

/// Detect and consume the binary marker.
///
/// Returns `true` if the stream is binary. A text stream is left untouched.
pub fn detect_binary<R: BufRead + ?Sized>(reader: &mut R) -> Result<bool> {
    if peek_byte(reader)? != Some(BINARY_MARKER[0]) {
        return Ok(false);
    }
    reader.consume(1);
    match next_byte(reader)? {
        Some(b) if b == BINARY_MARKER[1] => Ok(true),
        _ => Err(Error::format("unrecognized binary header: expected '\\0B'")),
    }
}

/// Read one object: marker detection followed by the vector.
pub fn read_object<R: BufRead + ?Sized>(reader: &mut R) -> Result<(Vector, bool)> {
    let binary = detect_binary(reader)?;
    let vector = read_vector(reader, binary)?;
    Ok((vector, binary))
}

/// Write one object: the marker (binary only) followed by the vector.
pub fn write_object<W: Write + ?Sized>(writer: &mut W, vector: &Vector, binary: bool) -> Result<()> {
    if binary {
        writer.write_all(&BINARY_MARKER)?;
    }
    write_vector(writer, vector, binary)
}

/// Read a vector body in the given mode (no marker).
pub fn read_vector<R: BufRead + ?Sized>(reader: &mut R, binary: bool) -> Result<Vector> {
    if binary {
        binary::read(reader)
    } else {
        text::read(reader)
    }
}

/// Write a vector body in the given mode (no marker).
pub fn write_vector<W: Write + ?Sized>(writer: &mut W, vector: &Vector, binary: bool) -> Result<()> {
    if binary {
        binary::write(writer, vector)
    } else {
        text::write(writer, vector)
    }
}

/// Read the single vector stored at an extended input filename.
pub fn read_resource(rxfilename: &str) -> Result<(Vector, bool)> {
    let mut input = Input::open(rxfilename)?;
    let object = read_object(&mut input)?;
    input.close()?;
    Ok(object)
}

/// Create or truncate `wxfilename` and store `vector` there.
pub fn write_resource(vector: &Vector, wxfilename: &str, binary: bool) -> Result<()> {
    let mut output = Output::create(wxfilename)?;
    write_object(&mut output, vector, binary)?;
    output.close()
}
