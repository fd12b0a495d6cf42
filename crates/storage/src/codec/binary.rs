//! Binary vector encoding.
//!
//! ```text
//! ┌──────────────┬──────────────┬───────────────────┬────────────────────────┐
//! │ Token (3 B)  │ Width (1 B)  │ Count (i32 LE)    │ Values (count × width) │
//! │ "FV " / "DV "│ 0x04         │                   │ f32 LE / f64 LE        │
//! └──────────────┴──────────────┴───────────────────┴────────────────────────┘
//! ```
//!
//! The width byte is the size of the count field, not of the values.

use std::io::{self, BufRead, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use vecscale_core::{Error, Result, Vector};

use crate::scan::read_word;

/// Token for single-precision payloads.
pub const FLOAT_TOKEN: &str = "FV";
/// Token for double-precision payloads.
pub const DOUBLE_TOKEN: &str = "DV";
/// Size marker preceding the element count.
const COUNT_WIDTH: i8 = 4;
/// Upper bound on speculative preallocation for untrusted counts.
const MAX_PREALLOC: usize = 1 << 16;

/// Write `vector` as an `FV` record.
pub fn write<W: Write + ?Sized>(writer: &mut W, vector: &Vector) -> Result<()> {
    writer.write_all(FLOAT_TOKEN.as_bytes())?;
    writer.write_u8(b' ')?;
    writer.write_i8(COUNT_WIDTH)?;
    writer.write_i32::<LittleEndian>(element_count(vector.len())?)?;
    for &value in vector.as_slice() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// The count field is an `i32`; longer vectors cannot be represented.
fn element_count(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::format(format!(
            "vector of {} elements exceeds the binary count limit of {}",
            len,
            i32::MAX
        ))
    })
}

/// Read an `FV` or `DV` record. `DV` values are narrowed to `f32`.
pub fn read<R: BufRead + ?Sized>(reader: &mut R) -> Result<Vector> {
    let token = read_word(reader)?;
    let double = match token.as_slice() {
        b"FV" => false,
        b"DV" => true,
        other => {
            return Err(Error::format(format!(
                "expected token {} or {}, got '{}'",
                FLOAT_TOKEN,
                DOUBLE_TOKEN,
                String::from_utf8_lossy(other)
            )))
        }
    };
    match reader.read_u8() {
        Ok(b' ') => {}
        Ok(_) => return Err(Error::format("expected space after vector token")),
        Err(e) => return Err(truncated(e, "vector token")),
    }

    let width = reader.read_i8().map_err(|e| truncated(e, "count width"))?;
    if width != COUNT_WIDTH {
        return Err(Error::format(format!(
            "expected count width {}, got {}",
            COUNT_WIDTH, width
        )));
    }
    let count = reader
        .read_i32::<LittleEndian>()
        .map_err(|e| truncated(e, "element count"))?;
    if count < 0 {
        return Err(Error::format(format!("negative element count {}", count)));
    }
    let count = count as usize;

    let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
    for index in 0..count {
        let value = if double {
            reader.read_f64::<LittleEndian>().map(|v| v as f32)
        } else {
            reader.read_f32::<LittleEndian>()
        };
        match value {
            Ok(v) => values.push(v),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(Error::format(format!(
                    "declared {} values but stream ended after {}",
                    count, index
                )))
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Vector::from(values))
}

fn truncated(e: io::Error, what: &str) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::format(format!("stream ended while reading {}", what))
    } else {
        Error::Io(e)
    }
}
