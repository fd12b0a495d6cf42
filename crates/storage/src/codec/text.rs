//! Text vector encoding: ` [ v0 v1 ... ]` and a newline.
//!
//! Values are printed with the shortest decimal form that parses back to the
//! same `f32`, so a text round trip is exact.

use std::io::{BufRead, Write};

use vecscale_core::{Error, Result, Vector};

use crate::scan::{next_byte, peek_byte, read_word, skip_whitespace};

/// Write `vector` in text form.
pub fn write<W: Write + ?Sized>(writer: &mut W, vector: &Vector) -> Result<()> {
    writer.write_all(b" [ ")?;
    for &value in vector.as_slice() {
        write!(writer, "{} ", format_value(value))?;
    }
    writer.write_all(b"]\n")?;
    Ok(())
}

/// Read a bracketed text vector and the line break that follows it.
pub fn read<R: BufRead + ?Sized>(reader: &mut R) -> Result<Vector> {
    if !skip_whitespace(reader)? {
        return Err(Error::format("expected '[' but stream is empty"));
    }
    match next_byte(reader)? {
        Some(b'[') => {}
        Some(other) => {
            return Err(Error::format(format!(
                "expected '[' to start a text vector, got '{}'",
                char::from(other).escape_default()
            )))
        }
        None => return Err(Error::format("expected '['")),
    }

    let mut values = Vec::new();
    loop {
        if !skip_whitespace(reader)? {
            return Err(Error::format("stream ended before closing ']'"));
        }
        let word = read_word(reader)?;
        let (number, closed) = match word.strip_suffix(b"]") {
            Some(number) => (number, true),
            None => (word.as_slice(), false),
        };
        if !number.is_empty() {
            values.push(parse_value(number)?);
        }
        if closed {
            break;
        }
    }

    // Consume one trailing line break so the next archive key starts clean.
    if peek_byte(reader)? == Some(b'\r') {
        reader.consume(1);
    }
    if peek_byte(reader)? == Some(b'\n') {
        reader.consume(1);
    }
    Ok(Vector::from(values))
}

fn parse_value(bytes: &[u8]) -> Result<f32> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| Error::format("non-UTF-8 bytes in text vector"))?;
    text.parse::<f32>()
        .map_err(|_| Error::format(format!("invalid value '{}' in text vector", text)))
}

fn format_value(value: f32) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-5..1e16).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}
