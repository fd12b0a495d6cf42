//! Sequential table readers.
//!
//! ## Archive layout (`ark:`)
//!
//! ```text
//! key1 <object>key2 <object>...
//! ```
//!
//! An object is a binary (`\0B` + record) or text (` [ ... ]\n`) vector.
//! The byte after a key must be a space or tab (consumed) or a newline.
//!
//! ## Script layout (`scp:`)
//!
//! ```text
//! key1 /path/to/one.vec
//! key2 /path/to/all.ark:1042
//! key3 gunzip -c three.gz |
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut reader = SequentialVectorReader::open("ark:feats.ark")?;
//! while !reader.done() {
//!     let key = reader.key()?.to_string();
//!     let value = reader.value()?;
//!     reader.advance()?;
//! }
//! reader.close()?;
//! ```

use std::io::BufRead;

use tracing::{debug, warn};
use vecscale_core::{
    classify_rspecifier, Error, ReadAddress, ReadSpecifier, ReadTableKind, Result, Vector,
};

use crate::codec;
use crate::scan::{next_byte, peek_byte, read_word, skip_whitespace};
use crate::xfilename::Input;

/// One `(key, vector)` pair.
pub type Entry = (String, Vector);

/// A source of table entries in stored order.
pub trait TableSource {
    /// Read the next entry. Returns `Ok(None)` once the table is exhausted.
    fn next_entry(&mut self) -> Result<Option<Entry>>;

    /// Release the underlying stream(s).
    fn close(&mut self) -> Result<()>;
}

/// Cursor over the entries of a table named by a read specifier.
///
/// Entries come out in the order they are stored. When the specifier
/// carries the `s` option the cursor also checks that keys never decrease
/// and fails on the first one that does.
pub struct SequentialVectorReader {
    rspecifier: String,
    source: Box<dyn TableSource>,
    current: Option<Entry>,
    sorted: bool,
    closed: bool,
}

impl SequentialVectorReader {
    /// Open the table named by `rspecifier`.
    pub fn open(rspecifier: &str) -> Result<Self> {
        match classify_rspecifier(rspecifier) {
            ReadAddress::TableSpecifier(spec) => Self::open_spec(rspecifier, &spec),
            _ => Err(Error::config(format!(
                "'{}' is not a valid read specifier",
                rspecifier
            ))),
        }
    }

    /// Open a table from an already-parsed specifier.
    pub fn open_spec(rspecifier: &str, spec: &ReadSpecifier) -> Result<Self> {
        let permissive = spec.options.permissive;
        let source: Box<dyn TableSource> = match spec.kind {
            ReadTableKind::Archive => Box::new(ArchiveSource::open(&spec.rxfilename, permissive)?),
            ReadTableKind::Script => Box::new(ScriptSource::open(&spec.rxfilename, permissive)?),
        };
        Self::from_source(rspecifier, source, spec.options.sorted)
    }

    /// Wrap an arbitrary source.
    pub fn from_source(rspecifier: &str, mut source: Box<dyn TableSource>, sorted: bool) -> Result<Self> {
        let current = source.next_entry()?;
        debug!(rspecifier, empty = current.is_none(), "Opened table for reading");
        Ok(SequentialVectorReader {
            rspecifier: rspecifier.to_string(),
            source,
            current,
            sorted,
            closed: false,
        })
    }

    /// True once every entry has been visited.
    pub fn done(&self) -> bool {
        self.current.is_none()
    }

    /// Move to the next entry. Fails if the reader is already done.
    pub fn advance(&mut self) -> Result<()> {
        let previous = match self.current.take() {
            Some((key, _)) => key,
            None => {
                return Err(Error::archive(format!(
                    "advance called past the end of {}",
                    self.rspecifier
                )))
            }
        };
        self.current = self.source.next_entry()?;
        if self.sorted {
            if let Some((key, _)) = &self.current {
                if key.as_str() < previous.as_str() {
                    return Err(Error::archive(format!(
                        "{} is declared sorted but key '{}' follows '{}'",
                        self.rspecifier, key, previous
                    )));
                }
            }
        }
        Ok(())
    }

    /// Key of the current entry.
    pub fn key(&self) -> Result<&str> {
        self.current
            .as_ref()
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| self.past_end("key"))
    }

    /// A fresh copy of the current vector.
    pub fn value(&self) -> Result<Vector> {
        self.current
            .as_ref()
            .map(|(_, value)| value.clone())
            .ok_or_else(|| self.past_end("value"))
    }

    /// Release the table. Safe to skip; dropping also releases it.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.source.close()
    }

    fn past_end(&self, what: &str) -> Error {
        Error::archive(format!("{} requested past the end of {}", what, self.rspecifier))
    }
}

impl Drop for SequentialVectorReader {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.source.close();
        }
    }
}

// =========================================================================
// Archive source
// =========================================================================

/// Entries stored inline in a single stream.
pub struct ArchiveSource {
    input: Option<Input>,
    rxfilename: String,
    permissive: bool,
    entries: u64,
}

impl ArchiveSource {
    /// Open the archive at an extended filename.
    pub fn open(rxfilename: &str, permissive: bool) -> Result<Self> {
        let input = Input::open(rxfilename)
            .map_err(|e| e.in_archive(&format!("cannot open archive '{}'", rxfilename)))?;
        Ok(ArchiveSource {
            input: Some(input),
            rxfilename: rxfilename.to_string(),
            permissive,
            entries: 0,
        })
    }
}

impl TableSource for ArchiveSource {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        let input = match self.input.as_mut() {
            Some(input) => input,
            None => return Ok(None),
        };
        match read_archive_entry(input) {
            Ok(Some(entry)) => {
                self.entries += 1;
                Ok(Some(entry))
            }
            Ok(None) => {
                debug!(rxfilename = %input.name(), entries = self.entries, "Reached end of archive");
                self.close()?;
                Ok(None)
            }
            Err(e) if self.permissive => {
                warn!(
                    rxfilename = %self.rxfilename,
                    entries = self.entries,
                    error = %e,
                    "Unreadable archive entry, treating as end of archive"
                );
                self.close()?;
                Ok(None)
            }
            Err(e) => Err(e.in_archive(&format!(
                "reading entry {} of archive '{}'",
                self.entries + 1,
                self.rxfilename
            ))),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self.input.take() {
            Some(input) => input.close(),
            None => Ok(()),
        }
    }
}

/// Read `key<sep><object>` from an archive stream.
pub fn read_archive_entry<R: BufRead + ?Sized>(reader: &mut R) -> Result<Option<Entry>> {
    if !skip_whitespace(reader)? {
        return Ok(None);
    }
    let key = String::from_utf8(read_word(reader)?)
        .map_err(|_| Error::archive("archive key is not valid UTF-8"))?;
    match peek_byte(reader)? {
        Some(b' ') | Some(b'\t') => {
            next_byte(reader)?;
        }
        // Newline and other whitespace stay put; text values skip them.
        Some(_) => {}
        None => {
            return Err(Error::archive(format!(
                "archive ended after key '{}' with no value",
                key
            )))
        }
    }
    let (vector, _) = codec::read_object(reader)?;
    Ok(Some((key, vector)))
}

// =========================================================================
// Script source
// =========================================================================

/// Entries indexed by a script of `key rxfilename` lines.
pub struct ScriptSource {
    input: Option<Input>,
    rxfilename: String,
    permissive: bool,
    line_no: usize,
}

impl ScriptSource {
    /// Open the script at an extended filename.
    pub fn open(rxfilename: &str, permissive: bool) -> Result<Self> {
        let input = Input::open(rxfilename)
            .map_err(|e| e.in_archive(&format!("cannot open script '{}'", rxfilename)))?;
        Ok(ScriptSource {
            input: Some(input),
            rxfilename: rxfilename.to_string(),
            permissive,
            line_no: 0,
        })
    }

    fn next_line(&mut self) -> Result<Option<(String, String)>> {
        let input = match self.input.as_mut() {
            Some(input) => input,
            None => return Ok(None),
        };
        let mut line = String::new();
        loop {
            line.clear();
            let read = input.read_line(&mut line).map_err(|e| {
                Error::from(e).in_archive(&format!(
                    "reading line {} of script '{}'",
                    self.line_no + 1,
                    self.rxfilename
                ))
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if let Some(parsed) = parse_script_line(&line) {
                return Ok(Some(parsed));
            }
            if line.trim().is_empty() {
                continue;
            }
            let err = Error::archive(format!(
                "invalid line {} in script '{}': {}",
                self.line_no,
                self.rxfilename,
                line.trim_end()
            ));
            if self.permissive {
                warn!(error = %err, "Skipping script line");
                continue;
            }
            return Err(err);
        }
    }
}

impl TableSource for ScriptSource {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        while let Some((key, location)) = self.next_line()? {
            match codec::read_resource(&location) {
                Ok((vector, _)) => return Ok(Some((key, vector))),
                Err(e) if self.permissive => {
                    warn!(key = %key, location = %location, error = %e, "Skipping unreadable script entry");
                }
                Err(e) => {
                    return Err(e.in_archive(&format!(
                        "reading '{}' for key '{}' from script '{}'",
                        location, key, self.rxfilename
                    )))
                }
            }
        }
        self.close()?;
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        match self.input.take() {
            Some(input) => input.close(),
            None => Ok(()),
        }
    }
}

/// Split a script line into `(key, location)`.
///
/// Returns `None` for blank lines and lines without a location.
pub fn parse_script_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (key, rest) = trimmed.split_once(|c: char| c.is_whitespace())?;
    let location = rest.trim();
    if key.is_empty() || location.is_empty() {
        return None;
    }
    Some((key.to_string(), location.to_string()))
}
