//! Keyed table writers.
//!
//! Entries are emitted in the order `write` is called; nothing is buffered
//! across keys or reordered. Duplicate keys are not detected here: an archive
//! simply holds both entries, a script target is overwritten.
//!
//! A writer is finalized exactly once, by [`TableWriter::close`] or, if an
//! error cut the run short, when it is dropped. Entries written before a
//! failure stay in the output.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use tracing::{debug, warn};
use vecscale_core::{
    classify_wspecifier, Error, Result, Vector, WriteAddress, WriteOptions, WriteSpecifier,
    WriteTarget,
};

use crate::codec;
use crate::table::reader::parse_script_line;
use crate::xfilename::{classify_wxfilename, Input, Output, OutputKind};

/// A destination for table entries.
pub trait TableSink {
    /// Store one entry.
    fn write(&mut self, key: &str, vector: &Vector) -> Result<()>;

    /// Flush and release everything the sink holds.
    fn close(&mut self) -> Result<()>;
}

/// Writer for the table named by a write specifier.
pub struct TableWriter {
    wspecifier: String,
    sink: Option<Box<dyn TableSink>>,
    written: u64,
}

impl TableWriter {
    /// Open the table named by `wspecifier`.
    pub fn open(wspecifier: &str) -> Result<Self> {
        match classify_wspecifier(wspecifier) {
            WriteAddress::TableSpecifier(spec) => Self::open_spec(wspecifier, &spec),
            _ => Err(Error::config(format!(
                "'{}' is not a valid write specifier",
                wspecifier
            ))),
        }
    }

    /// Open a table from an already-parsed specifier.
    pub fn open_spec(wspecifier: &str, spec: &WriteSpecifier) -> Result<Self> {
        let sink: Box<dyn TableSink> = match &spec.target {
            WriteTarget::Archive(wx) => Box::new(ArchiveSink::create(wx, spec.options)?),
            WriteTarget::Script(rx) => Box::new(ScriptSink::load(rx, spec.options)?),
            WriteTarget::Both { archive, script } => {
                Box::new(IndexedArchiveSink::create(archive, script, spec.options)?)
            }
        };
        debug!(wspecifier, options = ?spec.options, "Opened table for writing");
        Ok(Self::from_sink(wspecifier, sink))
    }

    /// Wrap an arbitrary sink.
    pub fn from_sink(wspecifier: &str, sink: Box<dyn TableSink>) -> Self {
        TableWriter {
            wspecifier: wspecifier.to_string(),
            sink: Some(sink),
            written: 0,
        }
    }

    /// Append one entry.
    ///
    /// Keys must be non-empty and free of whitespace.
    pub fn write(&mut self, key: &str, vector: &Vector) -> Result<()> {
        validate_key(key)?;
        let sink = self.sink.as_mut().ok_or_else(|| {
            Error::archive(format!("write to closed table {}", self.wspecifier))
        })?;
        sink.write(key, vector)?;
        self.written += 1;
        Ok(())
    }

    /// Number of entries accepted so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Finalize the table.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        match self.sink.take() {
            Some(mut sink) => {
                debug!(wspecifier = %self.wspecifier, written = self.written, "Closing table");
                sink.close()
            }
            None => Ok(()),
        }
    }
}

impl Drop for TableWriter {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!(wspecifier = %self.wspecifier, error = %e, "Failed to finalize table");
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(Error::archive(format!(
            "invalid key '{}': keys must be non-empty and contain no whitespace",
            key
        )));
    }
    Ok(())
}

fn closed(target: &str) -> Error {
    Error::archive(format!("'{}' is already closed", target))
}

// =========================================================================
// ark:
// =========================================================================

/// Appends `key <object>` records to one stream.
pub struct ArchiveSink {
    output: Option<Output>,
    options: WriteOptions,
}

impl ArchiveSink {
    /// Create the archive at an extended output filename.
    pub fn create(wxfilename: &str, options: WriteOptions) -> Result<Self> {
        let output = Output::create(wxfilename)
            .map_err(|e| e.in_archive(&format!("cannot create archive '{}'", wxfilename)))?;
        Ok(ArchiveSink {
            output: Some(output),
            options,
        })
    }
}

/// Write `key ` and the object, returning the offset the object starts at.
fn write_record(output: &mut Output, key: &str, vector: &Vector, options: WriteOptions) -> Result<u64> {
    write!(output, "{} ", key)?;
    let offset = output.position();
    codec::write_object(output, vector, options.binary)?;
    if options.flush {
        output.flush()?;
    }
    Ok(offset)
}

impl TableSink for ArchiveSink {
    fn write(&mut self, key: &str, vector: &Vector) -> Result<()> {
        let output = self.output.as_mut().ok_or_else(|| closed("archive"))?;
        write_record(output, key, vector, self.options)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match self.output.take() {
            Some(output) => output.close(),
            None => Ok(()),
        }
    }
}

// =========================================================================
// ark,scp:
// =========================================================================

/// Writes an archive plus a script that points at each entry's byte offset.
pub struct IndexedArchiveSink {
    archive: Option<Output>,
    script: Option<Output>,
    options: WriteOptions,
}

impl IndexedArchiveSink {
    /// Create both outputs. The archive must be a regular file so that
    /// offsets recorded in the script can be seeked to later.
    pub fn create(archive: &str, script: &str, options: WriteOptions) -> Result<Self> {
        if !matches!(classify_wxfilename(archive), OutputKind::File(_)) {
            return Err(Error::archive(format!(
                "archive '{}' in an ark,scp specifier must be a regular file",
                archive
            )));
        }
        let archive_out = Output::create(archive)
            .map_err(|e| e.in_archive(&format!("cannot create archive '{}'", archive)))?;
        let script_out = Output::create(script)
            .map_err(|e| e.in_archive(&format!("cannot create script '{}'", script)))?;
        Ok(IndexedArchiveSink {
            archive: Some(archive_out),
            script: Some(script_out),
            options,
        })
    }
}

impl TableSink for IndexedArchiveSink {
    fn write(&mut self, key: &str, vector: &Vector) -> Result<()> {
        let archive = self.archive.as_mut().ok_or_else(|| closed("archive"))?;
        let offset = write_record(archive, key, vector, self.options)?;
        let script = self.script.as_mut().ok_or_else(|| closed("script"))?;
        writeln!(script, "{} {}:{}", key, archive.name(), offset)?;
        if self.options.flush {
            script.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Close both even if the first fails; report the first failure.
        let archive = self.archive.take().map(Output::close).unwrap_or(Ok(()));
        let script = self.script.take().map(Output::close).unwrap_or(Ok(()));
        archive.and(script)
    }
}

// =========================================================================
// scp:
// =========================================================================

/// Stores each vector at the location an existing script assigns its key.
pub struct ScriptSink {
    locations: HashMap<String, String>,
    script_name: String,
    options: WriteOptions,
}

impl ScriptSink {
    /// Load the `key wxfilename` script that directs the writes.
    pub fn load(rxfilename: &str, options: WriteOptions) -> Result<Self> {
        let input = Input::open(rxfilename)
            .map_err(|e| e.in_archive(&format!("cannot open script '{}'", rxfilename)))?;
        let mut locations = HashMap::new();
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (key, location) = parse_script_line(&line).ok_or_else(|| {
                Error::archive(format!(
                    "invalid line {} in script '{}': {}",
                    index + 1,
                    rxfilename,
                    line
                ))
            })?;
            if locations.insert(key.clone(), location).is_some() {
                return Err(Error::archive(format!(
                    "duplicate key '{}' in script '{}'",
                    key, rxfilename
                )));
            }
        }
        Ok(ScriptSink {
            locations,
            script_name: rxfilename.to_string(),
            options,
        })
    }
}

impl TableSink for ScriptSink {
    fn write(&mut self, key: &str, vector: &Vector) -> Result<()> {
        match self.locations.get(key) {
            Some(location) => codec::write_resource(vector, location, self.options.binary),
            None if self.options.permissive => {
                warn!(key, script = %self.script_name, "Key not in output script, skipping");
                Ok(())
            }
            None => Err(Error::archive(format!(
                "key '{}' not found in output script '{}'",
                key, self.script_name
            ))),
        }
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
