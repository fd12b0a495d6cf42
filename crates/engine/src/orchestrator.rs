//! Scaling pipeline
//!
//! ```text
//! Start ──plan()──► Classified ──► Single ──┐
//!   │                   │                   ├──► Done(RunReport)
//!   │                   └────────► Table ───┘
//!   └──────────── any error ───────────────────► Failed(Error)
//! ```
//!
//! Both addresses are classified before anything is opened, so a mixed or
//! malformed pair fails without touching the filesystem. In table mode the
//! writer is opened before the reader and entries flow through one at a
//! time in stored order.

use tracing::{debug, info};
use vecscale_core::{
    classify_rspecifier, classify_wspecifier, Error, ReadAddress, ReadSpecifier, Result,
    WriteAddress, WriteSpecifier,
};
use vecscale_storage::{codec, SequentialVectorReader, TableWriter};

use crate::options::ScaleOptions;

/// Which branch a run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One vector from a plain resource to a plain resource.
    Single,
    /// Every entry of a table into another table.
    Table,
}

/// The classified pair of addresses, before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPlan {
    /// Plain resource in, plain resource out.
    Single {
        /// Extended input filename.
        rxfilename: String,
        /// Extended output filename.
        wxfilename: String,
    },
    /// Table in, table out.
    Table {
        /// Parsed input specifier.
        read: ReadSpecifier,
        /// Parsed output specifier.
        write: WriteSpecifier,
    },
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Branch taken.
    pub mode: RunMode,
    /// Vectors scaled and written.
    pub processed: u64,
    /// Input address as given.
    pub input: String,
    /// Output address as given.
    pub output: String,
}

impl RunReport {
    /// Whether the run counts as a success.
    ///
    /// A table run that processed nothing most likely points at a wrong
    /// address, so it is reported as a failure. A single-resource run that
    /// completed is always a success.
    pub fn succeeded(&self) -> bool {
        match self.mode {
            RunMode::Single => true,
            RunMode::Table => self.processed > 0,
        }
    }
}

/// Classify both addresses and decide which branch to run.
///
/// # Errors
///
/// Configuration error if either address is a malformed specifier or if one
/// is a table and the other is not.
pub fn plan(input: &str, output: &str) -> Result<RunPlan> {
    let read = classify_rspecifier(input);
    let write = classify_wspecifier(output);
    debug!(input, output, input_kind = %read.kind(), output_kind = %write.kind(), "Classified addresses");

    match (read, write) {
        (ReadAddress::Invalid(spec), _) => Err(Error::config(format!(
            "Invalid read specifier '{}'",
            spec
        ))),
        (_, WriteAddress::Invalid(spec)) => Err(Error::config(format!(
            "Invalid write specifier '{}'",
            spec
        ))),
        (ReadAddress::PlainResource(rxfilename), WriteAddress::PlainResource(wxfilename)) => {
            Ok(RunPlan::Single {
                rxfilename,
                wxfilename,
            })
        }
        (ReadAddress::TableSpecifier(read), WriteAddress::TableSpecifier(write)) => {
            Ok(RunPlan::Table { read, write })
        }
        _ => Err(Error::config("Cannot mix table and non-table arguments")),
    }
}

/// Drives one scaling run with fixed options.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    options: ScaleOptions,
}

impl Orchestrator {
    /// Create an orchestrator for the given options.
    pub fn new(options: ScaleOptions) -> Self {
        Orchestrator { options }
    }

    /// The options in force.
    pub fn options(&self) -> &ScaleOptions {
        &self.options
    }

    /// Scale everything at `input` and write it to `output`.
    ///
    /// Errors propagate as they occur, without retry. In table mode entries
    /// written before a failure stay in the output.
    pub fn run(&self, input: &str, output: &str) -> Result<RunReport> {
        let factor = self.options.effective_factor();
        let (mode, processed) = match plan(input, output)? {
            RunPlan::Single {
                rxfilename,
                wxfilename,
            } => {
                self.run_single(&rxfilename, &wxfilename, factor)?;
                (RunMode::Single, 1)
            }
            RunPlan::Table { read, write } => {
                let processed = self.run_table(input, &read, output, &write, factor)?;
                (RunMode::Table, processed)
            }
        };

        match mode {
            RunMode::Single => info!("Scaled vector in {} and wrote to {}", input, output),
            RunMode::Table => info!(
                "Scaled {} vectors in {} and wrote to {}",
                processed, input, output
            ),
        }

        Ok(RunReport {
            mode,
            processed,
            input: input.to_string(),
            output: output.to_string(),
        })
    }

    fn run_single(&self, rxfilename: &str, wxfilename: &str, factor: f32) -> Result<()> {
        let (mut vector, binary_in) = codec::read_resource(rxfilename)?;
        debug!(rxfilename, binary_in, len = vector.len(), factor, "Read single vector");
        vector.scale(factor);
        codec::write_resource(&vector, wxfilename, self.options.binary)
    }

    fn run_table(
        &self,
        rspecifier: &str,
        read: &ReadSpecifier,
        wspecifier: &str,
        write: &WriteSpecifier,
        factor: f32,
    ) -> Result<u64> {
        let mut writer = TableWriter::open_spec(wspecifier, write)?;
        let mut reader = SequentialVectorReader::open_spec(rspecifier, read)?;

        let mut processed = 0u64;
        while !reader.done() {
            let mut vector = reader.value()?;
            vector.scale(factor);
            writer.write(reader.key()?, &vector)?;
            reader.advance()?;
            processed += 1;
        }

        reader.close()?;
        writer.close()?;
        Ok(processed)
    }
}
