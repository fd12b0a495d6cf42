//! Extended filenames
//!
//! Plain resources and the filenames inside table specifiers can name more
//! than regular files:
//!
//! ```text
//! input (rxfilename)            output (wxfilename)
//!   "" | "-"     stdin            "" | "-"     stdout
//!   "cmd |"      pipe from cmd    "| cmd"      pipe into cmd
//!   "path:1234"  file at offset   "path"       file (created/truncated)
//!   "path"       file
//! ```
//!
//! Pipes run through `sh -c`. An [`Output`] is finalized exactly once, either
//! by [`Output::close`] or, best-effort, when it is dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, warn};
use vecscale_core::{Error, Result};

/// Lexical classification of an input filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Standard input.
    Stdin,
    /// Regular file read from the start.
    File(PathBuf),
    /// Regular file read from a byte offset.
    Offset(PathBuf, u64),
    /// Standard output of a shell command.
    Pipe(String),
}

/// Lexical classification of an output filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// Standard output.
    Stdout,
    /// Regular file, created or truncated.
    File(PathBuf),
    /// Standard input of a shell command.
    Pipe(String),
    /// Not usable as an output (e.g. an input pipe).
    Invalid,
}

/// Classify an input filename.
pub fn classify_rxfilename(name: &str) -> InputKind {
    if name.is_empty() || name == "-" {
        return InputKind::Stdin;
    }
    if let Some(command) = name.strip_suffix('|') {
        return InputKind::Pipe(command.trim().to_string());
    }
    if let Some((path, offset)) = name.rsplit_once(':') {
        if !path.is_empty() && !offset.is_empty() && offset.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(offset) = offset.parse::<u64>() {
                return InputKind::Offset(PathBuf::from(path), offset);
            }
        }
    }
    InputKind::File(PathBuf::from(name))
}

/// Classify an output filename.
pub fn classify_wxfilename(name: &str) -> OutputKind {
    if name.is_empty() || name == "-" {
        return OutputKind::Stdout;
    }
    if let Some(command) = name.strip_prefix('|') {
        return OutputKind::Pipe(command.trim().to_string());
    }
    if name.ends_with('|') {
        return OutputKind::Invalid;
    }
    OutputKind::File(PathBuf::from(name))
}

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

// =========================================================================
// Input
// =========================================================================

/// An open input stream.
pub struct Input {
    name: String,
    reader: Option<Box<dyn BufRead>>,
    child: Option<Child>,
}

impl Input {
    /// Open an extended input filename.
    pub fn open(rxfilename: &str) -> Result<Self> {
        let mut child = None;
        let reader: Box<dyn BufRead> = match classify_rxfilename(rxfilename) {
            InputKind::Stdin => Box::new(io::stdin().lock()),
            InputKind::File(path) => {
                let file = File::open(&path).map_err(|e| open_error(rxfilename, e))?;
                Box::new(BufReader::new(file))
            }
            InputKind::Offset(path, offset) => {
                let mut file = File::open(&path).map_err(|e| open_error(rxfilename, e))?;
                file.seek(SeekFrom::Start(offset))?;
                Box::new(BufReader::new(file))
            }
            InputKind::Pipe(command) => {
                let mut spawned = shell(&command)
                    .stdout(Stdio::piped())
                    .spawn()
                    .map_err(|e| open_error(rxfilename, e))?;
                let stdout: ChildStdout = spawned.stdout.take().ok_or_else(|| {
                    Error::Io(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        format!("no stdout for command '{}'", command),
                    ))
                })?;
                child = Some(spawned);
                Box::new(BufReader::new(stdout))
            }
        };
        debug!(rxfilename, "Opened input");
        Ok(Input {
            name: rxfilename.to_string(),
            reader: Some(reader),
            child,
        })
    }

    /// The filename this input was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the stream and reap any pipe command.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        // Dropping the read end first lets a still-writing command exit.
        self.reader.take();
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            if !status.success() {
                warn!(rxfilename = %self.name, %status, "Input pipe command exited with failure");
            }
        }
        Ok(())
    }

    fn reader(&mut self) -> io::Result<&mut Box<dyn BufRead>> {
        self.reader
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "input already closed"))
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader()?.read(buf)
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader()?.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if let Some(reader) = self.reader.as_mut() {
            reader.consume(amt);
        }
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

// =========================================================================
// Output
// =========================================================================

/// An open output stream that counts the bytes written through it.
pub struct Output {
    name: String,
    writer: Option<BufWriter<Box<dyn Write>>>,
    child: Option<Child>,
    position: u64,
}

impl Output {
    /// Create an extended output filename.
    pub fn create(wxfilename: &str) -> Result<Self> {
        let mut child = None;
        let writer: Box<dyn Write> = match classify_wxfilename(wxfilename) {
            OutputKind::Stdout => Box::new(io::stdout()),
            OutputKind::File(path) => {
                Box::new(File::create(path).map_err(|e| open_error(wxfilename, e))?)
            }
            OutputKind::Pipe(command) => {
                let mut spawned = shell(&command)
                    .stdin(Stdio::piped())
                    .spawn()
                    .map_err(|e| open_error(wxfilename, e))?;
                let stdin: ChildStdin = spawned.stdin.take().ok_or_else(|| {
                    Error::Io(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        format!("no stdin for command '{}'", command),
                    ))
                })?;
                child = Some(spawned);
                Box::new(stdin)
            }
            OutputKind::Invalid => {
                return Err(Error::config(format!(
                    "'{}' is not a valid output filename",
                    wxfilename
                )))
            }
        };
        debug!(wxfilename, "Opened output");
        Ok(Output {
            name: wxfilename.to_string(),
            writer: Some(BufWriter::new(writer)),
            child,
            position: 0,
        })
    }

    /// The filename this output was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush, release the stream, and wait for any pipe command.
    ///
    /// Fails if the flush fails or the pipe command exits unsuccessfully.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            if !status.success() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::Other,
                    format!("output command '{}' exited with {}", self.name, status),
                )));
            }
        }
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "output already closed"))?;
        let written = writer.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            warn!(wxfilename = %self.name, error = %e, "Failed to finalize output");
        }
    }
}

fn open_error(name: &str, e: io::Error) -> Error {
    Error::Io(io::Error::new(e.kind(), format!("cannot open '{}': {}", name, e)))
}
