//! Error types for vecscale
//!
//! Every failure in the pipeline falls into one of three fatal classes
//! (configuration, format, archive) plus raw I/O. None of them is retried.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for vecscale operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the vecscale pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Bad invocation: mixed table/non-table arguments, malformed
    /// specifiers, wrong argument count, unreadable config file.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unrecognized or inconsistent serialized vector.
    #[error("Format error: {0}")]
    Format(String),

    /// A table could not be opened, read, or written.
    #[error("Archive error: {0}")]
    Archive(String),

    /// I/O error (file operations, pipes, standard streams)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Discriminant of [`Error`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::Configuration`]
    Configuration,
    /// See [`Error::Format`]
    Format,
    /// See [`Error::Archive`]
    Archive,
    /// See [`Error::Io`]
    Io,
}

impl Error {
    /// Build a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Build a format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Build an archive error.
    pub fn archive(msg: impl Into<String>) -> Self {
        Error::Archive(msg.into())
    }

    /// The class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Format(_) => ErrorKind::Format,
            Error::Archive(_) => ErrorKind::Archive,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Re-label an error that surfaced while reading a table entry.
    ///
    /// Format errors keep their class; plain I/O failures become archive
    /// errors carrying `context`.
    pub fn in_archive(self, context: &str) -> Self {
        match self {
            Error::Io(e) => Error::Archive(format!("{}: {}", context, e)),
            other => other,
        }
    }
}
