//! Storage layer for vecscale
//!
//! This crate implements everything that touches bytes:
//! - xfilename: extended filenames (files, offsets, standard streams, pipes)
//! - codec: self-describing binary/text encoding of a single vector
//! - table: sequential archive/script readers and keyed table writers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod table;
pub mod xfilename;

mod scan;

pub use codec::{read_object, read_resource, write_object, write_resource, BINARY_MARKER};
pub use table::{SequentialVectorReader, TableSink, TableSource, TableWriter};
pub use xfilename::{Input, Output};
