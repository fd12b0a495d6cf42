//! Keyed vector tables.
//!
//! - `reader`: sequential cursors over `ark:` archives and `scp:` scripts
//! - `writer`: `ark:`, `scp:` and `ark,scp:` writers

pub mod reader;
pub mod writer;

pub use reader::{ArchiveSource, Entry, ScriptSource, SequentialVectorReader, TableSource};
pub use writer::{ArchiveSink, IndexedArchiveSink, ScriptSink, TableSink, TableWriter};
