//! vecscale - scale dense vectors stored in single files or keyed archives
//!
//! One code path handles both "one vector in one file" and "many vectors
//! keyed by ID, consumed sequentially". Addresses are classified lexically:
//! plain extended filenames name a single resource, `ark:` / `scp:` /
//! `ark,scp:` specifiers name tables.
//!
//! # Quick Start
//!
//! ```ignore
//! use vecscale::{Orchestrator, ScaleOptions};
//!
//! let options = ScaleOptions { scale: 10.0, ..ScaleOptions::default() };
//! let report = Orchestrator::new(options).run("ark:in.ark", "ark,t:out.ark")?;
//! assert!(report.succeeded());
//! ```
//!
//! # Architecture
//!
//! - `vecscale-core`: errors, `Vector`, address classification
//! - `vecscale-storage`: extended filenames, codec, table readers/writers
//! - `vecscale-engine`: options and the orchestrator

pub use vecscale_core::{
    classify, classify_rspecifier, classify_wspecifier, AddressKind, Error, ErrorKind, Result,
    Vector,
};
pub use vecscale_engine::*;

/// Byte-level layer: extended filenames, codec, tables.
pub use vecscale_storage as storage;
