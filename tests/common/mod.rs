//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use tempfile::TempDir;
use vecscale::storage::{SequentialVectorReader, TableWriter};
use vecscale::Vector;

/// Scratch directory that hands out string paths.
pub struct Scratch {
    pub dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Scratch {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Absolute path of `name` inside the scratch directory.
    pub fn path(&self, name: &str) -> String {
        self.dir
            .path()
            .join(name)
            .to_str()
            .expect("utf-8 temp path")
            .to_string()
    }
}

/// Write `entries` to the table named by `wspecifier`.
pub fn write_table(wspecifier: &str, entries: &[(&str, &[f32])]) {
    let mut writer = TableWriter::open(wspecifier).expect("open writer");
    for (key, values) in entries {
        writer.write(key, &Vector::from(*values)).expect("write entry");
    }
    writer.close().expect("close writer");
}

/// Read every entry of the table named by `rspecifier`.
pub fn read_table(rspecifier: &str) -> Vec<(String, Vec<f32>)> {
    let mut reader = SequentialVectorReader::open(rspecifier).expect("open reader");
    let mut entries = Vec::new();
    while !reader.done() {
        entries.push((
            reader.key().expect("key").to_string(),
            reader.value().expect("value").into_inner(),
        ));
        reader.advance().expect("advance");
    }
    reader.close().expect("close reader");
    entries
}

/// Owned form of `entries` for comparisons against `read_table`.
pub fn owned(entries: &[(&str, &[f32])]) -> Vec<(String, Vec<f32>)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_vec()))
        .collect()
}
