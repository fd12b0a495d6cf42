//! End-to-end tests of the scaling pipeline.
//!
//! - single: one vector, plain resource to plain resource
//! - table: archives, scripts and indexed archives
//! - failures: configuration, format and archive errors

#[path = "../common/mod.rs"]
mod common;

mod failures;
mod single;
mod table;
