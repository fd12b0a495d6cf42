//! Scaling engine for vecscale
//!
//! This crate ties the lower layers together:
//! - ScaleOptions: immutable run configuration, optionally loaded from TOML
//! - plan: classification of the two addresses into a single or table run
//! - Orchestrator: drives the read → scale → write pipeline and reports
//!   how many vectors it processed
//!
//! The engine is the only component that knows about both the codec and the
//! table readers/writers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod options;
pub mod orchestrator;

pub use options::ScaleOptions;
pub use orchestrator::{plan, Orchestrator, RunMode, RunPlan, RunReport};
