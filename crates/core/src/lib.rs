//! Core types for vecscale
//!
//! This crate defines the foundational pieces shared by every layer:
//! - Error: the configuration / format / archive / I/O taxonomy
//! - Vector: owned `f32` vector with the elementwise scale transform
//! - Specifier: lexical classification of plain resources vs. table specifiers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod specifier;
pub mod vector;

pub use error::{Error, ErrorKind, Result};
pub use specifier::{
    classify, classify_rspecifier, classify_wspecifier, AddressKind, ReadAddress, ReadOptions,
    ReadSpecifier, ReadTableKind, WriteAddress, WriteOptions, WriteSpecifier, WriteTarget,
};
pub use vector::Vector;
