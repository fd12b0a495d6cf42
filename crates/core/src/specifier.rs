//! Address classification
//!
//! Every address argument is either a plain resource (an extended
//! filename naming one vector) or a table specifier (`ark:`, `scp:` or
//! `ark,scp:` plus options) naming a keyed collection. Classification only
//! looks at the string: it never touches the filesystem.
//!
//! # Syntax
//!
//! ```text
//! rspecifier := opts ':' rxfilename          opts ⊇ {ark | scp}
//!               read options: b t o no s ns cs ncs p np bg
//! wspecifier := opts ':' wxfilename          opts ⊇ {ark | scp}
//!             | opts ':' wxfilename ',' wxfilename   opts ⊇ {ark, scp}
//!               write options: b t f nf p
//! ```
//!
//! A string with no `ark`/`scp` token before its first `:` is a plain
//! resource, so Windows-style or `file:offset` paths are never mistaken for
//! tables. A string that does carry one but is otherwise malformed is
//! [`AddressKind::Invalid`].

use std::fmt;

/// Coarse, direction-independent classification of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// A single resource: file, standard stream, pipe, or file at offset.
    PlainResource,
    /// A keyed collection addressed through a table specifier.
    TableSpecifier,
    /// Carries table markers but cannot be parsed.
    Invalid,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressKind::PlainResource => "plain resource",
            AddressKind::TableSpecifier => "table specifier",
            AddressKind::Invalid => "invalid specifier",
        };
        f.write_str(name)
    }
}

/// Classify an address for either direction.
///
/// An address is a table specifier if it parses as a read or a write
/// specifier. It is plain if it carries no table markers at all.
pub fn classify(address: &str) -> AddressKind {
    let read = classify_rspecifier(address).kind();
    let write = classify_wspecifier(address).kind();
    match (read, write) {
        (AddressKind::TableSpecifier, _) | (_, AddressKind::TableSpecifier) => {
            AddressKind::TableSpecifier
        }
        (AddressKind::PlainResource, AddressKind::PlainResource) => AddressKind::PlainResource,
        _ => AddressKind::Invalid,
    }
}

// =========================================================================
// Read specifiers
// =========================================================================

/// Which kind of table a read specifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTableKind {
    /// `ark:` - entries stored inline in one stream.
    Archive,
    /// `scp:` - a script of `key rxfilename` lines.
    Script,
}

/// Options carried by a read specifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// `o`: each key is requested at most once.
    pub once: bool,
    /// `s`: keys are stored in sorted order.
    pub sorted: bool,
    /// `cs`: keys will be requested in sorted order.
    pub called_sorted: bool,
    /// `p`: unreadable entries are skipped instead of failing.
    pub permissive: bool,
    /// `bg`: read ahead in the background. Accepted; reading stays synchronous.
    pub background: bool,
}

/// A parsed read specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSpecifier {
    /// Table kind.
    pub kind: ReadTableKind,
    /// Extended filename of the archive or script.
    pub rxfilename: String,
    /// Parsed options.
    pub options: ReadOptions,
}

/// Classification of an input address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadAddress {
    /// Single resource at the given extended filename.
    PlainResource(String),
    /// Keyed table.
    TableSpecifier(ReadSpecifier),
    /// Malformed specifier; carries the original string.
    Invalid(String),
}

impl ReadAddress {
    /// Coarse classification.
    pub fn kind(&self) -> AddressKind {
        match self {
            ReadAddress::PlainResource(_) => AddressKind::PlainResource,
            ReadAddress::TableSpecifier(_) => AddressKind::TableSpecifier,
            ReadAddress::Invalid(_) => AddressKind::Invalid,
        }
    }
}

/// Classify an input address.
pub fn classify_rspecifier(address: &str) -> ReadAddress {
    let (tokens, rest) = match split_specifier(address) {
        Some(parts) => parts,
        None => return ReadAddress::PlainResource(address.to_string()),
    };
    let invalid = || ReadAddress::Invalid(address.to_string());
    if has_trailing_space(address) || rest.is_empty() {
        return invalid();
    }

    let mut kind = None;
    let mut options = ReadOptions::default();
    for token in tokens {
        match token {
            "b" | "t" => {}
            "o" => options.once = true,
            "no" => options.once = false,
            "s" => options.sorted = true,
            "ns" => options.sorted = false,
            "cs" => options.called_sorted = true,
            "ncs" => options.called_sorted = false,
            "p" => options.permissive = true,
            "np" => options.permissive = false,
            "bg" => options.background = true,
            "ark" | "scp" => {
                if kind.is_some() {
                    return invalid();
                }
                kind = Some(if token == "ark" {
                    ReadTableKind::Archive
                } else {
                    ReadTableKind::Script
                });
            }
            _ => return invalid(),
        }
    }

    match kind {
        Some(kind) => ReadAddress::TableSpecifier(ReadSpecifier {
            kind,
            rxfilename: rest.to_string(),
            options,
        }),
        None => invalid(),
    }
}

// =========================================================================
// Write specifiers
// =========================================================================

/// Which table(s) a write specifier produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    /// `ark:` - a single archive stream.
    Archive(String),
    /// `scp:` - values go to the files a pre-existing script names.
    Script(String),
    /// `ark,scp:` - an archive plus a script indexing it by byte offset.
    Both {
        /// Extended filename of the archive.
        archive: String,
        /// Extended filename of the script to produce.
        script: String,
    },
}

/// Options carried by a write specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// `b` (default) or `t`.
    pub binary: bool,
    /// `f`: flush after every entry. `nf` turns it off.
    pub flush: bool,
    /// `p`: keys missing from an output script are skipped.
    pub permissive: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            binary: true,
            flush: false,
            permissive: false,
        }
    }
}

/// A parsed write specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSpecifier {
    /// Output table(s).
    pub target: WriteTarget,
    /// Parsed options.
    pub options: WriteOptions,
}

/// Classification of an output address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAddress {
    /// Single resource at the given extended filename.
    PlainResource(String),
    /// Keyed table.
    TableSpecifier(WriteSpecifier),
    /// Malformed specifier; carries the original string.
    Invalid(String),
}

impl WriteAddress {
    /// Coarse classification.
    pub fn kind(&self) -> AddressKind {
        match self {
            WriteAddress::PlainResource(_) => AddressKind::PlainResource,
            WriteAddress::TableSpecifier(_) => AddressKind::TableSpecifier,
            WriteAddress::Invalid(_) => AddressKind::Invalid,
        }
    }
}

/// Classify an output address.
pub fn classify_wspecifier(address: &str) -> WriteAddress {
    let (tokens, rest) = match split_specifier(address) {
        Some(parts) => parts,
        None => return WriteAddress::PlainResource(address.to_string()),
    };
    let invalid = || WriteAddress::Invalid(address.to_string());
    if has_trailing_space(address) || rest.is_empty() {
        return invalid();
    }

    let mut ark = false;
    let mut scp = false;
    let mut options = WriteOptions::default();
    for token in tokens {
        match token {
            "b" => options.binary = true,
            "t" => options.binary = false,
            "f" => options.flush = true,
            "nf" => options.flush = false,
            "p" => options.permissive = true,
            "ark" if !ark => ark = true,
            "scp" if !scp => scp = true,
            _ => return invalid(),
        }
    }

    let target = match (ark, scp) {
        (true, true) => {
            let mut parts = rest.split(',');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(archive), Some(script), None) if !archive.is_empty() && !script.is_empty() => {
                    WriteTarget::Both {
                        archive: archive.to_string(),
                        script: script.to_string(),
                    }
                }
                _ => return invalid(),
            }
        }
        (true, false) => WriteTarget::Archive(rest.to_string()),
        (false, true) => WriteTarget::Script(rest.to_string()),
        (false, false) => return invalid(),
    };

    WriteAddress::TableSpecifier(WriteSpecifier { target, options })
}

// =========================================================================
// Helpers
// =========================================================================

/// Split `opts:rest` if the option list names a table kind.
///
/// Returns `None` for strings that should be treated as plain resources.
fn split_specifier(address: &str) -> Option<(Vec<&str>, &str)> {
    let (head, rest) = address.split_once(':')?;
    let tokens: Vec<&str> = head.split(',').map(str::trim).collect();
    if tokens.iter().any(|t| *t == "ark" || *t == "scp") {
        Some((tokens, rest))
    } else {
        None
    }
}

fn has_trailing_space(address: &str) -> bool {
    address.chars().last().is_some_and(char::is_whitespace)
}
