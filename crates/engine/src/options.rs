//! Run options
//!
//! Resolved once at startup and immutable for the rest of the run. Options
//! can come from a TOML file; command-line flags override whatever the file
//! sets.
//!
//! # Example
//!
//! ```toml
//! # Encoding for single-resource output (tables use their own b/t option)
//! binary = true
//! # Scaling factor applied to every vector
//! scale = 1.0
//! # If non-zero, the factor becomes 1 / inverse_scale and `scale` is ignored
//! inverse_scale = 0.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use vecscale_core::{Error, Result};

/// Options controlling one scaling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleOptions {
    /// Write single-resource output in binary (only relevant for
    /// non-table input and output).
    pub binary: bool,
    /// Scaling factor for vectors.
    pub scale: f32,
    /// Inverse scaling factor; overrides `scale` when non-zero.
    pub inverse_scale: f32,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        ScaleOptions {
            binary: true,
            scale: 1.0,
            inverse_scale: 0.0,
        }
    }
}

impl ScaleOptions {
    /// The single factor in force for this run.
    ///
    /// A non-zero inverse scale wins; otherwise the direct scale applies.
    pub fn effective_factor(&self) -> f32 {
        if self.inverse_scale != 0.0 {
            1.0 / self.inverse_scale
        } else {
            self.scale
        }
    }

    /// Read and parse options from a TOML file.
    ///
    /// Keys the file leaves out take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
