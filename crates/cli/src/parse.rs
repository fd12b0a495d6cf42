//! ArgMatches → run invocation.
//!
//! Option precedence: built-in defaults, then `--config`, then explicit
//! flags.

use std::path::Path;

use clap::ArgMatches;
use vecscale_core::Result;
use vecscale_engine::ScaleOptions;

/// Everything `main` needs to start a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Resolved options.
    pub options: ScaleOptions,
    /// Positional addresses, in order. Not yet checked for count.
    pub addresses: Vec<String>,
}

/// Resolve options and collect addresses from parsed arguments.
pub fn matches_to_invocation(matches: &ArgMatches) -> Result<Invocation> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ScaleOptions::from_file(Path::new(path))?,
        None => ScaleOptions::default(),
    };
    if let Some(binary) = matches.get_one::<bool>("binary") {
        options.binary = *binary;
    }
    if let Some(scale) = matches.get_one::<f32>("scale") {
        options.scale = *scale;
    }
    if let Some(inverse_scale) = matches.get_one::<f32>("inverse-scale") {
        options.inverse_scale = *inverse_scale;
    }

    let addresses = matches
        .get_many::<String>("addresses")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(Invocation { options, addresses })
}
