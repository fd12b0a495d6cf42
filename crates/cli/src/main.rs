//! vector-scale: scale one vector, or every vector in a table.
//!
//! ```text
//! vector-scale --scale=0.5 ark:in.ark ark,t:-
//! vector-scale --inverse-scale=10 --binary=false in.vec out.vec
//! ```
//!
//! Exit status is 0 on success and 1 when the arguments are wrong, when any
//! error occurs, or when a table run processes no vectors.

mod commands;
mod parse;

use std::process;

use tracing::{debug, error, warn};
use tracing_subscriber::{fmt, EnvFilter};
use vecscale_engine::Orchestrator;

use commands::build_cli;
use parse::matches_to_invocation;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Standard output may carry data ("-"), so logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));
    process::exit(run(&matches));
}

fn run(matches: &clap::ArgMatches) -> i32 {
    let invocation = match matches_to_invocation(matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let [input, output] = invocation.addresses.as_slice() else {
        eprintln!("{}", build_cli().render_help());
        return 1;
    };

    let orchestrator = Orchestrator::new(invocation.options);
    debug!(options = ?orchestrator.options(), "Resolved options");
    match orchestrator.run(input, output) {
        Ok(report) if report.succeeded() => 0,
        Ok(report) => {
            warn!(input = %report.input, "No vectors were processed");
            1
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
