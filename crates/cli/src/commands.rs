//! Clap command definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Usage line printed when the positional arguments are wrong.
pub const USAGE: &str =
    "vector-scale [options] <in-rspecifier|in-rxfilename> <out-wspecifier|out-wxfilename>";

/// Build the `vector-scale` command.
///
/// Positional addresses are collected without an arity check so that a
/// wrong count can be reported with exit status 1 rather than clap's own.
pub fn build_cli() -> Command {
    Command::new("vector-scale")
        .about(
            "Scale a set of vectors in a table (useful for speaker vectors and \
             per-frame weights), or a single vector in a file",
        )
        .override_usage(USAGE)
        .arg(
            Arg::new("binary")
                .long("binary")
                .help("If true, write output as binary (only relevant for non-table input-output) [default: true]")
                .value_name("BOOL")
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .help("Scaling factor for vectors [default: 1.0]")
                .value_name("FLOAT")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("inverse-scale")
                .long("inverse-scale")
                .help("Inverse scaling factor for vectors; --scale is ignored if this is given and is non-zero [default: 0.0]")
                .value_name("FLOAT")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with defaults for binary, scale and inverse_scale")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level (RUST_LOG overrides)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("addresses")
                .help("Input and output: table specifiers (ark:, scp:, ark,scp:) or filenames")
                .value_name("ADDRESS")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_binary_flag_forms() {
        let m = build_cli().try_get_matches_from(["vector-scale", "--binary", "a", "b"]).unwrap();
        assert_eq!(m.get_one::<bool>("binary"), Some(&true));

        let m = build_cli().try_get_matches_from(["vector-scale", "--binary=false", "a", "b"]).unwrap();
        assert_eq!(m.get_one::<bool>("binary"), Some(&false));

        let m = build_cli().try_get_matches_from(["vector-scale", "a", "b"]).unwrap();
        assert_eq!(m.get_one::<bool>("binary"), None);
    }

    #[test]
    fn test_negative_scale_and_stdin_address() {
        let m = build_cli()
            .try_get_matches_from(["vector-scale", "--scale", "-2.5", "-", "ark:-"])
            .unwrap();
        assert_eq!(m.get_one::<f32>("scale"), Some(&-2.5));
        let addresses: Vec<&String> = m.get_many::<String>("addresses").unwrap().collect();
        assert_eq!(addresses, vec!["-", "ark:-"]);
    }
}
