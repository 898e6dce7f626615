use clap::{Command, arg, value_parser};

use calrs_core::models::Timestamp;

pub const OVERLAPS_CMD: &str = "overlaps";

pub fn create_overlaps_cli() -> Command {
    Command::new(OVERLAPS_CMD)
        .about("Report every pair of overlapping events, one canonical pair per line")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Events file (`id start end` per line, .json, .gz, or - for stdin)"))
        .arg(
            arg!(-a --algorithm <algorithm> "Which strategy to use (exhaustive, sweep, partition or bucket)")
                .required(false),
        )
        .arg(
            arg!(-b --"bucket-size" <size> "Bucket width for the bucket strategy")
                .required(false)
                .value_parser(value_parser!(Timestamp)),
        )
        .arg(arg!(--format <format> "Output format (tsv or json)").required(false))
        .arg(arg!(--config <config> "TOML file with default settings").required(false))
}
