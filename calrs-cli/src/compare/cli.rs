use clap::{Command, arg, value_parser};

use calrs_core::models::Timestamp;

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .about("Run every strategy on the same events and check them against the exhaustive one")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Events file (`id start end` per line, .json, .gz, or - for stdin)"))
        .arg(
            arg!(-b --"bucket-size" <size> "Bucket width for the bucket strategy")
                .required(false)
                .value_parser(value_parser!(Timestamp)),
        )
        .arg(arg!(--config <config> "TOML file with default settings").required(false))
}
