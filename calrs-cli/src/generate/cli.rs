use clap::{Command, arg, value_parser};

use calrs_core::models::Timestamp;

pub const GENERATE_CMD: &str = "generate";

pub const DEFAULT_COUNT: usize = 500;
pub const DEFAULT_MAX: Timestamp = 1000;

pub fn create_generate_cli() -> Command {
    Command::new(GENERATE_CMD)
        .about("Write a batch of random valid events")
        .arg(
            arg!(-n --count <count> "Number of events")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--max <max> "Exclusive upper bound for timestamps")
                .required(false)
                .value_parser(value_parser!(Timestamp)),
        )
        .arg(
            arg!(--seed <seed> "Seed for reproducible batches")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(arg!(-o --output <output> "Output file (stdout if omitted)").required(false))
}
