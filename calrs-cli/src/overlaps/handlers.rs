use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use calrs_core::models::PairSet;
use calrs_core::utils::read_events_from_path;

use crate::config::{OutputFormat, Settings};

pub fn run_overlaps(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to an events file is required.");

    let settings = Settings::from_matches(matches)?;
    log::info!(
        "Using {} strategy (bucket size {})",
        settings.algorithm,
        settings.bucket_size
    );

    let events = read_events_from_path(input)?;
    log::info!("Read {} events from {}", events.len(), input);

    let finder = settings.algorithm.build(settings.bucket_size)?;
    let pairs = finder
        .find_pairs(&events)
        .with_context(|| format!("Failed to find overlaps in {input}"))?;
    log::info!("Found {} overlapping pairs", pairs.len());

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_pairs(&mut writer, &pairs, settings.format)?;
    writer.flush()?;

    Ok(())
}

pub fn write_pairs<W: Write>(writer: &mut W, pairs: &PairSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            for pair in pairs {
                writeln!(writer, "{pair}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, pairs)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
