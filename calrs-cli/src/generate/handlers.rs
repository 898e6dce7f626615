use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use calrs_core::models::{Event, EventId, Timestamp};

use super::cli::{DEFAULT_COUNT, DEFAULT_MAX};

///
/// Generate `count` valid events with ids `0..count`: start is uniform in
/// `[0, max)` and end is uniform in `[start, max)`.
///
pub fn random_events<R: Rng>(rng: &mut R, count: usize, max: Timestamp) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let start = rng.random_range(0..max);
            let end = rng.random_range(start..max);
            Event::new(i as EventId, start, end)
        })
        .collect()
}

pub fn run_generate(matches: &ArgMatches) -> Result<()> {
    let count = matches
        .get_one::<usize>("count")
        .copied()
        .unwrap_or(DEFAULT_COUNT);
    let max = matches
        .get_one::<Timestamp>("max")
        .copied()
        .unwrap_or(DEFAULT_MAX);

    if max <= 0 {
        return Err(anyhow!("--max must be positive, got {max}"));
    }

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let events = random_events(&mut rng, count, max);
    log::info!("Generated {} events in [0, {})", events.len(), max);

    let writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create file: {path}"))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    for event in &events {
        writeln!(writer, "{}", event.as_string())?;
    }
    writer.flush()?;

    Ok(())
}
