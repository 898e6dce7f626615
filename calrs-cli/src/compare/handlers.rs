use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Result, anyhow};
use clap::ArgMatches;

use calrs_core::models::{Event, Pair, PairSet, Timestamp};
use calrs_core::utils::read_events_from_path;
use calrs_overlaprs::FinderType;

use crate::config::Settings;

/// Outcome of one strategy measured against the exhaustive reference.
#[derive(Debug)]
pub struct Comparison {
    pub finder: FinderType,
    pub pairs: usize,
    pub elapsed_ms: f64,
    /// Pairs the reference found but this strategy did not.
    pub missing: Vec<Pair>,
    /// Pairs this strategy found but the reference did not.
    pub extra: Vec<Pair>,
}

impl Comparison {
    pub fn agrees(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

pub fn compare_finders(events: &[Event], bucket_size: Timestamp) -> Result<Vec<Comparison>> {
    let mut results = Vec::with_capacity(FinderType::ALL.len());
    let mut reference: Option<PairSet> = None;

    for kind in FinderType::ALL {
        let finder = kind.build(bucket_size)?;

        let timer = Instant::now();
        let found = finder.find_pairs(events)?;
        let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;

        let expected = reference.get_or_insert_with(|| found.clone());
        let missing: Vec<Pair> = expected.difference(&found).copied().collect();
        let extra: Vec<Pair> = found.difference(expected).copied().collect();

        results.push(Comparison {
            finder: kind,
            pairs: found.len(),
            elapsed_ms,
            missing,
            extra,
        });
    }

    Ok(results)
}

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to an events file is required.");

    let settings = Settings::from_matches(matches)?;
    let events = read_events_from_path(input)?;
    log::info!("Read {} events from {}", events.len(), input);

    let results = compare_finders(&events, settings.bucket_size)?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    writeln!(writer, "finder\tpairs\tms\tstatus")?;

    let mut disagreeing = Vec::new();
    for result in &results {
        let status = if result.agrees() { "ok" } else { "MISMATCH" };
        writeln!(
            writer,
            "{}\t{}\t{:.3}\t{}",
            result.finder, result.pairs, result.elapsed_ms, status
        )?;
        for pair in &result.missing {
            writeln!(writer, "  missing\t{pair}")?;
        }
        for pair in &result.extra {
            writeln!(writer, "  extra\t{pair}")?;
        }
        if !result.agrees() {
            disagreeing.push(result.finder.as_str());
        }
    }
    writer.flush()?;

    if !disagreeing.is_empty() {
        return Err(anyhow!(
            "Strategies disagree with the exhaustive reference: {}",
            disagreeing.join(", ")
        ));
    }

    Ok(())
}
