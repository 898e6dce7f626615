use calrs_core::models::{Event, Pair, PairSet, validate_events};

use crate::errors::Result;
use crate::traits::OverlapFinder;

/// Sorts events by start and scans forward from each one until the next start
/// lies past its end.
///
/// Near-linear on sparse batches, O(n²) when everything overlaps. The caller's
/// slice is left untouched; sorting happens on an owned copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepFinder;

impl SweepFinder {
    pub fn new() -> Self {
        SweepFinder
    }
}

impl OverlapFinder for SweepFinder {
    fn find_pairs(&self, events: &[Event]) -> Result<PairSet> {
        validate_events(events)?;

        let mut pairs = PairSet::new();
        if events.len() < 2 {
            return Ok(pairs);
        }

        let mut sorted = events.to_vec();
        sorted.sort_unstable_by_key(|e| (e.start, e.id));

        for (i, current) in sorted.iter().enumerate() {
            for next in &sorted[i + 1..] {
                // starts are sorted, nothing further can reach back to `current`
                if current.end < next.start {
                    break;
                }
                debug_assert!(current.overlaps(next));
                pairs.insert(Pair::new(current.id, next.id));
            }
        }

        log::debug!(
            "sweep: {} events, {} overlapping pairs",
            events.len(),
            pairs.len()
        );
        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "sweep"
    }
}
