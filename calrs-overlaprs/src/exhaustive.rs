use calrs_core::models::{Event, Pair, PairSet, validate_events};

use crate::errors::Result;
use crate::traits::OverlapFinder;

/// Compares every unordered pair of events once.
///
/// O(n²) time and no working memory beyond the output. This is the reference
/// every other finder is tested against.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveFinder;

impl ExhaustiveFinder {
    pub fn new() -> Self {
        ExhaustiveFinder
    }
}

impl OverlapFinder for ExhaustiveFinder {
    fn find_pairs(&self, events: &[Event]) -> Result<PairSet> {
        validate_events(events)?;

        let mut pairs = PairSet::new();
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                if a.overlaps(b) {
                    pairs.insert(Pair::new(a.id, b.id));
                }
            }
        }

        log::debug!(
            "exhaustive: {} events, {} overlapping pairs",
            events.len(),
            pairs.len()
        );
        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pairs(raw: &[(u64, u64)]) -> PairSet {
        raw.iter().map(|&p| Pair::from(p)).collect()
    }

    #[rstest]
    #[case(vec![Event::new(0, 0, 100), Event::new(1, 0, 100)], pairs(&[(0, 1)]))]
    #[case(vec![Event::new(0, 0, 100), Event::new(1, 99, 100)], pairs(&[(0, 1)]))]
    #[case(vec![Event::new(0, 0, 100), Event::new(1, 101, 200)], pairs(&[]))]
    #[case(
        vec![Event::new(0, 0, 100), Event::new(1, 101, 200), Event::new(2, 0, 2000)],
        pairs(&[(0, 2), (1, 2)])
    )]
    #[case(
        vec![
            Event::new(0, 0, 100),
            Event::new(1, 101, 200),
            Event::new(2, 0, 2000),
            Event::new(3, 101, 200),
        ],
        pairs(&[(0, 2), (1, 2), (1, 3), (2, 3)])
    )]
    fn test_exhaustive_cases(#[case] events: Vec<Event>, #[case] expected: PairSet) {
        let found = ExhaustiveFinder::new().find_pairs(&events).unwrap();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn test_exhaustive_reports_canonical_order_for_descending_ids() {
        let events = vec![Event::new(9, 0, 10), Event::new(2, 5, 15)];
        let found = ExhaustiveFinder::new().find_pairs(&events).unwrap();
        let first = found.iter().next().unwrap();

        assert_eq!((first.first_id(), first.second_id()), (2, 9));
    }

    #[rstest]
    fn test_exhaustive_rejects_invalid_batch() {
        let events = vec![Event::new(0, 0, 10), Event::new(1, 20, 10)];
        assert!(ExhaustiveFinder::new().find_pairs(&events).is_err());
    }
}
