use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rstest::*;

use calrs_core::models::{Event, EventId, Pair, PairSet, Timestamp};
use calrs_overlaprs::partition::Partition;
use calrs_overlaprs::{
    BucketFinder, ExhaustiveFinder, FinderType, OverlapError, OverlapFinder, PartitionFinder,
    SweepFinder,
};

/// Random valid events: start uniform in `[0, max)`, end uniform in `[start, max)`.
fn random_events(count: usize, max: Timestamp, seed: u64) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let start = rng.random_range(0..max);
            let end = rng.random_range(start..max);
            Event::new(i as EventId, start, end)
        })
        .collect()
}

/// Short events scattered over a long timeline, with shuffled ids.
fn sparse_events(count: usize, seed: u64) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids: Vec<EventId> = (0..count as EventId).collect();
    ids.shuffle(&mut rng);

    ids.into_iter()
        .map(|id| {
            let start = rng.random_range(0..100_000);
            let end = start + rng.random_range(0..50);
            Event::new(id, start, end)
        })
        .collect()
}

fn all_finders() -> Vec<Box<dyn OverlapFinder>> {
    FinderType::ALL
        .iter()
        .map(|kind| kind.build(37).unwrap())
        .collect()
}

fn assert_canonical(pairs: &PairSet) {
    for pair in pairs {
        assert!(pair.first_id() < pair.second_id(), "not canonical: {pair:?}");
    }
}

#[fixture]
fn chained() -> Vec<Event> {
    vec![
        Event::new(0, 0, 100),
        Event::new(1, 101, 200),
        Event::new(2, 0, 2000),
        Event::new(3, 101, 200),
    ]
}

#[rstest]
fn test_chained_overlaps_all_finders(chained: Vec<Event>) {
    let expected: PairSet = [(0, 2), (1, 2), (1, 3), (2, 3)]
        .into_iter()
        .map(Pair::from)
        .collect();

    for finder in all_finders() {
        assert_eq!(finder.find_pairs(&chained).unwrap(), expected, "{}", finder.name());
    }
}

#[rstest]
#[case(vec![Event::new(0, 0, 100), Event::new(1, 100, 200)], 1)]
#[case(vec![Event::new(0, 0, 100), Event::new(1, 101, 200)], 0)]
#[case(vec![Event::new(0, 5, 5), Event::new(1, 5, 5)], 1)]
#[case(vec![Event::new(0, 0, 0)], 0)]
#[case(vec![], 0)]
fn test_boundaries_all_finders(#[case] events: Vec<Event>, #[case] expected_len: usize) {
    for finder in all_finders() {
        let pairs = finder.find_pairs(&events).unwrap();
        assert_eq!(pairs.len(), expected_len, "{}", finder.name());
    }
}

#[rstest]
#[case(500, 1000, 111)]
#[case(300, 100, 7)]
#[case(200, 1_000_000, 42)]
#[case(64, 16, 3)]
fn test_random_batches_match_oracle(
    #[case] count: usize,
    #[case] max: Timestamp,
    #[case] seed: u64,
) {
    let events = random_events(count, max, seed);
    let expected = ExhaustiveFinder::new().find_pairs(&events).unwrap();
    assert_canonical(&expected);

    for finder in all_finders() {
        let found = finder.find_pairs(&events).unwrap();
        assert_canonical(&found);
        assert_eq!(found, expected, "{} disagrees with the oracle", finder.name());
    }
}

#[rstest]
fn test_sparse_batches_match_oracle() {
    for seed in 0..10 {
        let events = sparse_events(400, seed);
        let expected = ExhaustiveFinder::new().find_pairs(&events).unwrap();

        assert_eq!(SweepFinder::new().find_pairs(&events).unwrap(), expected);
        assert_eq!(PartitionFinder::new().find_pairs(&events).unwrap(), expected);
        assert_eq!(BucketFinder::new(10).unwrap().find_pairs(&events).unwrap(), expected);
    }
}

#[rstest]
fn test_bucket_size_invariance() {
    let events = random_events(250, 5000, 99);
    let expected = ExhaustiveFinder::new().find_pairs(&events).unwrap();

    for size in [1, 2, 3, 10, 64, 500, 4999, 5000, 1_000_000] {
        let found = BucketFinder::new(size).unwrap().find_pairs(&events).unwrap();
        assert_eq!(found, expected, "bucket size {size}");
    }
}

/// Check that cells are atomic with respect to the inserted events: every
/// event either contains a cell or misses it, and a cell's ids are exactly the
/// events containing it. Gaps between cells must not be covered by any event.
fn assert_cells_match_events(partition: &Partition, inserted: &[Event]) {
    let cells = partition.cells();

    for cell in cells {
        let mut expected = BTreeSet::new();
        for event in inserted {
            let touches = event.start <= cell.end && cell.start <= event.end;
            let contains = event.start <= cell.start && cell.end <= event.end;
            assert!(
                !touches || contains,
                "{event} partially covers {cell}"
            );
            if contains {
                expected.insert(event.id);
            }
        }
        let ids: BTreeSet<EventId> = cell.ids.iter().copied().collect();
        assert_eq!(ids, expected, "wrong ids for {cell}");
    }

    for window in cells.windows(2) {
        let (gap_start, gap_end) = (window[0].end + 1, window[1].start - 1);
        if gap_start > gap_end {
            continue;
        }
        for event in inserted {
            assert!(
                event.end < gap_start || event.start > gap_end,
                "{event} covers the gap {gap_start}..={gap_end}"
            );
        }
    }

    let first = cells.first().map(|c| c.start);
    let last = cells.last().map(|c| c.end);
    assert_eq!(first, inserted.iter().map(|e| e.start).min());
    assert_eq!(last, inserted.iter().map(|e| e.end).max());
}

#[rstest]
#[case(300, 1000, 1)]
#[case(300, 50, 2)]
#[case(150, 100_000, 3)]
fn test_partition_invariants_after_every_insert(
    #[case] count: usize,
    #[case] max: Timestamp,
    #[case] seed: u64,
) {
    let events = random_events(count, max, seed);
    let mut pairs = PairSet::new();
    let mut partition = Partition::new(&events[0]);

    for (i, event) in events.iter().enumerate().skip(1) {
        partition.insert(event, &mut pairs);

        assert_eq!(partition.check_invariants(), Ok(()), "after inserting {event}");
        assert_cells_match_events(&partition, &events[..=i]);
        assert!(partition.len() < 2 * (i + 1), "too many cells after {event}");

        let expected = ExhaustiveFinder::new().find_pairs(&events[..=i]).unwrap();
        assert_eq!(pairs, expected, "pairs after inserting {event}");
    }
}

#[rstest]
fn test_invalid_batches_rejected_by_every_finder() {
    let inverted = vec![Event::new(0, 0, 10), Event::new(1, 30, 20)];
    let negative = vec![Event::new(0, -5, 10), Event::new(1, 0, 20)];
    let duplicate = vec![Event::new(0, 0, 10), Event::new(0, 5, 20)];

    for finder in all_finders() {
        for batch in [&inverted, &negative, &duplicate] {
            let err = finder.find_pairs(batch).unwrap_err();
            assert!(matches!(err, OverlapError::Event(_)), "{}", finder.name());
        }
    }
}
