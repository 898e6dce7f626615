//! Overlap detection over an incrementally refined partition of the timeline.
//!
//! The [`Partition`] keeps an ordered list of disjoint [`Cell`]s. Every cell
//! records the ids of all events covering it, and no inserted event starts or
//! ends strictly inside a cell. Inserting an event splits the cells it
//! touches, fills any uncovered stretch with new cells, and reports one pair
//! per id already present in a touched cell.
//!
//! The number of cells is bounded by the number of distinct event boundaries
//! (at most `2n - 1`), not by the number of overlapping pairs.
//!
//! ```
//! use calrs_core::models::{Event, PairSet};
//! use calrs_overlaprs::partition::Partition;
//!
//! let mut pairs = PairSet::new();
//! let mut partition = Partition::new(&Event::new(0, 0, 100));
//! partition.insert(&Event::new(1, 50, 150), &mut pairs);
//!
//! // [0, 49] {0}, [50, 100] {0, 1}, [101, 150] {1}
//! assert_eq!(partition.len(), 3);
//! assert_eq!(pairs.len(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};

use fxhash::FxHashSet;
use thiserror::Error;

use calrs_core::models::{Event, EventId, Pair, PairSet, Timestamp, validate_events};

use crate::errors::Result;
use crate::traits::OverlapFinder;

/// A disjoint stretch `[start, end]` of the timeline and the events covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub start: Timestamp,
    pub end: Timestamp,
    pub ids: Vec<EventId>,
}

/// Where a timestamp falls relative to the cells of a [`Partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Inside the cell at this index.
    Found(usize),
    /// Before the first cell.
    BeforeFirst,
    /// After the last cell.
    AfterLast,
    /// In the uncovered gap right before the cell at this index.
    Between(usize),
}

/// How a sub-range `[start, end]` sits inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitShape {
    /// Same bounds as the cell; the cell is kept whole.
    Exact,
    /// Shares the cell's start; splits into covered + tail.
    AlignedStart,
    /// Shares the cell's end; splits into head + covered.
    AlignedEnd,
    /// Strictly inside; splits into head + covered + tail.
    Interior,
}

/// A structural defect found by [`Partition::check_invariants`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("partition has no cells")]
    Empty,

    #[error("cell {index} is inverted: start={start}, end={end}")]
    InvertedCell {
        index: usize,
        start: Timestamp,
        end: Timestamp,
    },

    #[error("cell {index} has no event ids")]
    EmptyIds { index: usize },

    #[error("cell {index} lists event {id} more than once")]
    DuplicateId { index: usize, id: EventId },

    #[error("cell {index} overlaps or precedes the cell before it")]
    Unordered { index: usize },
}

impl Cell {
    pub fn new(start: Timestamp, end: Timestamp, ids: Vec<EventId>) -> Self {
        Cell { start, end, ids }
    }

    fn single(start: Timestamp, end: Timestamp, id: EventId) -> Self {
        Cell::new(start, end, vec![id])
    }

    /// Compare a timestamp with this cell: `Less` before it, `Greater` after it,
    /// `Equal` inside it.
    #[inline]
    pub fn position(&self, value: Timestamp) -> Ordering {
        if value < self.start {
            Ordering::Less
        } else if value > self.end {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Classify the sub-range `[start, end]`, which must lie within the cell.
    pub fn split_shape(&self, start: Timestamp, end: Timestamp) -> SplitShape {
        match (start == self.start, end == self.end) {
            (true, true) => SplitShape::Exact,
            (true, false) => SplitShape::AlignedStart,
            (false, true) => SplitShape::AlignedEnd,
            (false, false) => SplitShape::Interior,
        }
    }

    /// Split the cell around `[start, end]`, adding `id` to the covered part.
    ///
    /// Returns one to three cells in timeline order. Every returned cell owns
    /// its own copy of the id list.
    pub fn split(&self, start: Timestamp, end: Timestamp, id: EventId) -> Vec<Cell> {
        debug_assert!(self.start <= start && start <= end && end <= self.end);

        let mut covered_ids = self.ids.clone();
        covered_ids.push(id);
        let covered = Cell::new(start, end, covered_ids);

        match self.split_shape(start, end) {
            SplitShape::Exact => vec![covered],
            SplitShape::AlignedStart => vec![
                covered,
                Cell::new(end + 1, self.end, self.ids.clone()),
            ],
            SplitShape::AlignedEnd => vec![
                Cell::new(self.start, start - 1, self.ids.clone()),
                covered,
            ],
            SplitShape::Interior => vec![
                Cell::new(self.start, start - 1, self.ids.clone()),
                covered,
                Cell::new(end + 1, self.end, self.ids.clone()),
            ],
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} -> {} with ids: {:?}", self.start, self.end, self.ids)
    }
}

/// Ordered, disjoint cells covering every timestamp of the inserted events.
#[derive(Debug, Clone)]
pub struct Partition {
    cells: Vec<Cell>,
}

impl Partition {
    /// Start a partition with a single cell spanning `first`.
    pub fn new(first: &Event) -> Self {
        Partition {
            cells: vec![Cell::single(first.start, first.end, first.id)],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Binary search for the cell containing `value`.
    pub fn locate(&self, value: Timestamp) -> Location {
        // first cell that does not end before `value`
        let idx = self.cells.partition_point(|c| c.end < value);

        match self.cells.get(idx) {
            None => Location::AfterLast,
            Some(cell) if cell.position(value) == Ordering::Equal => Location::Found(idx),
            Some(_) if idx == 0 => Location::BeforeFirst,
            Some(_) => Location::Between(idx),
        }
    }

    /// Insert `event`, recording a pair for every id it meets along the way.
    pub fn insert(&mut self, event: &Event, pairs: &mut PairSet) {
        let location = self.locate(event.start);
        log::trace!("partition: inserting {event} at {location:?}");

        match location {
            Location::AfterLast => {
                self.cells
                    .push(Cell::single(event.start, event.end, event.id));
            }
            Location::BeforeFirst => self.absorb(0, event, pairs),
            Location::Found(idx) | Location::Between(idx) => self.absorb(idx, event, pairs),
        }

        debug_assert!(
            self.check_invariants().is_ok(),
            "partition invariant broken after inserting {event}: {:?}",
            self.check_invariants()
        );
    }

    /// Walk forward from cell `idx`, splitting every cell `event` touches and
    /// filling uncovered stretches with new single-id cells.
    fn absorb(&mut self, idx: usize, event: &Event, pairs: &mut PairSet) {
        let end = event.end;
        let mut start = event.start;
        let mut next = idx;
        let mut replacement = Vec::new();
        let mut remainder = true;

        while let Some(cell) = self.cells.get(next) {
            if end < cell.start {
                break;
            }

            if start < cell.start {
                replacement.push(Cell::single(start, cell.start - 1, event.id));
                start = cell.start;
            }

            for &id in &cell.ids {
                pairs.insert(Pair::new(id, event.id));
            }

            let clipped_end = end.min(cell.end);
            log::trace!(
                "partition: {:?} split of {cell} by event {}",
                cell.split_shape(start, clipped_end),
                event.id
            );
            replacement.extend(cell.split(start, clipped_end, event.id));
            next += 1;

            if end <= cell.end {
                remainder = false;
                break;
            }
            start = cell.end + 1;
        }

        if remainder {
            replacement.push(Cell::single(start, end, event.id));
        }

        self.cells.splice(idx..next, replacement);
    }

    /// Verify the structural invariants: every cell is well formed and carries
    /// a non-empty, duplicate-free id list, and cells are strictly increasing
    /// and disjoint.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        if self.cells.is_empty() {
            return Err(InvariantViolation::Empty);
        }

        for (index, cell) in self.cells.iter().enumerate() {
            if cell.start > cell.end {
                return Err(InvariantViolation::InvertedCell {
                    index,
                    start: cell.start,
                    end: cell.end,
                });
            }
            if cell.ids.is_empty() {
                return Err(InvariantViolation::EmptyIds { index });
            }

            let mut seen = FxHashSet::default();
            for &id in &cell.ids {
                if !seen.insert(id) {
                    return Err(InvariantViolation::DuplicateId { index, id });
                }
            }

            if index > 0 && self.cells[index - 1].end >= cell.start {
                return Err(InvariantViolation::Unordered { index });
            }
        }

        Ok(())
    }
}

/// Finds overlaps by inserting events, in input order, into a [`Partition`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PartitionFinder;

impl PartitionFinder {
    pub fn new() -> Self {
        PartitionFinder
    }
}

impl OverlapFinder for PartitionFinder {
    fn find_pairs(&self, events: &[Event]) -> Result<PairSet> {
        validate_events(events)?;

        let mut pairs = PairSet::new();
        let Some((first, rest)) = events.split_first() else {
            return Ok(pairs);
        };

        let mut partition = Partition::new(first);
        for event in rest {
            partition.insert(event, &mut pairs);
        }

        log::debug!(
            "partition: {} events, {} cells, {} overlapping pairs",
            events.len(),
            partition.len(),
            pairs.len()
        );
        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "partition"
    }
}
