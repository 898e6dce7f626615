use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::EventError;

/// Identifier of an event, unique within one batch.
pub type EventId = u64;

/// A point on the timeline. Signed so that negative starts can be rejected.
pub type Timestamp = i64;

///
/// A calendar event: the closed interval `[start, end]` tagged with an id.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub id: EventId,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Event {
    pub fn new(id: EventId, start: Timestamp, end: Timestamp) -> Self {
        Event { id, start, end }
    }

    ///
    /// An event is valid when `0 <= start <= end`.
    ///
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start >= 0 && self.start <= self.end
    }

    ///
    /// Check if two events overlap. Intervals are closed, so a shared endpoint
    /// counts as an overlap.
    ///
    #[inline]
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    ///
    /// Number of timestamps covered by the event (`end - start + 1`).
    ///
    pub fn width(&self) -> u64 {
        self.end.abs_diff(self.start) + 1
    }

    ///
    /// Get the file string of the event, tab separated `id start end`.
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}", self.id, self.start, self.end)
    }
}

impl Ord for Event {
    #[inline]
    fn cmp(&self, other: &Event) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => match self.end.cmp(&other.end) {
                Ordering::Equal => self.id.cmp(&other.id),
                ord => ord,
            },
            ord => ord,
        }
    }
}

impl PartialOrd for Event {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {}: {} -> {}", self.id, self.start, self.end)
    }
}

///
/// Validate a batch of events before handing it to an overlap engine.
///
/// The whole batch is rejected on the first invalid interval or the first
/// repeated id.
///
/// # Arguments
/// - events: the batch to check
///
pub fn validate_events(events: &[Event]) -> Result<(), EventError> {
    let mut seen: HashSet<EventId> = HashSet::with_capacity(events.len());

    for event in events {
        if !event.is_valid() {
            return Err(EventError::InvalidEvent {
                id: event.id,
                start: event.start,
                end: event.end,
            });
        }
        if !seen.insert(event.id) {
            return Err(EventError::DuplicateId(event.id));
        }
    }

    Ok(())
}
