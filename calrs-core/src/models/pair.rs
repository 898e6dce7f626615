use std::collections::BTreeSet;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::Serialize;

use super::event::EventId;

///
/// Two overlapping events, always stored as `first_id <= second_id`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pair {
    first_id: EventId,
    second_id: EventId,
}

/// The deduplicated, ordered result of an overlap search.
pub type PairSet = BTreeSet<Pair>;

impl Pair {
    ///
    /// Create a canonical pair regardless of the order the ids are given in.
    ///
    #[inline]
    pub fn new(a: EventId, b: EventId) -> Self {
        if a <= b {
            Pair {
                first_id: a,
                second_id: b,
            }
        } else {
            Pair {
                first_id: b,
                second_id: a,
            }
        }
    }

    pub fn first_id(&self) -> EventId {
        self.first_id
    }

    pub fn second_id(&self) -> EventId {
        self.second_id
    }
}

impl From<(EventId, EventId)> for Pair {
    fn from((a, b): (EventId, EventId)) -> Self {
        Pair::new(a, b)
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.first_id, self.second_id)
    }
}
