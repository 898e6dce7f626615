use calrs_core::models::{Event, PairSet};

use crate::errors::Result;

/// A strategy that reports every pair of overlapping events.
///
/// Implementations are pure: they never mutate `events`, keep no state between
/// calls, and return exactly the canonical pairs `(min id, max id)` of all
/// overlapping events. Batches of fewer than two events yield an empty set.
/// The whole batch is rejected if any event is invalid or an id repeats.
pub trait OverlapFinder: Send + Sync {
    fn find_pairs(&self, events: &[Event]) -> Result<PairSet>;

    /// Short, stable name of the strategy (e.g. `"sweep"`).
    fn name(&self) -> &'static str;
}
