pub mod event;
pub mod pair;

// re-export for cleaner imports
pub use self::event::{Event, EventId, Timestamp, validate_events};
pub use self::pair::{Pair, PairSet};
