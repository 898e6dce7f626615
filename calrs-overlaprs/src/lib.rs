//! Overlap detection for calendar events.
//!
//! Given a batch of [`Event`](calrs_core::models::Event)s, every finder in this crate reports
//! each pair of overlapping events exactly once, as a canonical
//! [`Pair`](calrs_core::models::Pair) with the smaller id first. Intervals are closed, so events
//! that only share an endpoint overlap.
//!
//! Four strategies implement the same [`OverlapFinder`] trait and always agree on the result;
//! they differ only in cost:
//!
//! - [`ExhaustiveFinder`] compares all pairs. It is the reference the others are tested against.
//! - [`SweepFinder`] sorts by start and stops scanning once starts pass the current end.
//! - [`PartitionFinder`] maintains a disjoint partition of the timeline annotated with covering
//!   ids. Its size depends on the number of distinct boundaries, not on the number of pairs.
//! - [`BucketFinder`] hashes events into fixed-width time buckets.
//!
//! ## Quick Start
//!
//! ```rust
//! use calrs_core::models::{Event, Pair};
//! use calrs_overlaprs::{FinderType, OverlapFinder};
//!
//! let events = vec![
//!     Event::new(0, 0, 100),
//!     Event::new(1, 101, 200),
//!     Event::new(2, 0, 2000),
//!     Event::new(3, 101, 200),
//! ];
//!
//! let finder = FinderType::Partition.build(100).unwrap();
//! let pairs = finder.find_pairs(&events).unwrap();
//!
//! let expected = [(0, 2), (1, 2), (1, 3), (2, 3)].map(Pair::from);
//! assert!(pairs.iter().eq(expected.iter()));
//! ```
use std::fmt::{self, Display};
use std::str::FromStr;

use calrs_core::models::Timestamp;

/// Bucket-hash strategy.
///
/// See [`BucketFinder`] for details.
pub mod bucket;

/// Error and result types.
pub mod errors;

/// All-pairs reference strategy.
pub mod exhaustive;

/// Incremental timeline partition strategy.
///
/// See [`Partition`](partition::Partition) for details.
pub mod partition;

/// Sort-and-sweep strategy.
pub mod sweep;

/// Core trait for overlap finders.
///
/// See [`OverlapFinder`] for the main trait.
pub mod traits;

// re-exports
pub use self::bucket::BucketFinder;
pub use self::errors::{OverlapError, Result};
pub use self::exhaustive::ExhaustiveFinder;
pub use self::partition::PartitionFinder;
pub use self::sweep::SweepFinder;
pub use self::traits::OverlapFinder;

/// The overlap strategy to use.
///
/// # Variants
///
/// * `Exhaustive` - compare every pair; only sensible for small batches or as a reference.
/// * `Sweep` - sort by start and scan forward. Good general default for sparse calendars.
/// * `Partition` - incremental timeline partition. Good when overlaps are dense but boundaries
///   are few.
/// * `Bucket` - fixed-width time buckets. Good when events are short relative to the bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderType {
    Exhaustive,
    Sweep,
    Partition,
    Bucket,
}

impl FinderType {
    /// Every strategy, reference first.
    pub const ALL: [FinderType; 4] = [
        FinderType::Exhaustive,
        FinderType::Sweep,
        FinderType::Partition,
        FinderType::Bucket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinderType::Exhaustive => "exhaustive",
            FinderType::Sweep => "sweep",
            FinderType::Partition => "partition",
            FinderType::Bucket => "bucket",
        }
    }

    /// Build a boxed finder of this type. `bucket_size` is only used by
    /// [`FinderType::Bucket`] and is rejected there if not positive.
    pub fn build(&self, bucket_size: Timestamp) -> Result<Box<dyn OverlapFinder>> {
        let finder: Box<dyn OverlapFinder> = match self {
            FinderType::Exhaustive => Box::new(ExhaustiveFinder::new()),
            FinderType::Sweep => Box::new(SweepFinder::new()),
            FinderType::Partition => Box::new(PartitionFinder::new()),
            FinderType::Bucket => Box::new(BucketFinder::new(bucket_size)?),
        };
        Ok(finder)
    }
}

impl FromStr for FinderType {
    type Err = OverlapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exhaustive" | "brute" => Ok(FinderType::Exhaustive),
            "sweep" | "sort" => Ok(FinderType::Sweep),
            "partition" | "segment" => Ok(FinderType::Partition),
            "bucket" => Ok(FinderType::Bucket),
            _ => Err(OverlapError::UnknownFinder(s.to_string())),
        }
    }
}

impl Display for FinderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constants used throughout the crate.
pub mod consts {
    use calrs_core::models::Timestamp;

    /// Bucket width used when none is given.
    pub const DEFAULT_BUCKET_SIZE: Timestamp = 100;
}
