use fxhash::FxHashMap as HashMap;

use calrs_core::models::{Event, Pair, PairSet, Timestamp, validate_events};

use crate::consts::DEFAULT_BUCKET_SIZE;
use crate::errors::{OverlapError, Result};
use crate::traits::OverlapFinder;

/// Hashes events into fixed-width time buckets and only compares events that
/// share a bucket.
///
/// Any two overlapping events share at least one timestamp, and that
/// timestamp's bucket holds both of them, so the result does not depend on the
/// bucket size. The size only changes the cost: an event is registered in
/// every bucket from `start / bucket_size` to `end / bucket_size`.
#[derive(Debug, Clone, Copy)]
pub struct BucketFinder {
    bucket_size: Timestamp,
}

impl BucketFinder {
    ///
    /// Create a new bucket finder.
    ///
    /// # Arguments
    /// - bucket_size: width of one bucket, must be positive
    ///
    pub fn new(bucket_size: Timestamp) -> Result<Self> {
        if bucket_size <= 0 {
            return Err(OverlapError::InvalidBucketSize(bucket_size));
        }
        Ok(BucketFinder { bucket_size })
    }

    pub fn bucket_size(&self) -> Timestamp {
        self.bucket_size
    }

    /// The bucket key of a timestamp.
    #[inline]
    pub fn key(&self, value: Timestamp) -> Timestamp {
        value.div_euclid(self.bucket_size)
    }
}

impl Default for BucketFinder {
    fn default() -> Self {
        BucketFinder {
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl OverlapFinder for BucketFinder {
    fn find_pairs(&self, events: &[Event]) -> Result<PairSet> {
        validate_events(events)?;

        let mut pairs = PairSet::new();
        // bucket key -> indices into `events`
        let mut buckets: HashMap<Timestamp, Vec<usize>> = HashMap::default();

        for (idx, event) in events.iter().enumerate() {
            let first = self.key(event.start);
            let last = self.key(event.end);
            log::trace!("bucket: registering {event} in buckets {first}..={last}");

            for key in first..=last {
                let bucket = buckets.entry(key).or_default();
                for &other in bucket.iter() {
                    let other = &events[other];
                    if other.overlaps(event) {
                        pairs.insert(Pair::new(other.id, event.id));
                    }
                }
                bucket.push(idx);
            }
        }

        log::debug!(
            "bucket: {} events in {} buckets of size {}, {} overlapping pairs",
            events.len(),
            buckets.len(),
            self.bucket_size,
            pairs.len()
        );
        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "bucket"
    }
}
