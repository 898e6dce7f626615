use calrs_core::errors::EventError;
use thiserror::Error;

/// Error type for calrs-overlaprs operations.
#[derive(Error, Debug)]
pub enum OverlapError {
    /// The input batch contained an invalid or duplicated event.
    #[error(transparent)]
    Event(#[from] EventError),

    /// Bucket size must be a positive integer.
    #[error("Invalid bucket size: {0}. It must be a positive integer")]
    InvalidBucketSize(i64),

    /// Unrecognized finder name.
    #[error("Invalid finder type: {0}. Valid options are 'exhaustive', 'sweep', 'partition' or 'bucket'")]
    UnknownFinder(String),
}

/// Result type alias for calrs-overlaprs operations.
pub type Result<T> = std::result::Result<T, OverlapError>;
