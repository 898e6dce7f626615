use thiserror::Error;

use crate::models::{EventId, Timestamp};

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Invalid event {id}: start={start}, end={end} (expected 0 <= start <= end)")]
    InvalidEvent {
        id: EventId,
        start: Timestamp,
        end: Timestamp,
    },

    #[error("Duplicate event id in batch: {0}")]
    DuplicateId(EventId),

    #[error("Error parsing event on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
