//! Error types for event-row ingestion.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for ingestion operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while turning backend rows into calendar events.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required timestamp field was absent on the row.
    #[error("event {id}: missing {field}")]
    MissingField { id: String, field: &'static str },

    /// A timestamp field did not parse as RFC 3339.
    #[error("invalid timestamp in {field}: {value:?}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The event's end precedes its start.
    #[error("event {id}: end {end} precedes start {start}")]
    InvertedSpan {
        id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The payload from the backend was not valid JSON for the row shape.
    #[error("row deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}
