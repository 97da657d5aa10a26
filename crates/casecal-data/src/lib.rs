//! Backend row ingestion: raw event records, parsing, normalization.
//!
//! Sits between the data-fetch layer (which returns JSON rows from the
//! hosted backend) and `casecal-core` (which only works with validated
//! [`casecal_core::CalendarEvent`] values).

pub mod error;
pub mod normalize;
pub mod raw_record;

pub use error::{DataError, DataResult};
pub use normalize::{NormalizedBatch, RejectedRow, normalize_row, normalize_rows};
pub use raw_record::{RawEventRow, RawPersonRef, parse_rows};
