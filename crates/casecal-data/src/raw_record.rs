//! Raw event rows from the hosted backend.
//!
//! This module defines [`RawEventRow`], the shape of a calendar event row
//! as the data-fetch layer receives it: camelCase JSON with timestamps as
//! ISO-8601 strings and enum fields as free-form strings. Rows are then
//! normalized into [`casecal_core::CalendarEvent`] values (see
//! [`crate::normalize`]), which is where parsing and validation happen.

use serde::{Deserialize, Serialize};

use crate::error::DataResult;

/// A reference to a person (participant or organizer) as stored on a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPersonRef {
    /// The person's record id.
    pub id: String,
    /// Display name, when the backend joined it in.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A calendar event row as returned by the backend.
///
/// Every field the form layer can write is carried verbatim; nothing is
/// validated at this level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRow {
    /// Unique row id.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Start instant, ISO-8601. Absent on malformed rows; rejected during
    /// normalization rather than failing the whole payload.
    #[serde(default)]
    pub start_at: Option<String>,
    /// End instant, ISO-8601.
    #[serde(default)]
    pub end_at: Option<String>,
    /// All-day flag; absent means false.
    #[serde(default)]
    pub all_day: Option<bool>,
    /// Display category (`meeting`, `appointment`, `activity`, `reminder`).
    #[serde(default)]
    pub event_type: Option<String>,
    /// Recurrence rule (`none`, `daily`, `weekly`, `monthly`).
    #[serde(default)]
    pub recurrence_type: Option<String>,
    /// Recurrence end instant, ISO-8601.
    #[serde(default)]
    pub recurrence_end: Option<String>,
    /// Free-form location text.
    #[serde(default)]
    pub location: Option<String>,
    /// Ordered participant references.
    #[serde(default)]
    pub participants: Option<Vec<RawPersonRef>>,
    /// Organizer reference.
    #[serde(default)]
    pub organizer: Option<RawPersonRef>,
}

/// Parses a JSON array of backend rows.
///
/// # Errors
///
/// Returns a deserialization error when the payload does not match the row
/// shape; per-row semantic problems (bad timestamps, inverted spans) are
/// handled later by [`crate::normalize::normalize_rows`].
pub fn parse_rows(json: &str) -> DataResult<Vec<RawEventRow>> {
    Ok(serde_json::from_str(json)?)
}
