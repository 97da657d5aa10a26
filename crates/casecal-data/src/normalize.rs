//! RawEventRow to CalendarEvent normalization.
//!
//! The core only ever sees valid instants: rows whose timestamps fail to
//! parse, or whose end precedes their start, are rejected here and
//! surfaced to the caller with a warning instead of flowing into date
//! comparisons with undefined ordering.
//!
//! Enum-ish string fields get defensive defaults: an unknown event type
//! renders as a generic activity, and an unknown recurrence value falls
//! back to a daily step, matching what the expander would otherwise do
//! with an unrecognized rule.

use chrono::{DateTime, Utc};

use casecal_core::{CalendarEvent, EventType, RecurrenceType};

use crate::error::{DataError, DataResult};
use crate::raw_record::RawEventRow;

/// A row that failed normalization, kept for caller-side reporting.
#[derive(Debug)]
pub struct RejectedRow {
    /// The row id, for correlation with the backend.
    pub id: String,
    /// Why the row was rejected.
    pub error: DataError,
}

/// The outcome of normalizing a batch of rows.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Successfully normalized events, in input order.
    pub events: Vec<CalendarEvent>,
    /// Rows dropped from the batch, in input order.
    pub rejected: Vec<RejectedRow>,
}

impl NormalizedBatch {
    /// Returns true if no rows were rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalizes a batch of backend rows.
///
/// Rejected rows are logged at warn level and reported in the result;
/// they never abort the batch.
pub fn normalize_rows(rows: &[RawEventRow]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for row in rows {
        match normalize_row(row) {
            Ok(event) => batch.events.push(event),
            Err(error) => {
                tracing::warn!(id = %row.id, %error, "dropping unusable event row");
                batch.rejected.push(RejectedRow {
                    id: row.id.clone(),
                    error,
                });
            }
        }
    }

    batch
}

/// Normalizes a single backend row.
///
/// # Errors
///
/// Returns an error when a timestamp is absent or fails to parse, or when
/// the span is inverted; string enum fields never fail (see module docs).
pub fn normalize_row(row: &RawEventRow) -> DataResult<CalendarEvent> {
    let start = parse_required(&row.id, "startAt", row.start_at.as_deref())?;
    let end = parse_required(&row.id, "endAt", row.end_at.as_deref())?;
    if end < start {
        return Err(DataError::InvertedSpan {
            id: row.id.clone(),
            start,
            end,
        });
    }

    let recurrence_end = row
        .recurrence_end
        .as_deref()
        .map(|value| parse_instant("recurrenceEnd", value))
        .transpose()?;

    let mut event = CalendarEvent::new(&row.id, &row.title, start, end)
        .with_all_day(row.all_day.unwrap_or(false))
        .with_event_type(event_type_from(row.event_type.as_deref(), &row.id))
        .with_recurrence(recurrence_from(row.recurrence_type.as_deref(), &row.id));

    if let Some(end) = recurrence_end {
        event = event.with_recurrence_end(end);
    }
    if let Some(ref location) = row.location {
        event = event.with_location(location);
    }
    if let Some(ref participants) = row.participants {
        event = event.with_participants(participants.iter().map(|p| p.id.clone()).collect());
    }
    if let Some(ref organizer) = row.organizer {
        let name = organizer.display_name.as_ref().unwrap_or(&organizer.id);
        event = event.with_organizer(name);
    }

    Ok(event)
}

fn parse_required(
    id: &str,
    field: &'static str,
    value: Option<&str>,
) -> DataResult<DateTime<Utc>> {
    let value = value.ok_or_else(|| DataError::MissingField {
        id: id.to_string(),
        field,
    })?;
    parse_instant(field, value)
}

fn parse_instant(field: &'static str, value: &str) -> DataResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| DataError::InvalidTimestamp {
            field,
            value: value.to_string(),
            source,
        })
}

fn event_type_from(raw: Option<&str>, id: &str) -> EventType {
    match raw {
        None => EventType::default(),
        Some("meeting") => EventType::Meeting,
        Some("appointment") => EventType::Appointment,
        Some("activity") => EventType::Activity,
        Some("reminder") => EventType::Reminder,
        Some(other) => {
            tracing::warn!(id, event_type = other, "unknown event type, using activity");
            EventType::Activity
        }
    }
}

fn recurrence_from(raw: Option<&str>, id: &str) -> RecurrenceType {
    match raw {
        None | Some("none") => RecurrenceType::None,
        Some("daily") => RecurrenceType::Daily,
        Some("weekly") => RecurrenceType::Weekly,
        Some("monthly") => RecurrenceType::Monthly,
        Some(other) => {
            tracing::warn!(id, recurrence = other, "unknown recurrence, using daily step");
            RecurrenceType::Daily
        }
    }
}
