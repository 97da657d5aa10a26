//! Recurrence expansion.
//!
//! This module turns stored [`CalendarEvent`]s into the flat list of
//! [`Occurrence`]s a calendar view renders, materializing virtual instances
//! for recurring events. Expansion is a pure function of its inputs: no
//! caching, no hidden state, and nothing is ever written back.
//!
//! Range filtering is deliberately *not* done here — a non-recurring event
//! outside the visible range is still emitted, and the view layer decides
//! what to show. The one exception is the iteration window for recurring
//! events, which never walks past the range end.

use chrono::{DateTime, Duration, Utc};

use crate::event::{CalendarEvent, Occurrence, RecurrenceType};
use crate::time::{VisibleRange, add_months, same_utc_day};

/// Hard cap on loop iterations per recurring event.
///
/// Bounds worst-case work to `O(100 × events)` no matter how wide the
/// queried range is relative to the recurrence step. When the cap is hit
/// the series is truncated, not failed.
pub const MAX_INSTANCES_PER_EVENT: usize = 100;

/// Expands a list of events over a visible range.
///
/// Output order is input-event order, chronological within each event.
/// No cross-event sorting is performed.
pub fn expand_events(events: &[CalendarEvent], range: &VisibleRange) -> Vec<Occurrence> {
    let occurrences: Vec<Occurrence> = events
        .iter()
        .flat_map(|event| expand_event(event, range))
        .collect();

    tracing::debug!(
        events = events.len(),
        occurrences = occurrences.len(),
        "expanded events over visible range"
    );

    occurrences
}

/// Expands a single event over a visible range.
///
/// A non-recurring event yields exactly one occurrence equal to the event,
/// regardless of whether it falls inside the range. A recurring event
/// yields its anchor instance plus one virtual instance per recurrence
/// step that lands inside the range, up to the recurrence end (or the
/// default look-ahead horizon) and [`MAX_INSTANCES_PER_EVENT`].
///
/// The anchor instance — the one on the original start's calendar day —
/// is always eligible for emission even when it falls before the range
/// start, so the editable source event stays discoverable when iteration
/// begins before the window.
pub fn expand_event(event: &CalendarEvent, range: &VisibleRange) -> Vec<Occurrence> {
    if !event.is_recurring() {
        return vec![Occurrence::original(event)];
    }

    let effective_end = event
        .recurrence_end
        .unwrap_or_else(|| range.recurrence_horizon());

    let mut occurrences = Vec::new();
    let mut cursor = event.start;
    let mut iterations = 0;

    while cursor <= effective_end && cursor <= range.end && iterations < MAX_INSTANCES_PER_EVENT {
        let on_anchor_day = same_utc_day(cursor, event.start);
        if cursor >= range.start || on_anchor_day {
            if on_anchor_day {
                occurrences.push(Occurrence::original(event));
            } else {
                occurrences.push(Occurrence::virtual_at(event, cursor));
            }
        }

        // The counter covers every iteration, included or not.
        iterations += 1;
        cursor = match step(event.recurrence, cursor) {
            Some(next) => next,
            None => break,
        };
    }

    occurrences
}

/// Advances the recurrence cursor by one step.
///
/// Monthly uses calendar-month arithmetic with day clamping, applied to
/// the current cursor rather than the original start, so a series anchored
/// on Jan 31 continues on the 29th (leap February) from March onward.
fn step(recurrence: RecurrenceType, cursor: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match recurrence {
        // Callers filter out non-recurring events before iterating.
        RecurrenceType::None => None,
        RecurrenceType::Daily => cursor.checked_add_signed(Duration::days(1)),
        RecurrenceType::Weekly => cursor.checked_add_signed(Duration::days(7)),
        RecurrenceType::Monthly => add_months(cursor, 1),
    }
}
