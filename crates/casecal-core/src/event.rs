//! Event and occurrence types for the case-management calendar.
//!
//! This module provides the core types of the calendar engine:
//! - [`CalendarEvent`]: a stored event as edited by staff (one row per event,
//!   recurring or not)
//! - [`Occurrence`]: one concrete, datable appearance of an event on the
//!   calendar, original or recurrence-generated
//! - [`EventType`]: the display category of an event
//! - [`RecurrenceType`]: the repetition rule of an event

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The display category of a calendar event.
///
/// Purely presentational: it drives styling and labels in the rendering
/// layer and has no effect on expansion or filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A staff or family meeting.
    Meeting,
    /// A service appointment with a beneficiary.
    Appointment,
    /// A generic scheduled activity.
    #[default]
    Activity,
    /// A reminder with no counterpart in the physical world.
    Reminder,
}

impl EventType {
    /// Returns a human-readable name for this event type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Meeting => "Meeting",
            Self::Appointment => "Appointment",
            Self::Activity => "Activity",
            Self::Reminder => "Reminder",
        }
    }

    /// Returns the CSS-style slug used by the rendering layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Appointment => "appointment",
            Self::Activity => "activity",
            Self::Reminder => "reminder",
        }
    }
}

/// How an event repeats over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    /// The event happens exactly once.
    #[default]
    None,
    /// Repeats every day.
    Daily,
    /// Repeats every seven days.
    Weekly,
    /// Repeats on the same day number each month (clamped in shorter months).
    Monthly,
}

impl RecurrenceType {
    /// Returns true if this rule generates more than one occurrence.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A stored calendar event.
///
/// This is the canonical representation of an event as it comes out of the
/// data layer: one record regardless of how many times it appears on the
/// calendar. Recurring events are expanded into [`Occurrence`]s on demand
/// and the expansion is never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// The event title.
    pub title: String,
    /// When the (first) occurrence starts.
    pub start: DateTime<Utc>,
    /// When the (first) occurrence ends.
    pub end: DateTime<Utc>,
    /// Whether time-of-day is meaningful for display.
    pub all_day: bool,
    /// Display category.
    pub event_type: EventType,
    /// Repetition rule.
    pub recurrence: RecurrenceType,
    /// Last instant at which instances may be generated; when absent,
    /// recurrence is capped by the default look-ahead horizon.
    pub recurrence_end: Option<DateTime<Utc>>,
    /// Free-form location text.
    pub location: Option<String>,
    /// Ordered participant references (used for a display count).
    pub participants: Vec<String>,
    /// Display name of the organizer, if any.
    pub organizer: Option<String>,
}

impl CalendarEvent {
    /// Creates a new event with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
            event_type: EventType::default(),
            recurrence: RecurrenceType::default(),
            recurrence_end: None,
            location: None,
            participants: Vec::new(),
            organizer: None,
        }
    }

    /// Returns true if this event has a recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Returns the span of one occurrence.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the number of participant references.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Builder method to set the event type.
    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Builder method to set the recurrence rule.
    pub fn with_recurrence(mut self, recurrence: RecurrenceType) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Builder method to set the recurrence end.
    pub fn with_recurrence_end(mut self, end: DateTime<Utc>) -> Self {
        self.recurrence_end = Some(end);
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the participant references.
    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    /// Builder method to set the organizer display name.
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }
}

/// One concrete appearance of an event on the calendar.
///
/// Derived and ephemeral: occurrences are materialized fresh on every
/// expansion call and discarded after rendering. Clicking any occurrence,
/// virtual or not, opens the editor for the event named by
/// [`source_event_id`](Self::source_event_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// The original event's id for the first instance, or
    /// `"{event_id}_{YYYY-MM-DD}"` for a materialized virtual instance.
    pub occurrence_id: String,
    /// Back-reference to the originating event.
    pub source_event_id: String,
    /// True for generated instances, false for the original.
    pub is_virtual: bool,
    /// The event title.
    pub title: String,
    /// When this occurrence starts.
    pub start: DateTime<Utc>,
    /// When this occurrence ends. The span always equals the source
    /// event's span exactly.
    pub end: DateTime<Utc>,
    /// Whether time-of-day is meaningful for display.
    pub all_day: bool,
    /// Display category, copied from the source event.
    pub event_type: EventType,
    /// Repetition rule of the source event.
    pub recurrence: RecurrenceType,
    /// Recurrence end of the source event.
    pub recurrence_end: Option<DateTime<Utc>>,
    /// Free-form location text.
    pub location: Option<String>,
    /// Ordered participant references.
    pub participants: Vec<String>,
    /// Display name of the organizer, if any.
    pub organizer: Option<String>,
}

impl Occurrence {
    /// Creates the original (non-virtual) occurrence of an event.
    pub fn original(event: &CalendarEvent) -> Self {
        Self {
            occurrence_id: event.id.clone(),
            source_event_id: event.id.clone(),
            is_virtual: false,
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            all_day: event.all_day,
            event_type: event.event_type,
            recurrence: event.recurrence,
            recurrence_end: event.recurrence_end,
            location: event.location.clone(),
            participants: event.participants.clone(),
            organizer: event.organizer.clone(),
        }
    }

    /// Creates a virtual occurrence of a recurring event at `start`.
    ///
    /// The end is shifted so that the span equals the source event's span
    /// exactly, whatever the calendar distance between the two starts.
    pub fn virtual_at(event: &CalendarEvent, start: DateTime<Utc>) -> Self {
        Self {
            occurrence_id: format!("{}_{}", event.id, start.date_naive().format("%Y-%m-%d")),
            source_event_id: event.id.clone(),
            is_virtual: true,
            title: event.title.clone(),
            start,
            end: start + event.duration(),
            all_day: event.all_day,
            event_type: event.event_type,
            recurrence: event.recurrence,
            recurrence_end: event.recurrence_end,
            location: event.location.clone(),
            participants: event.participants.clone(),
            organizer: event.organizer.clone(),
        }
    }

    /// Returns the span of this occurrence.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the number of participant references.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
