//! Display formatting for occurrence lists.
//!
//! Produces the one-line labels the agenda ("upcoming events") list and the
//! day-detail panel render for each occurrence. Times are formatted as
//! given; callers convert to the viewer's timezone before formatting.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::event::Occurrence;

/// Time display preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour clock, e.g. `14:30`.
    #[default]
    TwentyFourHour,
    /// 12-hour clock, e.g. `2:30 PM`.
    TwelveHour,
}

/// Configuration options for occurrence formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Time display preference.
    pub time_format: TimeFormat,
    /// Maximum title length; longer titles are truncated with an ellipsis.
    pub max_title_length: Option<usize>,
    /// Whether to append the location.
    pub show_location: bool,
    /// Whether to append the participant count.
    pub show_participants: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            max_title_length: None,
            show_location: true,
            show_participants: true,
        }
    }
}

/// Truncates a string to at most `max` characters, appending an ellipsis.
///
/// The ellipsis counts toward the budget; `max == 0` yields an empty
/// string.
pub fn ellipsis(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let kept: String = text.chars().take(max - 1).collect();
    Cow::Owned(format!("{kept}…"))
}

/// Formats occurrences into display lines.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceFormatter {
    options: FormatOptions,
}

impl OccurrenceFormatter {
    /// Creates a formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns the time label: the span for timed occurrences, `all day`
    /// for all-day ones.
    pub fn time_label(&self, occurrence: &Occurrence) -> String {
        if occurrence.all_day {
            return "all day".to_string();
        }
        let pattern = match self.options.time_format {
            TimeFormat::TwentyFourHour => "%H:%M",
            TimeFormat::TwelveHour => "%-I:%M %p",
        };
        format!(
            "{}-{}",
            occurrence.start.format(pattern),
            occurrence.end.format(pattern)
        )
    }

    /// Returns the one-line agenda label for an occurrence.
    pub fn format_line(&self, occurrence: &Occurrence) -> String {
        let title = match self.options.max_title_length {
            Some(max) => ellipsis(&occurrence.title, max),
            None => Cow::Borrowed(occurrence.title.as_str()),
        };

        let mut line = format!(
            "[{}] {}  {}",
            occurrence.event_type.display_name(),
            self.time_label(occurrence),
            title
        );

        if self.options.show_location {
            if let Some(ref location) = occurrence.location {
                line.push_str(" @ ");
                line.push_str(location);
            }
        }

        if self.options.show_participants && occurrence.participant_count() > 0 {
            let count = occurrence.participant_count();
            let noun = if count == 1 {
                "participant"
            } else {
                "participants"
            };
            line.push_str(&format!(" ({count} {noun})"));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CalendarEvent, EventType};
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sample_occurrence() -> Occurrence {
        let event = CalendarEvent::new(
            "evt-1",
            "Case review",
            utc(2024, 3, 5, 9, 0, 0),
            utc(2024, 3, 5, 10, 30, 0),
        )
        .with_event_type(EventType::Meeting)
        .with_location("Room 2")
        .with_participants(vec!["p-1".into(), "p-2".into(), "p-3".into()]);
        Occurrence::original(&event)
    }

    #[test]
    fn default_line() {
        let formatter = OccurrenceFormatter::default();
        insta::assert_snapshot!(
            formatter.format_line(&sample_occurrence()),
            @"[Meeting] 09:00-10:30  Case review @ Room 2 (3 participants)"
        );
    }

    #[test]
    fn twelve_hour_clock() {
        let formatter = OccurrenceFormatter::new(FormatOptions {
            time_format: TimeFormat::TwelveHour,
            ..Default::default()
        });
        insta::assert_snapshot!(
            formatter.time_label(&sample_occurrence()),
            @"9:00 AM-10:30 AM"
        );
    }

    #[test]
    fn all_day_suppresses_times() {
        let event = CalendarEvent::new(
            "evt-2",
            "School holiday",
            utc(2024, 3, 5, 0, 0, 0),
            utc(2024, 3, 5, 23, 59, 59),
        )
        .with_all_day(true)
        .with_event_type(EventType::Reminder);
        let formatter = OccurrenceFormatter::default();
        insta::assert_snapshot!(
            formatter.format_line(&Occurrence::original(&event)),
            @"[Reminder] all day  School holiday"
        );
    }

    #[test]
    fn single_participant_is_singular() {
        let event = CalendarEvent::new(
            "evt-3",
            "Tutoring",
            utc(2024, 3, 5, 16, 0, 0),
            utc(2024, 3, 5, 17, 0, 0),
        )
        .with_event_type(EventType::Appointment)
        .with_participants(vec!["p-9".into()]);
        let formatter = OccurrenceFormatter::default();
        insta::assert_snapshot!(
            formatter.format_line(&Occurrence::original(&event)),
            @"[Appointment] 16:00-17:00  Tutoring (1 participant)"
        );
    }

    #[test]
    fn location_and_participants_can_be_hidden() {
        let formatter = OccurrenceFormatter::new(FormatOptions {
            show_location: false,
            show_participants: false,
            ..Default::default()
        });
        insta::assert_snapshot!(
            formatter.format_line(&sample_occurrence()),
            @"[Meeting] 09:00-10:30  Case review"
        );
    }

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(ellipsis("short", 10), "short");
        assert_eq!(ellipsis("a very long event title", 10), "a very lo…");
        assert_eq!(ellipsis("abc", 1), "…");
        assert_eq!(ellipsis("abc", 0), "");
        assert_eq!(ellipsis("", 0), "");

        let formatter = OccurrenceFormatter::new(FormatOptions {
            max_title_length: Some(6),
            show_location: false,
            show_participants: false,
            ..Default::default()
        });
        let mut occurrence = sample_occurrence();
        occurrence.title = "Quarterly planning".into();
        insta::assert_snapshot!(
            formatter.format_line(&occurrence),
            @"[Meeting] 09:00-10:30  Quart…"
        );
    }
}
