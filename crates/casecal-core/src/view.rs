//! View selection and day bucketing.
//!
//! Once [`expand_events`](crate::expand::expand_events) has produced the
//! flat occurrence list, this module picks the subset the current view
//! shows and groups it by calendar day for grid rendering. Day comparisons
//! are made in the viewer's timezone, not UTC.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Occurrence;
use crate::time::{end_of_month, end_of_week, local_day, start_of_month, start_of_week};

/// The calendar's display granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// A month grid.
    #[default]
    Month,
    /// A Sunday-to-Saturday week grid.
    Week,
}

/// Selects the occurrences relevant to the current view.
///
/// When `selected_day` is set (the user clicked a day), it overrides the
/// mode and only that local calendar day's occurrences are returned.
/// Otherwise the month or week containing `reference` is selected, both
/// boundaries inclusive. The result is sorted ascending by start.
pub fn select_for_view<Tz: TimeZone>(
    occurrences: &[Occurrence],
    mode: ViewMode,
    reference: NaiveDate,
    selected_day: Option<NaiveDate>,
    tz: &Tz,
) -> Vec<Occurrence> {
    let (first, last) = match selected_day {
        Some(day) => (day, day),
        None => match mode {
            ViewMode::Month => (start_of_month(reference), end_of_month(reference)),
            ViewMode::Week => (start_of_week(reference), end_of_week(reference)),
        },
    };

    let mut selected: Vec<Occurrence> = occurrences
        .iter()
        .filter(|occurrence| {
            let day = local_day(occurrence.start, tz);
            first <= day && day <= last
        })
        .cloned()
        .collect();
    selected.sort_by_key(|occurrence| occurrence.start);
    selected
}

/// Partitions occurrences into one bucket per calendar day in
/// `[start, end]` inclusive.
///
/// Every day in the span gets a bucket, empty or not, so the grid can be
/// rendered by straight iteration. Occurrences outside the span are
/// dropped; within a bucket, order is ascending by start.
pub fn bucket_by_day<Tz: TimeZone>(
    occurrences: &[Occurrence],
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<Occurrence>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Occurrence>> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| (day, Vec::new()))
        .collect();

    for occurrence in occurrences {
        let day = local_day(occurrence.start, tz);
        if let Some(bucket) = buckets.get_mut(&day) {
            bucket.push(occurrence.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|occurrence| occurrence.start);
    }

    buckets
}

/// Splits a day bucket into the cells to show and an overflow count.
///
/// Presentation policy only: the full bucket stays untouched, the caller
/// renders the returned slice plus a "+N more" affordance.
pub fn preview(bucket: &[Occurrence], limit: usize) -> (&[Occurrence], usize) {
    let shown = limit.min(bucket.len());
    (&bucket[..shown], bucket.len() - shown)
}

/// Returns the next `limit` occurrences starting at or after `now`,
/// ascending by start.
pub fn upcoming(occurrences: &[Occurrence], now: DateTime<Utc>, limit: usize) -> Vec<Occurrence> {
    let mut future: Vec<Occurrence> = occurrences
        .iter()
        .filter(|occurrence| occurrence.start >= now)
        .cloned()
        .collect();
    future.sort_by_key(|occurrence| occurrence.start);
    future.truncate(limit);
    future
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CalendarEvent;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn occurrence_at(id: &str, start: DateTime<Utc>) -> Occurrence {
        let event = CalendarEvent::new(id, "Check-in", start, start + chrono::Duration::hours(1));
        Occurrence::original(&event)
    }

    mod select_for_view {
        use super::*;

        fn around_february() -> Vec<Occurrence> {
            vec![
                occurrence_at("jan-31", utc(2024, 1, 31, 9, 0, 0)),
                occurrence_at("feb-01", utc(2024, 2, 1, 9, 0, 0)),
                occurrence_at("feb-29", utc(2024, 2, 29, 9, 0, 0)),
            ]
        }

        #[test]
        fn month_view_keeps_only_that_month() {
            let selected = select_for_view(
                &around_february(),
                ViewMode::Month,
                date(2024, 2, 15),
                None,
                &Utc,
            );

            let ids: Vec<_> = selected.iter().map(|o| o.occurrence_id.as_str()).collect();
            assert_eq!(ids, vec!["feb-01", "feb-29"]);
        }

        #[test]
        fn week_view_runs_sunday_to_saturday() {
            // Week of Wednesday 2024-01-10: Jan 7 through Jan 13.
            let occurrences = vec![
                occurrence_at("sat-06", utc(2024, 1, 6, 9, 0, 0)),
                occurrence_at("sun-07", utc(2024, 1, 7, 9, 0, 0)),
                occurrence_at("sat-13", utc(2024, 1, 13, 9, 0, 0)),
                occurrence_at("sun-14", utc(2024, 1, 14, 9, 0, 0)),
            ];

            let selected =
                select_for_view(&occurrences, ViewMode::Week, date(2024, 1, 10), None, &Utc);

            let ids: Vec<_> = selected.iter().map(|o| o.occurrence_id.as_str()).collect();
            assert_eq!(ids, vec!["sun-07", "sat-13"]);
        }

        #[test]
        fn selected_day_overrides_mode() {
            let occurrences = vec![
                occurrence_at("mar-09", utc(2024, 3, 9, 9, 0, 0)),
                occurrence_at("mar-10-a", utc(2024, 3, 10, 14, 0, 0)),
                occurrence_at("mar-10-b", utc(2024, 3, 10, 8, 0, 0)),
                occurrence_at("mar-11", utc(2024, 3, 11, 9, 0, 0)),
            ];

            for mode in [ViewMode::Month, ViewMode::Week] {
                let selected = select_for_view(
                    &occurrences,
                    mode,
                    date(2024, 3, 15),
                    Some(date(2024, 3, 10)),
                    &Utc,
                );
                let ids: Vec<_> = selected.iter().map(|o| o.occurrence_id.as_str()).collect();
                assert_eq!(ids, vec!["mar-10-b", "mar-10-a"]);
            }
        }

        #[test]
        fn result_is_sorted_by_start() {
            let occurrences = vec![
                occurrence_at("late", utc(2024, 2, 20, 16, 0, 0)),
                occurrence_at("early", utc(2024, 2, 3, 8, 0, 0)),
                occurrence_at("mid", utc(2024, 2, 10, 12, 0, 0)),
            ];

            let selected = select_for_view(
                &occurrences,
                ViewMode::Month,
                date(2024, 2, 1),
                None,
                &Utc,
            );

            let ids: Vec<_> = selected.iter().map(|o| o.occurrence_id.as_str()).collect();
            assert_eq!(ids, vec!["early", "mid", "late"]);
        }

        #[test]
        fn empty_input_yields_empty_output() {
            let selected = select_for_view(&[], ViewMode::Month, date(2024, 2, 1), None, &Utc);
            assert!(selected.is_empty());
        }
    }

    mod bucket_by_day {
        use super::*;

        #[test]
        fn every_day_gets_a_bucket() {
            let occurrences = vec![occurrence_at("one", utc(2024, 1, 2, 9, 0, 0))];
            let buckets = bucket_by_day(&occurrences, date(2024, 1, 1), date(2024, 1, 7), &Utc);

            assert_eq!(buckets.len(), 7);
            assert!(buckets[&date(2024, 1, 1)].is_empty());
            assert_eq!(buckets[&date(2024, 1, 2)].len(), 1);
        }

        #[test]
        fn occurrences_outside_span_are_dropped() {
            let occurrences = vec![
                occurrence_at("inside", utc(2024, 1, 3, 9, 0, 0)),
                occurrence_at("before", utc(2023, 12, 31, 9, 0, 0)),
                occurrence_at("after", utc(2024, 1, 8, 9, 0, 0)),
            ];
            let buckets = bucket_by_day(&occurrences, date(2024, 1, 1), date(2024, 1, 7), &Utc);

            let total: usize = buckets.values().map(Vec::len).sum();
            assert_eq!(total, 1);
        }

        #[test]
        fn buckets_are_sorted_by_start() {
            let occurrences = vec![
                occurrence_at("afternoon", utc(2024, 1, 5, 15, 0, 0)),
                occurrence_at("morning", utc(2024, 1, 5, 8, 0, 0)),
            ];
            let buckets = bucket_by_day(&occurrences, date(2024, 1, 5), date(2024, 1, 5), &Utc);

            let ids: Vec<_> = buckets[&date(2024, 1, 5)]
                .iter()
                .map(|o| o.occurrence_id.as_str())
                .collect();
            assert_eq!(ids, vec!["morning", "afternoon"]);
        }
    }

    mod preview {
        use super::*;

        #[test]
        fn caps_at_limit_and_counts_overflow() {
            let bucket: Vec<Occurrence> = (0..5)
                .map(|i| occurrence_at(&format!("occ-{i}"), utc(2024, 1, 5, 8 + i, 0, 0)))
                .collect();

            let (shown, overflow) = preview(&bucket, 3);
            assert_eq!(shown.len(), 3);
            assert_eq!(overflow, 2);
            assert_eq!(shown[0].occurrence_id, "occ-0");
        }

        #[test]
        fn short_bucket_has_no_overflow() {
            let bucket = vec![occurrence_at("only", utc(2024, 1, 5, 8, 0, 0))];
            let (shown, overflow) = preview(&bucket, 3);
            assert_eq!(shown.len(), 1);
            assert_eq!(overflow, 0);
        }

        #[test]
        fn empty_bucket() {
            let (shown, overflow) = preview(&[], 3);
            assert!(shown.is_empty());
            assert_eq!(overflow, 0);
        }
    }

    mod upcoming {
        use super::*;

        #[test]
        fn takes_next_starts_in_order() {
            let occurrences = vec![
                occurrence_at("past", utc(2024, 1, 1, 9, 0, 0)),
                occurrence_at("soon", utc(2024, 1, 10, 9, 0, 0)),
                occurrence_at("later", utc(2024, 1, 20, 9, 0, 0)),
                occurrence_at("much-later", utc(2024, 2, 1, 9, 0, 0)),
            ];

            let next = upcoming(&occurrences, utc(2024, 1, 5, 0, 0, 0), 2);
            let ids: Vec<_> = next.iter().map(|o| o.occurrence_id.as_str()).collect();
            assert_eq!(ids, vec!["soon", "later"]);
        }

        #[test]
        fn start_exactly_now_is_included() {
            let occurrences = vec![occurrence_at("now", utc(2024, 1, 5, 9, 0, 0))];
            let next = upcoming(&occurrences, utc(2024, 1, 5, 9, 0, 0), 5);
            assert_eq!(next.len(), 1);
        }
    }
}
