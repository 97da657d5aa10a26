//! Calendar math for the occurrence engine.
//!
//! This module provides [`VisibleRange`] for describing the date window a
//! calendar view is showing, plus the day/week/month helpers that the
//! expansion and filtering code builds on. All instants are UTC; helpers
//! that depend on the viewer's calendar day are generic over
//! [`chrono::TimeZone`].
//!
//! Month arithmetic clamps: adding one month to Jan 31 lands on the last
//! day of February. The monthly recurrence cursor advances iteratively, so
//! a clamped date stays clamped for the rest of the series.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default look-ahead for recurring events without an explicit end, in
/// calendar months past the queried range's end.
pub const DEFAULT_HORIZON_MONTHS: u32 = 3;

/// Returns the first day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Returns the last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .expect("in-range month arithmetic")
}

/// Returns the Sunday starting the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back))
        .expect("in-range week arithmetic")
}

/// Returns the Saturday ending the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date)
        .checked_add_days(Days::new(6))
        .expect("in-range week arithmetic")
}

/// Adds `months` calendar months to an instant, clamping the day number to
/// the target month's length. Returns `None` only on out-of-range dates.
pub fn add_months(dt: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    dt.checked_add_months(Months::new(months))
}

/// Checks whether two instants fall on the same UTC calendar day.
pub fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Returns the calendar day an instant falls on in the given timezone.
pub fn local_day<Tz: TimeZone>(dt: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    dt.with_timezone(tz).date_naive()
}

/// Converts a local calendar day to its first and last in-range instants,
/// `[00:00:00, 23:59:59]`, expressed in UTC.
fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = tz
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
        .single()
        .expect("unambiguous local midnight")
        .with_timezone(&Utc);
    let end = tz
        .from_local_datetime(&date.and_hms_opt(23, 59, 59).expect("valid time"))
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc);
    (start, end)
}

/// The date window a calendar view is showing.
///
/// Represents a closed interval `[start, end]` in UTC: both boundaries are
/// inclusive, with second resolution at the end of the final day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    /// Start of the range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the range (inclusive).
    pub end: DateTime<Utc>,
}

impl VisibleRange {
    /// Creates a new visible range.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "VisibleRange start must be <= end");
        Self { start, end }
    }

    /// Creates the range covering the month containing `reference`, in the
    /// viewer's timezone.
    pub fn for_month<Tz: TimeZone>(reference: NaiveDate, tz: &Tz) -> Self {
        let (start, _) = day_bounds(start_of_month(reference), tz);
        let (_, end) = day_bounds(end_of_month(reference), tz);
        Self { start, end }
    }

    /// Creates the range covering the Sunday-to-Saturday week containing
    /// `reference`, in the viewer's timezone.
    pub fn for_week<Tz: TimeZone>(reference: NaiveDate, tz: &Tz) -> Self {
        let (start, _) = day_bounds(start_of_week(reference), tz);
        let (_, end) = day_bounds(end_of_week(reference), tz);
        Self { start, end }
    }

    /// Creates the range covering a single calendar day in the viewer's
    /// timezone.
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let (start, end) = day_bounds(date, tz);
        Self { start, end }
    }

    /// Checks if an instant falls within this range (both ends inclusive).
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// Returns the span of this range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the ceiling for generating recurrence instances when the
    /// event has no explicit end: the range end plus the default look-ahead.
    pub fn recurrence_horizon(&self) -> DateTime<Utc> {
        add_months(self.end, DEFAULT_HORIZON_MONTHS).unwrap_or(self.end)
    }
}
