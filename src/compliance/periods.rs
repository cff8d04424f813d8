//! Calendar periods and interval arithmetic in local wall-clock time.
//!
//! All evaluation happens in the UTC offset of the proposed shift. Because the
//! offset is fixed, converting instants to naive local times preserves
//! durations, so overlaps and splits are computed on [`NaiveDateTime`] values.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;

/// A half-open interval `[start, end)` in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl Period {
    /// Creates a period from its bounds.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole seconds of `[start, end)` that fall inside this period.
    ///
    /// Returns zero when the intervals do not intersect.
    pub fn overlap_seconds(&self, start: NaiveDateTime, end: NaiveDateTime) -> i64 {
        let clamped_start = start.max(self.start);
        let clamped_end = end.min(self.end);
        if clamped_end > clamped_start {
            (clamped_end - clamped_start).num_seconds()
        } else {
            0
        }
    }

    /// Returns true if the two half-open intervals share any instant.
    ///
    /// Intervals that only touch (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }

    /// Length of the period in whole seconds.
    pub fn seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Converts an instant into wall-clock time at the given offset.
pub fn local_time(instant: DateTime<FixedOffset>, offset: FixedOffset) -> NaiveDateTime {
    instant.with_timezone(&offset).naive_local()
}

/// Converts a wall-clock time at the given offset back into an instant.
pub fn to_instant(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The ISO week (Monday 00:00 to the next Monday 00:00) containing `at`.
///
/// # Example
///
/// ```
/// use shift_compliance::compliance::iso_week_containing;
/// use chrono::NaiveDateTime;
///
/// // 2026-01-15 is a Thursday
/// let at = NaiveDateTime::parse_from_str("2026-01-15 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let week = iso_week_containing(at);
/// assert_eq!(week.start.to_string(), "2026-01-12 00:00:00");
/// assert_eq!(week.end.to_string(), "2026-01-19 00:00:00");
/// ```
pub fn iso_week_containing(at: NaiveDateTime) -> Period {
    let date = at.date();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    Period::new(midnight(monday), midnight(monday + Duration::days(7)))
}

/// The calendar month containing `at`.
pub fn calendar_month_containing(at: NaiveDateTime) -> Period {
    let date = at.date();
    let first = date - Duration::days(i64::from(date.day0()));
    // 31 days past the first always lands in the following month.
    let probe = first + Duration::days(31);
    let next_first = probe - Duration::days(i64::from(probe.day0()));
    Period::new(midnight(first), midnight(next_first))
}

/// The calendar day containing `at`.
pub fn calendar_day_containing(at: NaiveDateTime) -> Period {
    let date = at.date();
    Period::new(midnight(date), midnight(date + Duration::days(1)))
}

/// Splits a period at every wall-clock hour boundary.
///
/// Each returned piece lies within a single clock hour, and therefore within
/// a single calendar day. Pieces are chronological and cover the input exactly.
pub fn split_by_hour(period: Period) -> Vec<Period> {
    let mut pieces = Vec::new();
    let mut current = period.start;

    while current < period.end {
        let hour_start = midnight(current.date()) + Duration::hours(i64::from(current.hour()));
        let next_hour = hour_start + Duration::hours(1);
        let piece_end = next_hour.min(period.end);
        pieces.push(Period::new(current, piece_end));
        current = piece_end;
    }

    pieces
}

/// Converts whole seconds into decimal hours.
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    (Decimal::from(seconds) / Decimal::from(3600)).normalize()
}
