//! Period resolution and range membership.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

use super::types::{DateRange, PeriodKind};
use crate::records::RecordDate;

/// Maps a local wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a DST gap
/// are pushed forward by an hour.
fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => instant,
        LocalResult::None => tz
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// 00:00:00.000 local on `day`.
#[must_use]
pub fn start_of_day(tz: Tz, day: NaiveDate) -> DateTime<Tz> {
    localize(tz, day.and_time(NaiveTime::MIN))
}

/// 23:59:59.999 local on `day`.
#[must_use]
pub fn end_of_day(tz: Tz, day: NaiveDate) -> DateTime<Tz> {
    let next_midnight = day.and_time(NaiveTime::MIN) + TimeDelta::days(1);
    localize(tz, next_midnight - TimeDelta::milliseconds(1))
}

/// 12:00:00.000 local on `day`.
fn noon(tz: Tz, day: NaiveDate) -> DateTime<Tz> {
    localize(tz, day.and_time(NaiveTime::MIN) + TimeDelta::hours(12))
}

fn range_for_first_day(kind: PeriodKind, first_day: NaiveDate, tz: Tz) -> DateRange {
    DateRange {
        kind: Some(kind),
        start: start_of_day(tz, first_day),
        end: end_of_day(tz, kind.last_day(first_day)),
    }
}

/// Resolves the period of the given kind containing `now`.
#[must_use]
pub fn resolve_period(kind: PeriodKind, now: &DateTime<Tz>) -> DateRange {
    range_for_first_day(kind, kind.first_day(now.date_naive()), now.timezone())
}

/// Resolves the period immediately before the one containing `now`.
///
/// At the earliest representable period there is nothing before it, and the
/// current period is returned.
#[must_use]
pub fn resolve_previous_period(kind: PeriodKind, now: &DateTime<Tz>) -> DateRange {
    resolve_shifted(kind, now, 1).unwrap_or_else(|| resolve_period(kind, now))
}

/// Resolves the period `steps` periods before the one containing `now`.
///
/// `None` when that period starts before the earliest representable date.
#[must_use]
pub fn resolve_shifted(kind: PeriodKind, now: &DateTime<Tz>, steps: u32) -> Option<DateRange> {
    let first_day = kind.shift_back(now.date_naive(), steps)?;
    Some(range_for_first_day(kind, first_day, now.timezone()))
}

/// Builds a custom range covering two calendar days inclusively.
///
/// Reversed bounds are swapped.
#[must_use]
pub fn resolve_custom(first: NaiveDate, last: NaiveDate, tz: Tz) -> DateRange {
    let (first, last) = if first <= last {
        (first, last)
    } else {
        (last, first)
    };
    DateRange {
        kind: None,
        start: start_of_day(tz, first),
        end: end_of_day(tz, last),
    }
}

/// Returns true if `day` lies within `range`, both ends inclusive.
///
/// The candidate is compared at local noon against day-aligned bounds, so a
/// boundary day is never pushed into the adjacent period by time-of-day skew.
#[must_use]
pub fn contains_day(range: &DateRange, day: NaiveDate) -> bool {
    let tz = range.timezone();
    let candidate = noon(tz, day);
    let start = start_of_day(tz, range.start_day());
    let end = end_of_day(tz, range.end_day());
    start <= candidate && candidate <= end
}

/// Returns true if the record date lies within `range`. Invalid dates never do.
#[must_use]
pub fn in_range(date: &RecordDate, range: &DateRange) -> bool {
    match date.local_day(range.timezone()) {
        Some(day) => contains_day(range, day),
        None => {
            tracing::trace!(date = %date, "skipping record with unparseable date");
            false
        }
    }
}
