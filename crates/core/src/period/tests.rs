//! Tests for period resolution.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Timelike};
use chrono_tz::{America::New_York, Asia::Kolkata, Tz, UTC};
use proptest::prelude::*;
use rstest::rstest;

use super::resolver::{
    contains_day, in_range, resolve_custom, resolve_period, resolve_previous_period,
    resolve_shifted,
};
use super::types::PeriodKind;
use crate::records::RecordDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(tz: Tz, y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
    tz.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[rstest]
#[case(PeriodKind::Month, day(2026, 2, 14), day(2026, 2, 1), day(2026, 2, 28))]
#[case(PeriodKind::Month, day(2024, 2, 14), day(2024, 2, 1), day(2024, 2, 29))]
#[case(PeriodKind::Month, day(2026, 12, 31), day(2026, 12, 1), day(2026, 12, 31))]
#[case(PeriodKind::Quarter, day(2026, 1, 1), day(2026, 1, 1), day(2026, 3, 31))]
#[case(PeriodKind::Quarter, day(2026, 5, 20), day(2026, 4, 1), day(2026, 6, 30))]
#[case(PeriodKind::Quarter, day(2026, 9, 30), day(2026, 7, 1), day(2026, 9, 30))]
#[case(PeriodKind::Quarter, day(2026, 10, 19), day(2026, 10, 1), day(2026, 12, 31))]
#[case(PeriodKind::Year, day(2026, 10, 19), day(2026, 1, 1), day(2026, 12, 31))]
fn test_resolve_period(
    #[case] kind: PeriodKind,
    #[case] now: NaiveDate,
    #[case] first: NaiveDate,
    #[case] last: NaiveDate,
) {
    let now = at(UTC, now.year(), now.month(), now.day(), 15);
    let range = resolve_period(kind, &now);
    assert_eq!(range.start_day(), first);
    assert_eq!(range.end_day(), last);
    assert_eq!(range.kind, Some(kind));
}

#[rstest]
#[case(PeriodKind::Month, day(2026, 1, 15), day(2025, 12, 1), day(2025, 12, 31))]
#[case(PeriodKind::Month, day(2026, 3, 31), day(2026, 2, 1), day(2026, 2, 28))]
#[case(PeriodKind::Quarter, day(2026, 1, 15), day(2025, 10, 1), day(2025, 12, 31))]
#[case(PeriodKind::Quarter, day(2026, 8, 2), day(2026, 4, 1), day(2026, 6, 30))]
#[case(PeriodKind::Year, day(2026, 1, 15), day(2025, 1, 1), day(2025, 12, 31))]
fn test_resolve_previous_period_rolls_over(
    #[case] kind: PeriodKind,
    #[case] now: NaiveDate,
    #[case] first: NaiveDate,
    #[case] last: NaiveDate,
) {
    let now = at(UTC, now.year(), now.month(), now.day(), 9);
    let range = resolve_previous_period(kind, &now);
    assert_eq!(range.start_day(), first);
    assert_eq!(range.end_day(), last);
}

#[test]
fn test_bounds_are_local_day_boundaries() {
    let now = at(Kolkata, 2026, 10, 19, 10);
    let range = resolve_period(PeriodKind::Month, &now);

    assert_eq!(range.start.timezone(), Kolkata);
    assert_eq!((range.start.hour(), range.start.minute()), (0, 0));
    assert_eq!(range.end.hour(), 23);
    assert_eq!(range.end.minute(), 59);
    assert_eq!(range.end.second(), 59);
    assert_eq!(range.end.timestamp_subsec_millis(), 999);
}

#[test]
fn test_resolution_is_deterministic() {
    let now = at(New_York, 2026, 3, 8, 12);
    for kind in [PeriodKind::Month, PeriodKind::Quarter, PeriodKind::Year] {
        assert_eq!(resolve_period(kind, &now), resolve_period(kind, &now));
        assert_eq!(
            resolve_previous_period(kind, &now),
            resolve_previous_period(kind, &now)
        );
    }
}

#[test]
fn test_unknown_period_falls_back_to_month() {
    assert_eq!(PeriodKind::parse_lenient("fortnight"), PeriodKind::Month);
    assert_eq!(PeriodKind::parse_lenient(""), PeriodKind::Month);
    assert_eq!(PeriodKind::parse_lenient(" Quarter "), PeriodKind::Quarter);
    assert_eq!(PeriodKind::from("year"), PeriodKind::Year);
}

#[test]
fn test_strict_period_parse() {
    assert_eq!(PeriodKind::parse(" Monthly"), Some(PeriodKind::Month));
    assert_eq!(PeriodKind::parse("annual"), Some(PeriodKind::Year));
    assert_eq!(PeriodKind::parse("fortnight"), None);
}

#[test]
fn test_boundary_days_are_included() {
    let now = at(UTC, 2026, 4, 10, 0);
    let range = resolve_period(PeriodKind::Month, &now);

    assert!(contains_day(&range, day(2026, 4, 1)));
    assert!(contains_day(&range, day(2026, 4, 30)));
    assert!(!contains_day(&range, day(2026, 3, 31)));
    assert!(!contains_day(&range, day(2026, 5, 1)));
}

#[test]
fn test_in_range_uses_range_timezone() {
    let now = at(Kolkata, 2026, 4, 10, 0);
    let range = resolve_period(PeriodKind::Month, &now);

    // 20:30 UTC on March 31 is already April 1 in Kolkata.
    assert!(in_range(&RecordDate::parse("2026-03-31T20:30:00Z"), &range));
    // 18:00 UTC on April 30 is 23:30 April 30 in Kolkata.
    assert!(in_range(&RecordDate::parse("2026-04-30T18:00:00Z"), &range));
    // 19:00 UTC on April 30 is May 1 in Kolkata.
    assert!(!in_range(&RecordDate::parse("2026-04-30T19:00:00Z"), &range));
}

#[test]
fn test_in_range_skips_invalid_dates() {
    let range = resolve_period(PeriodKind::Year, &at(UTC, 2026, 6, 1, 0));
    assert!(!in_range(&RecordDate::parse("not a date"), &range));
    assert!(!in_range(&RecordDate::default(), &range));
}

#[test]
fn test_custom_range_swaps_reversed_bounds() {
    let range = resolve_custom(day(2026, 3, 10), day(2026, 3, 1), UTC);
    assert_eq!(range.start_day(), day(2026, 3, 1));
    assert_eq!(range.end_day(), day(2026, 3, 10));
    assert_eq!(range.kind, None);
    assert_eq!(range.label(), "2026-03-01..2026-03-10");
}

#[rstest]
#[case(PeriodKind::Month, "Oct 2026")]
#[case(PeriodKind::Quarter, "Q4 2026")]
#[case(PeriodKind::Year, "2026")]
fn test_labels(#[case] kind: PeriodKind, #[case] expected: &str) {
    let range = resolve_period(kind, &at(UTC, 2026, 10, 19, 0));
    assert_eq!(range.label(), expected);
}

#[test]
fn test_dst_day_bounds_resolve() {
    // Clocks spring forward on 2026-03-08 in New York.
    let range = resolve_custom(day(2026, 3, 8), day(2026, 3, 8), New_York);
    assert!(contains_day(&range, day(2026, 3, 8)));
    assert_eq!(range.end - range.start, TimeDelta::hours(23) - TimeDelta::milliseconds(1));
}

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| day(y, m, d))
}

#[rstest]
#[case(PeriodKind::Month)]
#[case(PeriodKind::Quarter)]
#[case(PeriodKind::Year)]
fn test_shift_back_stops_at_earliest_date(#[case] kind: PeriodKind) {
    let today = day(2026, 10, 19);
    let max = kind.max_steps_back(today);

    assert_eq!(kind.shift_back(today, max), Some(NaiveDate::MIN));
    assert_eq!(kind.shift_back(today, max + 1), None);
    assert_eq!(kind.shift_back(today, u32::MAX), None);
}

#[test]
fn test_resolve_shifted_out_of_range_is_none() {
    let now = at(UTC, 2026, 10, 19, 12);
    assert!(resolve_shifted(PeriodKind::Year, &now, 1_000_000).is_none());
    assert_eq!(
        resolve_shifted(PeriodKind::Year, &now, 1).unwrap().start_day(),
        day(2025, 1, 1)
    );
}

#[test]
fn test_previous_of_earliest_period_is_itself() {
    let now = UTC.from_utc_datetime(&NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap());
    let previous = resolve_previous_period(PeriodKind::Month, &now);
    assert_eq!(previous.start_day(), NaiveDate::MIN);
}

fn kind_strategy() -> impl Strategy<Value = PeriodKind> {
    prop_oneof![
        Just(PeriodKind::Month),
        Just(PeriodKind::Quarter),
        Just(PeriodKind::Year),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The current period always contains its reference day and the previous one never does.
    #[test]
    fn prop_reference_day_in_current_period_only(
        kind in kind_strategy(),
        reference in day_strategy(),
        hour in 0u32..24,
    ) {
        let now = at(Kolkata, reference.year(), reference.month(), reference.day(), hour);
        let current = resolve_period(kind, &now);
        let previous = resolve_previous_period(kind, &now);

        prop_assert!(contains_day(&current, reference));
        prop_assert!(!contains_day(&previous, reference));
    }

    /// Consecutive periods are contiguous: the previous period ends one millisecond
    /// before the current one starts.
    #[test]
    fn prop_periods_are_contiguous(
        kind in kind_strategy(),
        reference in day_strategy(),
        steps in 0u32..24,
    ) {
        let now = at(UTC, reference.year(), reference.month(), reference.day(), 12);
        let newer = resolve_shifted(kind, &now, steps).unwrap();
        let older = resolve_shifted(kind, &now, steps + 1).unwrap();

        prop_assert_eq!(older.end + TimeDelta::milliseconds(1), newer.start);
    }

    /// Any day is in exactly one of two consecutive periods or in neither, never both.
    #[test]
    fn prop_consecutive_periods_do_not_overlap(
        kind in kind_strategy(),
        reference in day_strategy(),
        candidate in day_strategy(),
    ) {
        let now = at(UTC, reference.year(), reference.month(), reference.day(), 12);
        let current = resolve_period(kind, &now);
        let previous = resolve_previous_period(kind, &now);

        prop_assert!(!(contains_day(&current, candidate) && contains_day(&previous, candidate)));
    }
}
