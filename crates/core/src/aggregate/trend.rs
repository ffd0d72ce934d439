//! Lazy trend series over consecutive periods.

use chrono::DateTime;
use chrono_tz::Tz;

use super::service::Aggregator;
use super::types::TrendPoint;
use crate::period::{PeriodKind, resolve_shifted};

/// Consecutive period buckets ending with the period containing `now`, oldest first.
///
/// Each bucket is computed when it is pulled. The series is a pure function of its
/// inputs: cloning it, or building it again, yields the same buckets. A window
/// reaching past the earliest representable date starts at that date instead.
#[derive(Debug, Clone)]
pub struct TrendSeries<'a> {
    aggregator: Aggregator<'a>,
    kind: PeriodKind,
    now: DateTime<Tz>,
    next: u32,
    len: u32,
}

impl<'a> TrendSeries<'a> {
    pub(crate) fn new(
        aggregator: Aggregator<'a>,
        kind: PeriodKind,
        now: DateTime<Tz>,
        window: usize,
    ) -> Self {
        Self {
            aggregator,
            kind,
            now,
            next: 0,
            len: u32::try_from(window)
                .unwrap_or(u32::MAX)
                .min(kind.max_steps_back(now.date_naive()).saturating_add(1)),
        }
    }

    /// Granularity of the buckets.
    #[must_use]
    pub fn kind(&self) -> PeriodKind {
        self.kind
    }
}

impl Iterator for TrendSeries<'_> {
    type Item = TrendPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let steps_back = self.len - 1 - self.next;
        self.next += 1;

        let range = resolve_shifted(self.kind, &self.now, steps_back)?;
        let totals = self.aggregator.period_totals(&range);
        Some(TrendPoint {
            label: range.label(),
            start: range.start_day(),
            end: range.end_day(),
            income: totals.income,
            expense: totals.expense,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrendSeries<'_> {}
