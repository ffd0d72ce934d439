//! Period types.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Calendar granularity of a reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Calendar month.
    #[default]
    Month,
    /// Calendar quarter (Jan-Mar, Apr-Jun, Jul-Sep, Oct-Dec).
    Quarter,
    /// Calendar year.
    Year,
}

impl PeriodKind {
    /// Parses a period selector, `None` when unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "month" | "monthly" => Some(Self::Month),
            "quarter" | "quarterly" => Some(Self::Quarter),
            "year" | "yearly" | "annual" => Some(Self::Year),
            _ => None,
        }
    }

    /// Parses a period selector. Unknown values fall back to `Month`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// Number of months in one period.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
        }
    }

    /// Default number of buckets in a trend series.
    #[must_use]
    pub const fn default_trend_window(self) -> usize {
        match self {
            Self::Month | Self::Quarter => 8,
            Self::Year => 5,
        }
    }

    /// First day of the period containing `day`.
    #[must_use]
    pub fn first_day(self, day: NaiveDate) -> NaiveDate {
        let first_of_month = day - Days::new(u64::from(day.day0()));
        let months_into_period = match self {
            Self::Month => 0,
            Self::Quarter => day.month0() % 3,
            Self::Year => day.month0(),
        };
        first_of_month - Months::new(months_into_period)
    }

    /// Last day of the period containing `day`.
    #[must_use]
    pub fn last_day(self, day: NaiveDate) -> NaiveDate {
        self.first_day(day) + Months::new(self.months()) - Days::new(1)
    }

    /// First day of the period `steps` periods before the one containing `day`.
    ///
    /// `None` when that period starts before the earliest representable date.
    #[must_use]
    pub fn shift_back(self, day: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let months = self.months().checked_mul(steps)?;
        self.first_day(day).checked_sub_months(Months::new(months))
    }

    /// Largest `steps` accepted by [`shift_back`](Self::shift_back) for `day`.
    #[must_use]
    pub fn max_steps_back(self, day: NaiveDate) -> u32 {
        let month_index = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
        let span = month_index(self.first_day(day)) - month_index(NaiveDate::MIN);
        u32::try_from(span / i64::from(self.months())).unwrap_or(u32::MAX)
    }
}

impl From<&str> for PeriodKind {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// An inclusive instant range aligned to local day boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Granularity, `None` for custom ranges.
    pub kind: Option<PeriodKind>,
    /// First instant (00:00:00.000 local).
    pub start: DateTime<Tz>,
    /// Last instant (23:59:59.999 local).
    pub end: DateTime<Tz>,
}

impl DateRange {
    /// Timezone the range is expressed in.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// First calendar day of the range.
    #[must_use]
    pub fn start_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar day of the range.
    #[must_use]
    pub fn end_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Display label: `Oct 2026`, `Q4 2026`, `2026`, or `2026-01-01..2026-02-15`.
    #[must_use]
    pub fn label(&self) -> String {
        let start = self.start_day();
        match self.kind {
            Some(PeriodKind::Month) => start.format("%b %Y").to_string(),
            Some(PeriodKind::Quarter) => format!("Q{} {}", start.month0() / 3 + 1, start.year()),
            Some(PeriodKind::Year) => start.year().to_string(),
            None => format!("{}..{}", start, self.end_day()),
        }
    }
}
