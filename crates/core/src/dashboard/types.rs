//! Dashboard data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::Currency;

use crate::aggregate::{CashBankBalances, CategoryPaymentMix, TrendPoint};
use crate::period::PeriodKind;

/// Dashboard summary for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Selected period.
    pub period: PeriodInfo,
    /// Reporting currency.
    pub currency: Currency,
    /// Income against the previous period.
    pub income: MetricComparison,
    /// Expense against the previous period.
    pub expense: MetricComparison,
    /// Profit against the previous period.
    pub profit: MetricComparison,
    /// Current cash in hand and bank balance.
    pub balances: CashBankBalances,
    /// Unpaid invoice total.
    pub pending_receivables: Decimal,
    /// Tax estimated on this period's profit.
    pub estimated_tax: Decimal,
    /// Trend buckets ending with the selected period.
    pub trend: Vec<TrendPoint>,
    /// Expense categories with their payment mix.
    pub categories: Vec<CategoryPaymentMix>,
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
}

/// Period information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Granularity.
    pub kind: PeriodKind,
    /// Display label (e.g. "Q4 2026").
    pub label: String,
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
    /// Label of the period compared against.
    pub previous_label: String,
}

/// A metric for the current period next to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Current period value.
    pub current: Decimal,
    /// Previous period value.
    pub previous: Decimal,
    /// Change in percent, rounded to 2 decimal places.
    pub change_percent: Decimal,
}
