//! Dashboard assembly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{DashboardSummary, MetricComparison, PeriodInfo};
use crate::aggregate::percent_change;
use crate::finance::FinanceState;
use crate::period::{PeriodKind, resolve_period, resolve_previous_period};

/// Service for building the dashboard summary.
pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard for the period of `kind` containing `now`.
    ///
    /// `now` is converted to the business timezone before periods are resolved.
    #[must_use]
    pub fn build(state: &FinanceState, kind: PeriodKind, now: DateTime<Utc>) -> DashboardSummary {
        let settings = state.settings();
        let local_now = settings.local_now(now);
        let current_range = resolve_period(kind, &local_now);
        let previous_range = resolve_previous_period(kind, &local_now);

        let aggregator = state.aggregator();
        let current = aggregator.period_totals(&current_range);
        let previous = aggregator.period_totals(&previous_range);

        tracing::debug!(
            period = %current_range.label(),
            income = %current.income,
            expense = %current.expense,
            "building dashboard"
        );

        DashboardSummary {
            period: PeriodInfo {
                kind,
                label: current_range.label(),
                start: current_range.start_day(),
                end: current_range.end_day(),
                previous_label: previous_range.label(),
            },
            currency: settings.currency.clone(),
            income: Self::compare(current.income, previous.income),
            expense: Self::compare(current.expense, previous.expense),
            profit: Self::compare(current.profit, previous.profit),
            balances: aggregator.cash_and_bank_balances(),
            pending_receivables: aggregator.pending_receivables(),
            estimated_tax: aggregator.estimated_tax(&current_range),
            trend: aggregator.trend_series(kind, &local_now).collect(),
            categories: aggregator.payment_mix_by_category(&current_range),
            generated_at: now,
        }
    }

    /// Pairs a current and previous value with their percent change.
    #[must_use]
    pub fn compare(current: Decimal, previous: Decimal) -> MetricComparison {
        MetricComparison {
            current,
            previous,
            change_percent: percent_change(current, previous),
        }
    }
}
