//! Tests for the dashboard summary.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::DashboardService;
use crate::aggregate::PaymentIcon;
use crate::finance::FinanceState;
use crate::period::PeriodKind;
use crate::records::{ExpenseRecord, IncomeRecord, InvoiceRecord, Settings};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_state() -> FinanceState {
    FinanceState::new(
        vec![
            IncomeRecord::new(dec!(1500), day(2026, 10, 5), "bank"),
            IncomeRecord::new(dec!(500), day(2026, 10, 12), "cash"),
            IncomeRecord::new(dec!(1000), day(2026, 9, 10), "cash"),
        ],
        vec![
            ExpenseRecord::new(dec!(400), day(2026, 10, 1), "Rent", "bank"),
            ExpenseRecord::new(dec!(100), day(2026, 10, 8), "Supplies", "cash"),
            ExpenseRecord::new(dec!(500), day(2026, 9, 1), "Rent", "bank"),
        ],
        vec![InvoiceRecord::new("INV-7", dec!(250), day(2026, 10, 1), day(2026, 10, 31))],
        vec![],
        Settings {
            tax_enabled: true,
            tax_rate: dec!(20),
            opening_cash: dec!(100),
            ..Settings::default()
        },
    )
}

#[test]
fn test_dashboard_compares_with_previous_month() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let summary = DashboardService::build(&sample_state(), PeriodKind::Month, now);

    assert_eq!(summary.period.label, "Oct 2026");
    assert_eq!(summary.period.previous_label, "Sep 2026");
    assert_eq!(summary.period.start, day(2026, 10, 1));
    assert_eq!(summary.period.end, day(2026, 10, 31));
    assert_eq!(summary.income.current, dec!(2000));
    assert_eq!(summary.income.previous, dec!(1000));
    assert_eq!(summary.income.change_percent, dec!(100));
    assert_eq!(summary.expense.change_percent, Decimal::ZERO);
    assert_eq!(summary.profit.current, dec!(1500));
    assert_eq!(summary.profit.change_percent, dec!(200));
    assert_eq!(summary.estimated_tax, dec!(300));
    assert_eq!(summary.pending_receivables, dec!(250));
    assert_eq!(summary.balances.cash_in_hand, dec!(1500));
    assert_eq!(summary.balances.bank_balance, dec!(600));
    assert_eq!(summary.generated_at, now);
}

#[test]
fn test_dashboard_trend_and_categories() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let summary = DashboardService::build(&sample_state(), PeriodKind::Month, now);

    assert_eq!(summary.trend.len(), 8);
    assert_eq!(summary.trend[7].label, "Oct 2026");
    assert_eq!(summary.trend[6].income, dec!(1000));
    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.categories[0].category, "Rent");
    assert_eq!(summary.categories[0].icon, PaymentIcon::Card);
    assert_eq!(summary.categories[1].icon, PaymentIcon::Cash);
}

#[test]
fn test_dashboard_uses_business_timezone() {
    let state = sample_state().with_settings(Settings {
        timezone: chrono_tz::Asia::Tokyo,
        ..Settings::default()
    });
    // 2026-09-30 20:00 UTC is already October 1st in Tokyo.
    let now = Utc.with_ymd_and_hms(2026, 9, 30, 20, 0, 0).unwrap();

    let summary = DashboardService::build(&state, PeriodKind::Quarter, now);

    assert_eq!(summary.period.label, "Q4 2026");
    assert_eq!(summary.period.previous_label, "Q3 2026");
    assert_eq!(summary.trend.len(), 8);
}

#[test]
fn test_empty_dashboard_is_all_zero() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let summary = DashboardService::build(&FinanceState::default(), PeriodKind::Year, now);

    assert_eq!(summary.income.change_percent, Decimal::ZERO);
    assert_eq!(summary.profit.current, Decimal::ZERO);
    assert_eq!(summary.balances.total(), Decimal::ZERO);
    assert_eq!(summary.trend.len(), 5);
    assert!(summary.trend.iter().all(|point| point.income.is_zero()));
    assert!(summary.categories.is_empty());
}

#[test]
fn test_summary_serializes_decimals_as_strings() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let summary = DashboardService::build(&sample_state(), PeriodKind::Month, now);

    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["currency"], "USD");
    assert_eq!(json["income"]["current"], "2000");
    assert_eq!(json["period"]["kind"], "month");
}
