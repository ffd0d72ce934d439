//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook_shared::types::{Currency, Money};

use super::types::{BalanceSheetLine, BalanceSheetReport, ProfitAndLossReport};
use crate::aggregate::service::ratio_percent;
use crate::finance::FinanceState;
use crate::period::DateRange;

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a profit and loss report for `range`.
    #[must_use]
    pub fn profit_and_loss(state: &FinanceState, range: &DateRange) -> ProfitAndLossReport {
        let aggregator = state.aggregator();
        let totals = aggregator.period_totals(range);
        let estimated_tax = aggregator.estimated_tax(range);

        ProfitAndLossReport {
            report_type: "profit_and_loss".to_string(),
            currency: state.settings().currency.clone(),
            period: range.label(),
            start: range.start_day(),
            end: range.end_day(),
            income_by_client: aggregator.income_by_client(range),
            expenses_by_category: aggregator.category_breakdown(range),
            total_income: totals.income,
            total_expense: totals.expense,
            net_profit: totals.profit,
            profit_margin_percent: Self::margin_percent(totals.profit, totals.income),
            estimated_tax,
            profit_after_tax: totals.profit.saturating_sub(estimated_tax),
        }
    }

    /// Generates a balance sheet as of the end of `as_of`.
    ///
    /// The balance sheet verifies that cash plus bank equals opening cash plus
    /// retained earnings. Receivables count only invoices issued by `as_of`.
    #[must_use]
    pub fn balance_sheet(state: &FinanceState, as_of: NaiveDate) -> BalanceSheetReport {
        let aggregator = state.aggregator();
        let settings = state.settings();
        let currency = settings.currency.clone();

        let balances = aggregator.cash_and_bank_balances_as_of(as_of);
        let receivables = aggregator.pending_receivables_as_of(as_of);
        let retained_earnings = aggregator.totals_as_of(as_of).profit;

        let liquid_assets = balances.total();
        let equity = settings.opening_cash.saturating_add(retained_earnings);
        let unreconciled = equity.saturating_sub(liquid_assets);
        if !unreconciled.is_zero() {
            tracing::warn!(
                %as_of,
                %unreconciled,
                "balance sheet does not reconcile; some records use unrecognized payment methods"
            );
        }

        BalanceSheetReport {
            report_type: "balance_sheet".to_string(),
            as_of,
            assets: vec![
                Self::line("Cash in hand", balances.cash_in_hand, &currency),
                Self::line("Bank balance", balances.bank_balance, &currency),
                Self::line("Accounts receivable", receivables, &currency),
            ],
            total_assets: liquid_assets.saturating_add(receivables),
            liquid_assets,
            opening_cash: settings.opening_cash,
            retained_earnings,
            equity,
            unreconciled,
            is_balanced: unreconciled.is_zero(),
            currency,
        }
    }

    /// Profit as a percentage of income, rounded to 2 decimal places. Zero without income.
    fn margin_percent(profit: Decimal, income: Decimal) -> Decimal {
        if income.is_zero() {
            Decimal::ZERO
        } else {
            ratio_percent(profit, income)
        }
    }

    fn line(name: &str, amount: Decimal, currency: &Currency) -> BalanceSheetLine {
        BalanceSheetLine {
            name: name.to_string(),
            amount: Money::new(amount, currency.clone()),
        }
    }
}
