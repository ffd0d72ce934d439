//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{Currency, Money};

use crate::aggregate::{CategoryTotal, ClientIncome};

/// Profit and loss report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Report type identifier.
    pub report_type: String,
    /// Currency.
    pub currency: Currency,
    /// Period label.
    pub period: String,
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
    /// Income grouped by client, largest first.
    pub income_by_client: Vec<ClientIncome>,
    /// Expenses grouped by category, largest first.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Total income.
    pub total_income: Decimal,
    /// Total expense.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub net_profit: Decimal,
    /// Net profit as a percentage of income.
    pub profit_margin_percent: Decimal,
    /// Tax estimated on the net profit.
    pub estimated_tax: Decimal,
    /// Net profit less the estimated tax.
    pub profit_after_tax: Decimal,
}

/// One named amount on the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    /// Line name.
    pub name: String,
    /// Amount.
    pub amount: Money,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report type identifier.
    pub report_type: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Currency.
    pub currency: Currency,
    /// Cash, bank and receivables.
    pub assets: Vec<BalanceSheetLine>,
    /// Total assets.
    pub total_assets: Decimal,
    /// Cash in hand plus bank balance.
    pub liquid_assets: Decimal,
    /// Opening cash.
    pub opening_cash: Decimal,
    /// Income minus expense up to the as of date.
    pub retained_earnings: Decimal,
    /// Opening cash plus retained earnings.
    pub equity: Decimal,
    /// Equity not found in cash or bank, from unrecognized payment methods.
    pub unreconciled: Decimal,
    /// Whether liquid assets equal equity.
    pub is_balanced: bool,
}
