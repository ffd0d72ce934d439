//! Aggregation result types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::amount;

/// Income, expense and profit over a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total income.
    pub income: Decimal,
    /// Total expense.
    pub expense: Decimal,
    /// Income minus expense.
    pub profit: Decimal,
}

impl PeriodTotals {
    /// Builds totals from income and expense.
    #[must_use]
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            profit: income.saturating_sub(expense),
        }
    }
}

/// Cash in hand and bank balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashBankBalances {
    /// Cash in hand, including the opening balance.
    pub cash_in_hand: Decimal,
    /// Bank balance.
    pub bank_balance: Decimal,
}

impl CashBankBalances {
    /// Cash plus bank.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cash_in_hand.saturating_add(self.bank_balance)
    }
}

/// One bucket of a trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Bucket label (e.g. "Oct 2026").
    pub label: String,
    /// First day of the bucket.
    pub start: NaiveDate,
    /// Last day of the bucket.
    pub end: NaiveDate,
    /// Income in the bucket.
    pub income: Decimal,
    /// Expense in the bucket.
    pub expense: Decimal,
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category label.
    pub category: String,
    /// Total spent.
    pub amount: Decimal,
}

/// Icon shown for a category's dominant payment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentIcon {
    /// Card/bank payments dominate (or tie).
    Card,
    /// Cash payments dominate.
    Cash,
}

/// Expense split by payment type for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPaymentMix {
    /// Category label.
    pub category: String,
    /// Total spent, including unclassified payments.
    pub amount: Decimal,
    /// Bank-equivalent spending.
    pub card_amount: Decimal,
    /// Cash-equivalent spending.
    pub cash_amount: Decimal,
    /// Display icon.
    pub icon: PaymentIcon,
}

impl CategoryPaymentMix {
    /// Picks the icon: card when `card_amount >= cash_amount`, otherwise cash.
    #[must_use]
    pub fn icon_for(card_amount: Decimal, cash_amount: Decimal) -> PaymentIcon {
        if card_amount >= cash_amount {
            PaymentIcon::Card
        } else {
            PaymentIcon::Cash
        }
    }
}

/// Income split by payment class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodSplit {
    /// Cash-equivalent income.
    pub cash: Decimal,
    /// Bank-equivalent income.
    pub bank: Decimal,
    /// Income with an unrecognized method.
    pub unclassified: Decimal,
}

/// Income received from one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIncome {
    /// Client name.
    pub client: String,
    /// Total received.
    pub amount: Decimal,
    /// Number of payments.
    pub payments: usize,
}

/// Unpaid invoices within one days-past-due band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Outstanding amount.
    pub amount: Decimal,
    /// Number of invoices.
    pub count: usize,
}

impl AgingBucket {
    fn add(&mut self, amount: Decimal) {
        self.amount = self.amount.saturating_add(amount);
        self.count += 1;
    }
}

/// Accounts-receivable aging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablesAging {
    /// Not yet due, or without a usable due date.
    pub current: AgingBucket,
    /// 1 to 30 days past due.
    pub days_1_30: AgingBucket,
    /// 31 to 60 days past due.
    pub days_31_60: AgingBucket,
    /// 61 to 90 days past due.
    pub days_61_90: AgingBucket,
    /// More than 90 days past due.
    pub days_over_90: AgingBucket,
}

impl ReceivablesAging {
    /// Adds an invoice `days_past_due` days overdue (zero or negative means not due).
    pub fn record(&mut self, days_past_due: i64, amount: Decimal) {
        let bucket = match days_past_due {
            i64::MIN..=0 => &mut self.current,
            1..=30 => &mut self.days_1_30,
            31..=60 => &mut self.days_31_60,
            61..=90 => &mut self.days_61_90,
            _ => &mut self.days_over_90,
        };
        bucket.add(amount);
    }

    /// Total outstanding across all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        amount::saturating_sum(self.buckets().iter().map(|bucket| bucket.amount))
    }

    /// Total outstanding and past due.
    #[must_use]
    pub fn overdue(&self) -> Decimal {
        amount::saturating_sum(self.buckets()[1..].iter().map(|bucket| bucket.amount))
    }

    fn buckets(&self) -> [AgingBucket; 5] {
        [
            self.current,
            self.days_1_30,
            self.days_31_60,
            self.days_61_90,
            self.days_over_90,
        ]
    }
}
