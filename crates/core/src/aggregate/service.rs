//! Financial aggregation over a finance snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::trend::TrendSeries;
use super::types::{
    CashBankBalances, CategoryPaymentMix, CategoryTotal, ClientIncome, PaymentMethodSplit,
    PeriodTotals, ReceivablesAging,
};
use crate::finance::FinanceState;
use crate::period::{DateRange, PeriodKind, in_range};
use crate::records::{
    InvoiceRecord, PaymentClass, RecordDate, RecurringFrequency, Settings, TransferDirection,
    amount,
};

/// Label for income without a client.
pub const WALK_IN_CLIENT: &str = "Walk-in";

/// Percentage change from `previous` to `current`, rounded to 2 decimal places.
///
/// A zero baseline yields 100 when `current` is positive and 0 otherwise.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    ratio_percent(current.saturating_sub(previous), previous)
}

/// `numerator / denominator * 100` rounded to 2 decimal places, saturating when the
/// quotient leaves the decimal range.
pub(crate) fn ratio_percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    let saturated = if numerator.is_sign_negative() == denominator.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    };
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(saturated, |percent| percent.round_dp(2))
}

/// Sorts grouped totals by amount (largest first), then by name.
fn sorted_by_amount<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (Decimal, &str)) -> Vec<T> {
    rows.sort_by(|a, b| {
        let (amount_a, name_a) = key(a);
        let (amount_b, name_b) = key(b);
        amount_b.cmp(&amount_a).then_with(|| name_a.cmp(name_b))
    });
    rows
}

/// Read-only derivations over a [`FinanceState`].
///
/// Every method recomputes from the snapshot; nothing is cached and nothing fails.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    state: &'a FinanceState,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator over a snapshot.
    #[must_use]
    pub fn new(state: &'a FinanceState) -> Self {
        Self { state }
    }

    fn settings(&self) -> &'a Settings {
        self.state.settings()
    }

    fn timezone(&self) -> Tz {
        self.settings().timezone
    }

    /// Returns true if the record date falls on or before `as_of` in the business timezone.
    fn on_or_before(&self, date: &RecordDate, as_of: NaiveDate) -> bool {
        date.local_day(self.timezone())
            .is_some_and(|day| day <= as_of)
    }

    /// Income, expense and profit for records dated within `range`.
    #[must_use]
    pub fn period_totals(&self, range: &DateRange) -> PeriodTotals {
        let income = amount::saturating_sum(
            self.state
                .incomes()
                .iter()
                .filter(|income| in_range(&income.date, range))
                .map(|income| income.amount),
        );
        let expense = amount::saturating_sum(
            self.state
                .expenses()
                .iter()
                .filter(|expense| in_range(&expense.date, range))
                .map(|expense| expense.amount),
        );
        PeriodTotals::new(income, expense)
    }

    /// Income, expense and profit over all records regardless of date.
    #[must_use]
    pub fn all_time_totals(&self) -> PeriodTotals {
        let income =
            amount::saturating_sum(self.state.incomes().iter().map(|income| income.amount));
        let expense =
            amount::saturating_sum(self.state.expenses().iter().map(|expense| expense.amount));
        PeriodTotals::new(income, expense)
    }

    /// Income, expense and profit from records dated on or before `as_of`.
    #[must_use]
    pub fn totals_as_of(&self, as_of: NaiveDate) -> PeriodTotals {
        let income = amount::saturating_sum(
            self.state
                .incomes()
                .iter()
                .filter(|income| self.on_or_before(&income.date, as_of))
                .map(|income| income.amount),
        );
        let expense = amount::saturating_sum(
            self.state
                .expenses()
                .iter()
                .filter(|expense| self.on_or_before(&expense.date, as_of))
                .map(|expense| expense.amount),
        );
        PeriodTotals::new(income, expense)
    }

    /// Current cash in hand and bank balance over all records.
    ///
    /// `cash_in_hand + bank_balance == opening_cash + income - expense` whenever every
    /// record carries a cash- or bank-equivalent payment method.
    #[must_use]
    pub fn cash_and_bank_balances(&self) -> CashBankBalances {
        self.balances_where(|_| true)
    }

    /// Cash in hand and bank balance from records dated on or before `as_of`.
    /// Records without a usable date are left out.
    #[must_use]
    pub fn cash_and_bank_balances_as_of(&self, as_of: NaiveDate) -> CashBankBalances {
        self.balances_where(|date| self.on_or_before(date, as_of))
    }

    fn balances_where(&self, include: impl Fn(&RecordDate) -> bool) -> CashBankBalances {
        let mut cash = self.settings().opening_cash;
        let mut bank = Decimal::ZERO;

        for income in self.state.incomes().iter().filter(|r| include(&r.date)) {
            match income.payment_method.class() {
                PaymentClass::Cash => cash = cash.saturating_add(income.amount),
                PaymentClass::Bank => bank = bank.saturating_add(income.amount),
                PaymentClass::Unclassified => {}
            }
        }
        for expense in self.state.expenses().iter().filter(|r| include(&r.date)) {
            match expense.payment_method.class() {
                PaymentClass::Cash => cash = cash.saturating_sub(expense.amount),
                PaymentClass::Bank => bank = bank.saturating_sub(expense.amount),
                PaymentClass::Unclassified => {}
            }
        }
        for transfer in self.state.transfers().iter().filter(|r| include(&r.date)) {
            match transfer.direction() {
                Some(TransferDirection::CashToBank) => {
                    cash = cash.saturating_sub(transfer.amount);
                    bank = bank.saturating_add(transfer.amount);
                }
                Some(TransferDirection::BankToCash) => {
                    cash = cash.saturating_add(transfer.amount);
                    bank = bank.saturating_sub(transfer.amount);
                }
                None => {}
            }
        }

        CashBankBalances {
            cash_in_hand: cash,
            bank_balance: bank,
        }
    }

    /// Sum of invoice totals not yet paid.
    #[must_use]
    pub fn pending_receivables(&self) -> Decimal {
        self.receivables_where(|_| true)
    }

    /// Sum of unpaid invoice totals issued on or before `as_of`.
    ///
    /// Invoices without a usable issue date are included.
    #[must_use]
    pub fn pending_receivables_as_of(&self, as_of: NaiveDate) -> Decimal {
        let tz = self.timezone();
        self.receivables_where(|invoice| {
            invoice
                .created_at
                .local_day(tz)
                .is_none_or(|issued| issued <= as_of)
        })
    }

    fn receivables_where(&self, include: impl Fn(&InvoiceRecord) -> bool) -> Decimal {
        amount::saturating_sum(
            self.state
                .invoices()
                .iter()
                .filter(|invoice| invoice.is_outstanding() && include(invoice))
                .map(|invoice| invoice.total),
        )
    }

    /// Estimated tax on the profit within `range`. Never negative, never on a loss.
    #[must_use]
    pub fn estimated_tax(&self, range: &DateRange) -> Decimal {
        let settings = self.settings();
        let profit = self.period_totals(range).profit;
        if settings.tax_enabled && profit > Decimal::ZERO {
            profit.saturating_mul(settings.effective_tax_rate()) / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// Trend buckets ending at `now`: 8 months, 8 quarters or 5 years.
    #[must_use]
    pub fn trend_series(&self, kind: PeriodKind, now: &DateTime<Tz>) -> TrendSeries<'a> {
        self.trend_series_with_window(kind, now, kind.default_trend_window())
    }

    /// Trend buckets ending at `now` with an explicit number of buckets.
    #[must_use]
    pub fn trend_series_with_window(
        &self,
        kind: PeriodKind,
        now: &DateTime<Tz>,
        window: usize,
    ) -> TrendSeries<'a> {
        TrendSeries::new(*self, kind, *now, window)
    }

    /// Expenses within `range` grouped by category, largest first.
    ///
    /// Blank categories are reported as `Other`.
    #[must_use]
    pub fn category_breakdown(&self, range: &DateRange) -> Vec<CategoryTotal> {
        self.payment_mix_by_category(range)
            .into_iter()
            .map(|mix| CategoryTotal {
                category: mix.category,
                amount: mix.amount,
            })
            .collect()
    }

    /// Expenses within `range` per category, split into card and cash spending.
    #[must_use]
    pub fn payment_mix_by_category(&self, range: &DateRange) -> Vec<CategoryPaymentMix> {
        let known = &self.settings().expense_categories;
        let mut groups: BTreeMap<String, (Decimal, Decimal, Decimal)> = BTreeMap::new();

        for expense in self
            .state
            .expenses()
            .iter()
            .filter(|expense| in_range(&expense.date, range))
        {
            let (total, card, cash) = groups.entry(expense.category_label(known)).or_default();
            *total = total.saturating_add(expense.amount);
            match expense.payment_method.class() {
                PaymentClass::Bank => *card = card.saturating_add(expense.amount),
                PaymentClass::Cash => *cash = cash.saturating_add(expense.amount),
                PaymentClass::Unclassified => {}
            }
        }

        let rows = groups
            .into_iter()
            .map(|(category, (amount, card_amount, cash_amount))| CategoryPaymentMix {
                category,
                amount,
                card_amount,
                cash_amount,
                icon: CategoryPaymentMix::icon_for(card_amount, cash_amount),
            })
            .collect();
        sorted_by_amount(rows, |row: &CategoryPaymentMix| {
            (row.amount, row.category.as_str())
        })
    }

    /// Income within `range` split by payment class.
    #[must_use]
    pub fn income_by_payment_method(&self, range: &DateRange) -> PaymentMethodSplit {
        let mut split = PaymentMethodSplit::default();
        for income in self
            .state
            .incomes()
            .iter()
            .filter(|income| in_range(&income.date, range))
        {
            match income.payment_method.class() {
                PaymentClass::Cash => split.cash = split.cash.saturating_add(income.amount),
                PaymentClass::Bank => split.bank = split.bank.saturating_add(income.amount),
                PaymentClass::Unclassified => {
                    split.unclassified = split.unclassified.saturating_add(income.amount);
                }
            }
        }
        split
    }

    /// Income within `range` grouped by client name, largest first.
    #[must_use]
    pub fn income_by_client(&self, range: &DateRange) -> Vec<ClientIncome> {
        let mut groups: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        for income in self
            .state
            .incomes()
            .iter()
            .filter(|income| in_range(&income.date, range))
        {
            let client = income
                .client_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(WALK_IN_CLIENT);
            let (amount, payments) = groups.entry(client.to_string()).or_default();
            *amount = amount.saturating_add(income.amount);
            *payments += 1;
        }

        let rows = groups
            .into_iter()
            .map(|(client, (amount, payments))| ClientIncome {
                client,
                amount,
                payments,
            })
            .collect();
        sorted_by_amount(rows, |row: &ClientIncome| (row.amount, row.client.as_str()))
    }

    /// Unpaid invoices bucketed by days past due on `as_of`.
    ///
    /// Invoices without a usable due date count as current.
    #[must_use]
    pub fn receivables_aging(&self, as_of: NaiveDate) -> ReceivablesAging {
        let tz = self.timezone();
        let mut aging = ReceivablesAging::default();
        for invoice in self
            .state
            .invoices()
            .iter()
            .filter(|invoice| invoice.is_outstanding())
        {
            let days_past_due = invoice
                .due_date
                .local_day(tz)
                .map_or(0, |due| (as_of - due).num_days());
            aging.record(days_past_due, invoice.total);
        }
        aging
    }

    /// Unpaid invoices due before `as_of`, oldest due date first.
    #[must_use]
    pub fn overdue_invoices(&self, as_of: NaiveDate) -> Vec<&'a InvoiceRecord> {
        let tz = self.timezone();
        let mut overdue: Vec<(NaiveDate, &'a InvoiceRecord)> = self
            .state
            .invoices()
            .iter()
            .filter(|invoice| invoice.is_outstanding())
            .filter_map(|invoice| {
                invoice
                    .due_date
                    .local_day(tz)
                    .filter(|due| *due < as_of)
                    .map(|due| (due, invoice))
            })
            .collect();
        overdue.sort_by(|(due_a, a), (due_b, b)| {
            due_a
                .cmp(due_b)
                .then_with(|| a.invoice_number.cmp(&b.invoice_number))
        });
        overdue.into_iter().map(|(_, invoice)| invoice).collect()
    }

    /// Monthly cost of recurring expenses active on `as_of`, rounded to 2 decimal places.
    ///
    /// An expense is active once its date has passed and until its end date. Expenses
    /// without a recognized frequency are treated as monthly.
    #[must_use]
    pub fn recurring_monthly_commitment(&self, as_of: NaiveDate) -> Decimal {
        let tz = self.timezone();
        self.state
            .expenses()
            .iter()
            .filter(|expense| expense.is_recurring)
            .filter(|expense| {
                expense
                    .date
                    .local_day(tz)
                    .is_none_or(|started| started <= as_of)
            })
            .filter(|expense| {
                expense
                    .recurring_end_date
                    .as_ref()
                    .and_then(|end| end.local_day(tz))
                    .is_none_or(|ends| ends >= as_of)
            })
            .map(|expense| {
                expense
                    .recurring_frequency
                    .unwrap_or(RecurringFrequency::Monthly)
                    .monthly_equivalent(expense.amount)
            })
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .round_dp(2)
    }
}
