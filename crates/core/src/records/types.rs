//! Finance record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tallybook_shared::types::{ClientId, ExpenseId, IncomeId, InvoiceId, TransferId};

use super::amount;
use super::lenient;
use super::date::RecordDate;
use super::payment::PaymentMethod;

/// Label used when an expense has no category.
pub const UNCATEGORIZED: &str = "Other";

/// Common behaviour of every stored record.
pub trait Record: Clone {
    /// Typed id of the record.
    type Id: Clone + PartialEq + std::fmt::Display;

    /// Record kind used in messages (e.g. "income").
    const KIND: &'static str;

    /// Returns the record id.
    fn id(&self) -> &Self::Id;

    /// Replaces the record id.
    fn set_id(&mut self, id: Self::Id);

    /// Returns true if the record has no id yet.
    fn has_id(&self) -> bool;

    /// Generates a fresh local id.
    fn fresh_id() -> Self::Id;
}

macro_rules! impl_record {
    ($record:ty, $id:ty, $kind:expr) => {
        impl Record for $record {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }

            fn has_id(&self) -> bool {
                !self.id.is_unassigned()
            }

            fn fresh_id() -> Self::Id {
                <$id>::new()
            }
        }
    };
}

/// A payment received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    /// Record id.
    #[serde(default, alias = "_id", deserialize_with = "lenient::id")]
    pub id: IncomeId,
    /// Amount received, never negative.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    /// When it was received.
    #[serde(default)]
    pub date: RecordDate,
    /// How it was received.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Paying client, if known.
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<ClientId>,
    /// Paying client name, if known.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_name: Option<String>,
    /// Service the payment was for.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<String>,
}

impl IncomeRecord {
    /// Creates an income record without an id.
    #[must_use]
    pub fn new(
        amount: Decimal,
        date: impl Into<RecordDate>,
        payment_method: impl Into<PaymentMethod>,
    ) -> Self {
        Self {
            id: IncomeId::default(),
            amount: amount::sanitize(amount),
            date: date.into(),
            payment_method: payment_method.into(),
            client_id: None,
            client_name: None,
            service_type: None,
        }
    }

    /// Sets the paying client.
    #[must_use]
    pub fn with_client(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }
}

impl_record!(IncomeRecord, IncomeId, "income");

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every year.
    #[serde(alias = "annually", alias = "annual")]
    Yearly,
}

impl RecurringFrequency {
    /// Parses a frequency, `None` when unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" | "annually" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Converts one occurrence into its monthly equivalent.
    #[must_use]
    pub fn monthly_equivalent(self, amount: Decimal) -> Decimal {
        match self {
            Self::Daily => amount.saturating_mul(Decimal::from(365)) / Decimal::from(12),
            Self::Weekly => amount.saturating_mul(Decimal::from(52)) / Decimal::from(12),
            Self::Monthly => amount,
            Self::Quarterly => amount / Decimal::from(3),
            Self::Yearly => amount / Decimal::from(12),
        }
    }
}

fn lenient_frequency<'de, D>(deserializer: D) -> Result<Option<RecurringFrequency>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::keyword(deserializer)?
        .as_deref()
        .and_then(RecurringFrequency::parse))
}

/// A payment made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Record id.
    #[serde(default, alias = "_id", deserialize_with = "lenient::id")]
    pub id: ExpenseId,
    /// Amount spent, never negative.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    /// When it was spent.
    #[serde(default)]
    pub date: RecordDate,
    /// Free-text category.
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    /// How it was paid.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Whether the expense repeats.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_recurring: bool,
    /// Repeat interval for recurring expenses.
    #[serde(
        default,
        deserialize_with = "lenient_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_frequency: Option<RecurringFrequency>,
    /// Last day a recurring expense applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_date: Option<RecordDate>,
}

impl ExpenseRecord {
    /// Creates a one-off expense record without an id.
    #[must_use]
    pub fn new(
        amount: Decimal,
        date: impl Into<RecordDate>,
        category: impl Into<String>,
        payment_method: impl Into<PaymentMethod>,
    ) -> Self {
        Self {
            id: ExpenseId::default(),
            amount: amount::sanitize(amount),
            date: date.into(),
            category: Some(category.into()),
            payment_method: payment_method.into(),
            is_recurring: false,
            recurring_frequency: None,
            recurring_end_date: None,
        }
    }

    /// Marks the expense as recurring.
    #[must_use]
    pub fn recurring(
        mut self,
        frequency: RecurringFrequency,
        end_date: Option<RecordDate>,
    ) -> Self {
        self.is_recurring = true;
        self.recurring_frequency = Some(frequency);
        self.recurring_end_date = end_date;
        self
    }

    /// Resolves the display category against the configured list.
    ///
    /// Blank categories become [`UNCATEGORIZED`]; known categories are matched
    /// case-insensitively and take the configured spelling.
    #[must_use]
    pub fn category_label(&self, known: &[String]) -> String {
        let raw = self.category.as_deref().map_or("", str::trim);
        if raw.is_empty() {
            return UNCATEGORIZED.to_string();
        }
        known
            .iter()
            .find(|candidate| candidate.trim().eq_ignore_ascii_case(raw))
            .map_or_else(|| raw.to_string(), |candidate| candidate.trim().to_string())
    }
}

impl_record!(ExpenseRecord, ExpenseId, "expense");

/// Invoice payment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    #[default]
    Unpaid,
    /// Settled.
    Paid,
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient::keyword(deserializer)?.as_deref() {
            Some("paid") => Self::Paid,
            _ => Self::Unpaid,
        })
    }
}

/// An invoice issued to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    /// Record id.
    #[serde(default, alias = "_id", deserialize_with = "lenient::id")]
    pub id: InvoiceId,
    /// Human-facing invoice number.
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_number: String,
    /// Invoice total, never negative.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total: Decimal,
    /// Payment status.
    #[serde(default)]
    pub status: InvoiceStatus,
    /// Payment due date.
    #[serde(default)]
    pub due_date: RecordDate,
    /// Issue date.
    #[serde(default)]
    pub created_at: RecordDate,
    /// Billed client name.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_name: Option<String>,
}

impl InvoiceRecord {
    /// Creates an unpaid invoice without an id.
    #[must_use]
    pub fn new(
        invoice_number: impl Into<String>,
        total: Decimal,
        created_at: impl Into<RecordDate>,
        due_date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: InvoiceId::default(),
            invoice_number: invoice_number.into(),
            total: amount::sanitize(total),
            status: InvoiceStatus::Unpaid,
            due_date: due_date.into(),
            created_at: created_at.into(),
            client_name: None,
        }
    }

    /// Returns a copy marked as paid.
    #[must_use]
    pub fn paid(mut self) -> Self {
        self.status = InvoiceStatus::Paid;
        self
    }

    /// Returns true while the invoice counts towards receivables.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.status != InvoiceStatus::Paid
    }
}

impl_record!(InvoiceRecord, InvoiceId, "invoice");

/// Money account a transfer moves between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Cash in hand.
    Cash,
    /// Bank account.
    Bank,
    /// Unrecognized account; transfers touching it are ignored.
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for AccountKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient::keyword(deserializer)?.as_deref() {
            Some("cash") => Self::Cash,
            Some("bank") => Self::Bank,
            _ => Self::Unknown,
        })
    }
}

/// Direction of money moved by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferDirection {
    /// Cash deposited into the bank.
    CashToBank,
    /// Cash withdrawn from the bank.
    BankToCash,
}

/// Money moved between cash and bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Record id.
    #[serde(default, alias = "_id", deserialize_with = "lenient::id")]
    pub id: TransferId,
    /// Source account.
    #[serde(default)]
    pub from_account: AccountKind,
    /// Destination account.
    #[serde(default)]
    pub to_account: AccountKind,
    /// Amount moved.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    /// When it moved.
    #[serde(default)]
    pub date: RecordDate,
    /// Free-text note.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

impl TransferRecord {
    /// Creates a transfer without an id.
    #[must_use]
    pub fn new(
        from_account: AccountKind,
        to_account: AccountKind,
        amount: Decimal,
        date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: TransferId::default(),
            from_account,
            to_account,
            amount: amount::sanitize(amount),
            date: date.into(),
            note: None,
        }
    }

    /// Returns the direction, `None` for same-account or unknown-account transfers.
    #[must_use]
    pub fn direction(&self) -> Option<TransferDirection> {
        match (self.from_account, self.to_account) {
            (AccountKind::Cash, AccountKind::Bank) => Some(TransferDirection::CashToBank),
            (AccountKind::Bank, AccountKind::Cash) => Some(TransferDirection::BankToCash),
            _ => None,
        }
    }
}

impl_record!(TransferRecord, TransferId, "transfer");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::payment::PaymentClass;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn categories() -> Vec<String> {
        vec!["Rent".to_string(), "Utilities".to_string()]
    }

    #[test]
    fn test_income_decodes_leniently() {
        let income: IncomeRecord = serde_json::from_str(
            r#"{"_id":"abc","amount":"oops","date":"2026-01-02","paymentMethod":" Card "}"#,
        )
        .unwrap();
        assert_eq!(income.id.as_str(), "abc");
        assert_eq!(income.amount, Decimal::ZERO);
        assert_eq!(income.payment_method.class(), PaymentClass::Bank);
    }

    #[test]
    fn test_income_missing_fields_default() {
        let income: IncomeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(income.amount, Decimal::ZERO);
        assert!(!income.date.is_valid());
        assert_eq!(income.payment_method, PaymentMethod::Unspecified);
        assert!(!income.has_id());
    }

    #[test]
    fn test_constructor_clamps_negative_amounts() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(IncomeRecord::new(dec!(-10), day, "cash").amount, dec!(0));
    }

    #[test]
    fn test_category_label() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut expense = ExpenseRecord::new(dec!(10), day, " rent ", "cash");
        assert_eq!(expense.category_label(&categories()), "Rent");

        expense.category = Some("Coffee".to_string());
        assert_eq!(expense.category_label(&categories()), "Coffee");

        expense.category = Some("   ".to_string());
        assert_eq!(expense.category_label(&categories()), UNCATEGORIZED);

        expense.category = None;
        assert_eq!(expense.category_label(&categories()), UNCATEGORIZED);
    }

    #[test]
    fn test_expense_recurring_fields_decode() {
        let expense: ExpenseRecord = serde_json::from_str(
            r#"{"amount":120,"category":null,"isRecurring":true,"recurringFrequency":"Annually","recurringEndDate":"2027-01-01"}"#,
        )
        .unwrap();
        assert!(expense.is_recurring);
        assert_eq!(expense.recurring_frequency, Some(RecurringFrequency::Yearly));
        assert!(expense.recurring_end_date.is_some());
        assert_eq!(expense.category, None);
    }

    #[test]
    fn test_malformed_text_fields_do_not_fail_the_record() {
        let expense: ExpenseRecord = serde_json::from_str(
            r#"{"_id":17,"amount":40,"category":{"name":"Rent"},"isRecurring":null}"#,
        )
        .unwrap();
        assert_eq!(expense.id.as_str(), "17");
        assert_eq!(expense.amount, dec!(40));
        assert_eq!(expense.category, None);
        assert!(!expense.is_recurring);

        let invoice: InvoiceRecord = serde_json::from_str(
            r#"{"invoiceNumber":1042,"total":"99.5","clientName":false,"status":"paid"}"#,
        )
        .unwrap();
        assert_eq!(invoice.invoice_number, "1042");
        assert_eq!(invoice.total, dec!(99.5));
        assert_eq!(invoice.client_name, None);
        assert!(!invoice.is_outstanding());

        let income: IncomeRecord = serde_json::from_str(
            r#"{"amount":10,"clientId":null,"clientName":["x"],"serviceType":7}"#,
        )
        .unwrap();
        assert_eq!(income.client_id, None);
        assert_eq!(income.client_name, None);
        assert_eq!(income.service_type.as_deref(), Some("7"));

        let transfer: TransferRecord =
            serde_json::from_str(r#"{"fromAccount":"cash","toAccount":"bank","note":12}"#).unwrap();
        assert_eq!(transfer.note.as_deref(), Some("12"));
    }

    #[test]
    fn test_recurring_flag_accepts_strings() {
        let expense: ExpenseRecord =
            serde_json::from_str(r#"{"amount":5,"isRecurring":"yes","recurringFrequency":"monthly"}"#)
                .unwrap();
        assert!(expense.is_recurring);
    }

    #[test]
    fn test_unknown_frequency_decodes_as_none() {
        let expense: ExpenseRecord =
            serde_json::from_str(r#"{"amount":5,"recurringFrequency":"fortnightly"}"#).unwrap();
        assert_eq!(expense.recurring_frequency, None);
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(RecurringFrequency::Weekly.monthly_equivalent(dec!(120)), dec!(520));
        assert_eq!(RecurringFrequency::Quarterly.monthly_equivalent(dec!(300)), dec!(100));
        assert_eq!(RecurringFrequency::Yearly.monthly_equivalent(dec!(1200)), dec!(100));
    }

    #[test]
    fn test_monthly_equivalent_saturates() {
        let daily = RecurringFrequency::Daily.monthly_equivalent(Decimal::MAX);
        assert_eq!(daily, Decimal::MAX / Decimal::from(12));
    }

    #[test]
    fn test_invoice_status_decodes_leniently() {
        let statuses: Vec<InvoiceStatus> =
            serde_json::from_str(r#"["paid"," PAID ","unpaid","overdue",null]"#).unwrap();
        assert_eq!(
            statuses,
            vec![
                InvoiceStatus::Paid,
                InvoiceStatus::Paid,
                InvoiceStatus::Unpaid,
                InvoiceStatus::Unpaid,
                InvoiceStatus::Unpaid,
            ]
        );
    }

    #[test]
    fn test_transfer_direction() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let deposit = TransferRecord::new(AccountKind::Cash, AccountKind::Bank, dec!(5), day);
        let withdrawal = TransferRecord::new(AccountKind::Bank, AccountKind::Cash, dec!(5), day);
        let noop = TransferRecord::new(AccountKind::Cash, AccountKind::Cash, dec!(5), day);
        assert_eq!(deposit.direction(), Some(TransferDirection::CashToBank));
        assert_eq!(withdrawal.direction(), Some(TransferDirection::BankToCash));
        assert_eq!(noop.direction(), None);
    }

    #[test]
    fn test_transfer_unknown_account() {
        let transfer: TransferRecord =
            serde_json::from_str(r#"{"fromAccount":"wallet","toAccount":"Bank","amount":10}"#)
                .unwrap();
        assert_eq!(transfer.from_account, AccountKind::Unknown);
        assert_eq!(transfer.to_account, AccountKind::Bank);
        assert_eq!(transfer.direction(), None);
    }
}
