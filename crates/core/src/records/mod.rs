//! Finance records and business settings.
//!
//! Records are decoded leniently: bad amounts become zero, bad dates are kept but
//! never bucketed, and unknown payment methods fall out of the cash/bank split.

pub mod amount;
pub mod date;
pub mod lenient;
pub mod payment;
pub mod settings;
pub mod types;

pub use date::RecordDate;
pub use payment::{PaymentClass, PaymentMethod, classify};
pub use settings::Settings;
pub use types::{
    AccountKind, ExpenseRecord, IncomeRecord, InvoiceRecord, InvoiceStatus, Record,
    RecurringFrequency, TransferDirection, TransferRecord, UNCATEGORIZED,
};
