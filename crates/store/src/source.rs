//! Finance data source abstraction.

use async_trait::async_trait;
use tallybook_core::records::{
    ExpenseRecord, IncomeRecord, InvoiceRecord, Settings, TransferRecord,
};

use crate::error::StoreError;

/// A provider of the four record lists and the business settings.
///
/// Each resource is fetched independently so one failure never hides the others.
#[async_trait]
pub trait FinanceSource: Send + Sync {
    /// Fetches income records.
    async fn incomes(&self) -> Result<Vec<IncomeRecord>, StoreError>;

    /// Fetches expense records.
    async fn expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Fetches invoices.
    async fn invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError>;

    /// Fetches cash/bank transfers.
    async fn transfers(&self) -> Result<Vec<TransferRecord>, StoreError>;

    /// Fetches business settings.
    async fn settings(&self) -> Result<Settings, StoreError>;
}
