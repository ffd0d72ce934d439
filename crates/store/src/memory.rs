//! In-memory source.

use async_trait::async_trait;
use tallybook_core::records::{
    ExpenseRecord, IncomeRecord, InvoiceRecord, Settings, TransferRecord,
};

use crate::error::StoreError;
use crate::source::FinanceSource;

/// A source serving fixed data.
///
/// Resources listed in `unavailable` fail with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    /// Income records.
    pub incomes: Vec<IncomeRecord>,
    /// Expense records.
    pub expenses: Vec<ExpenseRecord>,
    /// Invoices.
    pub invoices: Vec<InvoiceRecord>,
    /// Transfers.
    pub transfers: Vec<TransferRecord>,
    /// Settings.
    pub settings: Settings,
    /// Resource names that fail when fetched.
    pub unavailable: Vec<&'static str>,
}

impl InMemorySource {
    /// Marks a resource (`incomes`, `expenses`, `invoices`, `transfers`, `settings`) as failing.
    #[must_use]
    pub fn failing(mut self, resource: &'static str) -> Self {
        self.unavailable.push(resource);
        self
    }

    fn serve<T: Clone>(&self, resource: &str, value: &T) -> Result<T, StoreError> {
        if self.unavailable.contains(&resource) {
            Err(StoreError::Unavailable(resource.to_string()))
        } else {
            Ok(value.clone())
        }
    }
}

#[async_trait]
impl FinanceSource for InMemorySource {
    async fn incomes(&self) -> Result<Vec<IncomeRecord>, StoreError> {
        self.serve("incomes", &self.incomes)
    }

    async fn expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.serve("expenses", &self.expenses)
    }

    async fn invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        self.serve("invoices", &self.invoices)
    }

    async fn transfers(&self) -> Result<Vec<TransferRecord>, StoreError> {
        self.serve("transfers", &self.transfers)
    }

    async fn settings(&self) -> Result<Settings, StoreError> {
        self.serve("settings", &self.settings)
    }
}
