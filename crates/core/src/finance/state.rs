//! Immutable finance state snapshots.
//!
//! A [`FinanceState`] holds the four record collections and the business settings.
//! Mutations never touch an existing snapshot; they return a new one that shares
//! the untouched collections. Readers therefore always see a whole snapshot.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::FinanceError;
use crate::aggregate::Aggregator;
use crate::records::{
    ExpenseRecord, IncomeRecord, InvoiceRecord, Record, Settings, TransferRecord,
};

/// A snapshot of all finance data held by the client.
#[derive(Debug, Clone, Default)]
pub struct FinanceState {
    incomes: Arc<Vec<IncomeRecord>>,
    expenses: Arc<Vec<ExpenseRecord>>,
    invoices: Arc<Vec<InvoiceRecord>>,
    transfers: Arc<Vec<TransferRecord>>,
    settings: Arc<Settings>,
}

fn appended<T: Record>(records: &[T], mut record: T) -> (Arc<Vec<T>>, T::Id) {
    if !record.has_id() {
        record.set_id(T::fresh_id());
    }
    let id = record.id().clone();
    let mut next = records.to_vec();
    next.push(record);
    (Arc::new(next), id)
}

fn replaced<T: Record>(records: &[T], id: &T::Id, mut record: T) -> Result<Arc<Vec<T>>, FinanceError> {
    let position = records
        .iter()
        .position(|existing| existing.id() == id)
        .ok_or_else(|| not_found::<T>(id))?;
    record.set_id(id.clone());
    let mut next = records.to_vec();
    next[position] = record;
    Ok(Arc::new(next))
}

fn removed<T: Record>(records: &[T], id: &T::Id) -> Result<Arc<Vec<T>>, FinanceError> {
    if !records.iter().any(|existing| existing.id() == id) {
        return Err(not_found::<T>(id));
    }
    Ok(Arc::new(
        records
            .iter()
            .filter(|existing| existing.id() != id)
            .cloned()
            .collect(),
    ))
}

fn not_found<T: Record>(id: &T::Id) -> FinanceError {
    FinanceError::RecordNotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

fn validate_transfer(transfer: &TransferRecord) -> Result<(), FinanceError> {
    if transfer.amount <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveTransfer(transfer.amount));
    }
    if transfer.direction().is_none() {
        return Err(FinanceError::InvalidTransferAccounts);
    }
    Ok(())
}

impl FinanceState {
    /// Creates a snapshot from loaded collections.
    #[must_use]
    pub fn new(
        incomes: Vec<IncomeRecord>,
        expenses: Vec<ExpenseRecord>,
        invoices: Vec<InvoiceRecord>,
        transfers: Vec<TransferRecord>,
        settings: Settings,
    ) -> Self {
        Self {
            incomes: Arc::new(incomes),
            expenses: Arc::new(expenses),
            invoices: Arc::new(invoices),
            transfers: Arc::new(transfers),
            settings: Arc::new(settings),
        }
    }

    /// Creates an empty snapshot with the given settings.
    #[must_use]
    pub fn with_settings_only(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            ..Self::default()
        }
    }

    /// Income records.
    #[must_use]
    pub fn incomes(&self) -> &[IncomeRecord] {
        &self.incomes
    }

    /// Expense records.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Invoices.
    #[must_use]
    pub fn invoices(&self) -> &[InvoiceRecord] {
        &self.invoices
    }

    /// Cash/bank transfers.
    #[must_use]
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    /// Business settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a read-only aggregator over this snapshot.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(self)
    }

    /// Returns true if no records of any kind are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty()
            && self.expenses.is_empty()
            && self.invoices.is_empty()
            && self.transfers.is_empty()
    }

    /// Returns a snapshot with replaced settings.
    #[must_use]
    pub fn with_settings(&self, settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            ..self.clone()
        }
    }

    /// Returns a snapshot with the income added. A missing id is generated locally.
    #[must_use]
    pub fn add_income(&self, income: IncomeRecord) -> Self {
        let (incomes, id) = appended(&self.incomes, income);
        tracing::debug!(%id, "income added");
        Self {
            incomes,
            ..self.clone()
        }
    }

    /// Returns a snapshot with the income replaced.
    pub fn update_income(
        &self,
        id: &<IncomeRecord as Record>::Id,
        income: IncomeRecord,
    ) -> Result<Self, FinanceError> {
        let incomes = replaced(&self.incomes, id, income)?;
        tracing::debug!(%id, "income updated");
        Ok(Self {
            incomes,
            ..self.clone()
        })
    }

    /// Returns a snapshot without the income.
    pub fn delete_income(&self, id: &<IncomeRecord as Record>::Id) -> Result<Self, FinanceError> {
        let incomes = removed(&self.incomes, id)?;
        tracing::debug!(%id, "income deleted");
        Ok(Self {
            incomes,
            ..self.clone()
        })
    }

    /// Returns a snapshot with the expense added. A missing id is generated locally.
    #[must_use]
    pub fn add_expense(&self, expense: ExpenseRecord) -> Self {
        let (expenses, id) = appended(&self.expenses, expense);
        tracing::debug!(%id, "expense added");
        Self {
            expenses,
            ..self.clone()
        }
    }

    /// Returns a snapshot with the expense replaced.
    pub fn update_expense(
        &self,
        id: &<ExpenseRecord as Record>::Id,
        expense: ExpenseRecord,
    ) -> Result<Self, FinanceError> {
        let expenses = replaced(&self.expenses, id, expense)?;
        tracing::debug!(%id, "expense updated");
        Ok(Self {
            expenses,
            ..self.clone()
        })
    }

    /// Returns a snapshot without the expense.
    pub fn delete_expense(
        &self,
        id: &<ExpenseRecord as Record>::Id,
    ) -> Result<Self, FinanceError> {
        let expenses = removed(&self.expenses, id)?;
        tracing::debug!(%id, "expense deleted");
        Ok(Self {
            expenses,
            ..self.clone()
        })
    }

    /// Returns a snapshot with the invoice added. A missing id is generated locally.
    #[must_use]
    pub fn add_invoice(&self, invoice: InvoiceRecord) -> Self {
        let (invoices, id) = appended(&self.invoices, invoice);
        tracing::debug!(%id, "invoice added");
        Self {
            invoices,
            ..self.clone()
        }
    }

    /// Returns a snapshot with the invoice replaced.
    pub fn update_invoice(
        &self,
        id: &<InvoiceRecord as Record>::Id,
        invoice: InvoiceRecord,
    ) -> Result<Self, FinanceError> {
        let invoices = replaced(&self.invoices, id, invoice)?;
        tracing::debug!(%id, "invoice updated");
        Ok(Self {
            invoices,
            ..self.clone()
        })
    }

    /// Returns a snapshot without the invoice.
    pub fn delete_invoice(
        &self,
        id: &<InvoiceRecord as Record>::Id,
    ) -> Result<Self, FinanceError> {
        let invoices = removed(&self.invoices, id)?;
        tracing::debug!(%id, "invoice deleted");
        Ok(Self {
            invoices,
            ..self.clone()
        })
    }

    /// Returns a snapshot with the transfer added.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NonPositiveTransfer` for a zero amount and
    /// `FinanceError::InvalidTransferAccounts` unless it moves cash to bank or back.
    pub fn add_transfer(&self, transfer: TransferRecord) -> Result<Self, FinanceError> {
        validate_transfer(&transfer)?;
        let (transfers, id) = appended(&self.transfers, transfer);
        tracing::debug!(%id, "transfer added");
        Ok(Self {
            transfers,
            ..self.clone()
        })
    }

    /// Returns a snapshot with the transfer replaced.
    pub fn update_transfer(
        &self,
        id: &<TransferRecord as Record>::Id,
        transfer: TransferRecord,
    ) -> Result<Self, FinanceError> {
        validate_transfer(&transfer)?;
        let transfers = replaced(&self.transfers, id, transfer)?;
        tracing::debug!(%id, "transfer updated");
        Ok(Self {
            transfers,
            ..self.clone()
        })
    }

    /// Returns a snapshot without the transfer.
    pub fn delete_transfer(
        &self,
        id: &<TransferRecord as Record>::Id,
    ) -> Result<Self, FinanceError> {
        let transfers = removed(&self.transfers, id)?;
        tracing::debug!(%id, "transfer deleted");
        Ok(Self {
            transfers,
            ..self.clone()
        })
    }
}
