//! Finance state error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by state mutations. Aggregation itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinanceError {
    /// No record with this id exists in the snapshot.
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// Record kind.
        kind: &'static str,
        /// Requested id.
        id: String,
    },

    /// Transfer amount must be positive.
    #[error("Transfer amount must be positive, got {0}")]
    NonPositiveTransfer(Decimal),

    /// Transfer must move money between cash and bank.
    #[error("Transfer must move money between cash and bank")]
    InvalidTransferAccounts,
}
