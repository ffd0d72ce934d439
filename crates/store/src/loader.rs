//! Snapshot loading.

use tallybook_core::finance::FinanceState;
use tallybook_core::records::Settings;

use crate::error::StoreError;
use crate::source::FinanceSource;

/// Replaces a failed fetch with the fallback value, logging why.
fn or_fallback<T>(resource: &'static str, result: Result<T, StoreError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) if err.is_missing() => {
            tracing::debug!(resource, "resource not present, using empty data");
            fallback
        }
        Err(err) => {
            tracing::warn!(resource, error = %err, "failed to load resource, using empty data");
            fallback
        }
    }
}

/// Loads a full snapshot from `source`.
///
/// The five resources are fetched concurrently. Any resource that fails becomes an
/// empty list, or default settings, so loading itself never fails.
pub async fn load_state<S: FinanceSource + ?Sized>(source: &S) -> FinanceState {
    let (incomes, expenses, invoices, transfers, settings) = tokio::join!(
        source.incomes(),
        source.expenses(),
        source.invoices(),
        source.transfers(),
        source.settings(),
    );

    let state = FinanceState::new(
        or_fallback("incomes", incomes, Vec::new()),
        or_fallback("expenses", expenses, Vec::new()),
        or_fallback("invoices", invoices, Vec::new()),
        or_fallback("transfers", transfers, Vec::new()),
        or_fallback("settings", settings, Settings::default()),
    );

    tracing::info!(
        incomes = state.incomes().len(),
        expenses = state.expenses().len(),
        invoices = state.invoices().len(),
        transfers = state.transfers().len(),
        "finance state loaded"
    );
    state
}
