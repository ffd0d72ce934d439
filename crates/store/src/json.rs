//! JSON snapshot directory source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tallybook_core::finance::FinanceState;
use tallybook_core::records::{
    ExpenseRecord, IncomeRecord, InvoiceRecord, Settings, TransferRecord,
};

use crate::error::StoreError;
use crate::source::FinanceSource;

const INCOMES_FILE: &str = "incomes.json";
const EXPENSES_FILE: &str = "expenses.json";
const INVOICES_FILE: &str = "invoices.json";
const TRANSFERS_FILE: &str = "transfers.json";
const SETTINGS_FILE: &str = "settings.json";

/// Reads finance data from a directory of JSON files.
///
/// The directory holds `incomes.json`, `expenses.json`, `invoices.json` and
/// `transfers.json` (each a JSON array) plus `settings.json` (an object). A record
/// that cannot be decoded is dropped without affecting its neighbours.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode { path, source })
    }

    /// Reads a JSON array, decoding each element on its own.
    ///
    /// Elements that fail to decode are skipped with a warning; only a file that is
    /// not a JSON array fails as a whole.
    async fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let elements: Vec<Value> = self.read(file).await?;
        let total = elements.len();
        let records: Vec<T> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match T::deserialize(element) {
                Ok(record) => Some(record),
                Err(error) => {
                    tracing::warn!(file, index, %error, "skipping malformed record");
                    None
                }
            })
            .collect();
        if records.len() < total {
            tracing::warn!(
                file,
                kept = records.len(),
                skipped = total - records.len(),
                "some records could not be decoded"
            );
        }
        Ok(records)
    }

    pub(crate) async fn write<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            path: path.clone(),
            source,
        })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }

    /// Writes a whole snapshot to the directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be written.
    pub async fn save(&self, state: &FinanceState) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        self.write(INCOMES_FILE, state.incomes()).await?;
        self.write(EXPENSES_FILE, state.expenses()).await?;
        self.write(INVOICES_FILE, state.invoices()).await?;
        self.write(TRANSFERS_FILE, state.transfers()).await?;
        self.write(SETTINGS_FILE, state.settings()).await?;
        tracing::info!(dir = %self.dir.display(), "snapshot saved");
        Ok(())
    }
}

#[async_trait]
impl FinanceSource for JsonFileSource {
    async fn incomes(&self) -> Result<Vec<IncomeRecord>, StoreError> {
        self.read_list(INCOMES_FILE).await
    }

    async fn expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.read_list(EXPENSES_FILE).await
    }

    async fn invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        self.read_list(INVOICES_FILE).await
    }

    async fn transfers(&self) -> Result<Vec<TransferRecord>, StoreError> {
        self.read_list(TRANSFERS_FILE).await
    }

    async fn settings(&self) -> Result<Settings, StoreError> {
        self.read(SETTINGS_FILE).await
    }
}
