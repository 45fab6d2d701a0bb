use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use tracing::info;

use crate::models::Transaction;
use crate::storage::{MaterializedTable, StorageError, TableKey};

/// In-memory materialized table shared by the ingestion actors and readers.
///
/// Created once at startup and closed once at shutdown; a closed table rejects
/// every operation with [`StorageError::Unavailable`].
pub struct TransactionTable {
    entries: DashMap<TableKey, Transaction>,
    open: AtomicBool
}

impl TransactionTable {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            open: AtomicBool::new(true)
        }
    }

    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            info!("Transaction table closed with [{}] entries", self.entries.len());
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl Default for TransactionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterializedTable for TransactionTable {
    fn put(&self, key: TableKey, transaction: Transaction) -> Result<(), StorageError> {
        self.ensure_open()?;
        self.entries.insert(key, transaction);

        Ok(())
    }

    fn get(&self, key: &TableKey) -> Result<Option<Transaction>, StorageError> {
        self.ensure_open()?;

        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn scan_all(&self) -> Result<impl Iterator<Item = (TableKey, Transaction)> + '_, StorageError> {
        self.ensure_open()?;

        Ok(self.entries.iter().map(|entry| (entry.key().clone(), entry.value().clone())))
    }
}
