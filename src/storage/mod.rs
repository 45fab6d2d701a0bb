mod errors;
mod table_key;
mod transaction_table;

use crate::models::Transaction;

pub use errors::StorageError;
pub use table_key::TableKey;
pub use transaction_table::TransactionTable;

/// An upsert key-value projection continuously rebuilt from the transaction log.
///
/// Scans are weakly consistent: entries written while a scan is in progress may
/// or may not be observed, and there is no atomicity across keys. Callers that
/// need a stable view must quiesce writers themselves.
pub trait MaterializedTable: Send + Sync + 'static {
    /// Inserts or replaces the entry for `key`. The last write wins.
    fn put(&self, key: TableKey, transaction: Transaction) -> Result<(), StorageError>;

    fn get(&self, key: &TableKey) -> Result<Option<Transaction>, StorageError>;

    /// Lazily iterates every live entry in no particular order.
    fn scan_all(&self) -> Result<impl Iterator<Item = (TableKey, Transaction)> + '_, StorageError>;

    /// Iterates the entries whose key starts with `prefix`.
    ///
    /// Falls back to a filtered full scan. Stores with an ordered key space
    /// should override this with a native range query.
    fn scan_prefix(&self, prefix: &str) -> Result<impl Iterator<Item = (TableKey, Transaction)> + '_, StorageError> {
        let prefix = prefix.to_string();

        Ok(self.scan_all()?.filter(move |(key, _)| key.as_str().starts_with(&prefix)))
    }
}
