use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::Transaction;
use crate::storage::StorageError;
use crate::types::KEY_SEPARATOR;

/// A table key of the form `customerId:YYYY-MM:transactionId`.
///
/// The period is fixed width and customer ids may not contain the separator,
/// so every key for one customer and month shares the prefix produced by
/// [`TableKey::prefix`] and sorts contiguously.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TableKey(String);

impl TableKey {
    pub fn derive(transaction: &Transaction) -> Result<Self, StorageError> {
        if transaction.id.is_empty() {
            return Err(StorageError::invalid_key("transaction id is empty"))
        }

        let (year, month) = transaction.period();
        let mut key = Self::prefix(&transaction.customer_id, year, month)?;
        key.push_str(&transaction.id);

        Ok(TableKey(key))
    }

    /// The shared prefix of every key for `customer_id` in the given month.
    ///
    /// A month outside `1..=12` still yields a prefix; it simply matches no key.
    pub fn prefix(customer_id: &str, year: i32, month: u32) -> Result<String, StorageError> {
        if customer_id.is_empty() {
            return Err(StorageError::invalid_key("customer id is empty"))
        }

        if customer_id.contains(KEY_SEPARATOR) {
            return Err(StorageError::invalid_key(format!("customer id contains '{KEY_SEPARATOR}'")))
        }

        Ok(format!("{customer_id}{KEY_SEPARATOR}{year:04}-{month:02}{KEY_SEPARATOR}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TableKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
