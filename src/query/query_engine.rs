use std::sync::Arc;

use tracing::debug;

use crate::models::Transaction;
use crate::storage::{MaterializedTable, StorageError, TableKey};
use crate::types::censor;

/// One page of raw transactions together with the size of the full match set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub records: Vec<Transaction>,
    pub total_elements: usize
}

/// Filters, orders and paginates one customer's transactions for one month.
///
/// Holds no state of its own. Each call reads whatever the table holds at that
/// moment; pages computed while the table is being written to may include or
/// omit in-flight records.
pub struct QueryEngine<T> {
    table: Arc<T>
}

impl<T: MaterializedTable> QueryEngine<T> {
    pub fn new(table: Arc<T>) -> Self {
        Self { table }
    }

    /// Returns page `page` of `size` records, newest value date first.
    ///
    /// Records sharing a value date are ordered by table key, so a fixed set of
    /// entries always pages the same way. Pages past the end are empty, and a
    /// month outside `1..=12` simply matches nothing.
    pub fn query_page(&self, customer_id: &str, year: i32, month: u32, page: usize, size: usize) -> Result<QueryResult, StorageError> {
        let prefix = TableKey::prefix(customer_id, year, month)?;

        let mut matches: Vec<(TableKey, Transaction)> = self.table.scan_prefix(&prefix)?.collect();

        matches.sort_by(|(left_key, left), (right_key, right)| {
            right.value_date.cmp(&left.value_date).then_with(|| left_key.cmp(right_key))
        });

        let total_elements = matches.len();

        let records: Vec<Transaction> = matches.into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .map(|(_, transaction)| transaction)
            .collect();

        debug!(
            "Query [{}:{year:04}-{month:02}] page [{page}] size [{size}] matched [{total_elements}], returning [{}]",
            censor(customer_id),
            records.len()
        );

        Ok(QueryResult { records, total_elements })
    }
}
