use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::models::Transaction;
use crate::storage::{MaterializedTable, TableKey};

/// Applies the upserts of one log partition to the table, strictly in arrival order.
pub struct PartitionActor {
    partition: usize,
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<usize>
}

impl PartitionActor {
    /// Spawns a new actor for `partition` writing into `table`.
    pub fn new<T: MaterializedTable>(partition: usize, table: Arc<T>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Transaction>();

        let handle = spawn(async move {
            let mut applied = 0;

            while let Some(transaction) = receiver.recv().await {
                let key = match TableKey::derive(&transaction) {
                    Ok(key) => key,
                    Err(error) => {
                        warn!("Transaction [{}] skipped by partition [{partition}]: {error}", transaction.id);
                        continue;
                    }
                };

                let transaction_id = transaction.id.clone();
                let replaced = matches!(table.get(&key), Ok(Some(_)));

                match table.put(key, transaction) {
                    Ok(()) => {
                        applied += 1;

                        if replaced {
                            debug!("Transaction [{transaction_id}] replaced by partition [{partition}]");
                        } else {
                            debug!("Transaction [{transaction_id}] applied by partition [{partition}]");
                        }
                    },
                    Err(error) => {
                        warn!("Transaction [{transaction_id}] could not be applied by partition [{partition}]: {error}");
                    }
                }
            }

            applied
        });

        Self { partition, sender, handle }
    }

    pub fn partition(&self) -> usize {
        self.partition
    }

    /// Queues a transaction. Returns `false` if the actor has already stopped.
    pub fn accept(&self, transaction: Transaction) -> bool {
        self.sender.send(transaction).is_ok()
    }

    /// Closes the queue and waits for every queued upsert to be applied.
    ///
    /// Returns the number of upserts this actor applied over its lifetime.
    pub async fn despawn(self) -> Result<usize, JoinError> {
        drop(self.sender);

        self.handle.await
    }
}
