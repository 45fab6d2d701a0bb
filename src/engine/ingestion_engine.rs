use std::fs::File;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use futures::future::join_all;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

use crate::actors::PartitionActor;
use crate::engine::IngestError;
use crate::models::Transaction;
use crate::storage::MaterializedTable;

/// Outcome of replaying an event log file.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ReplayReport {
    pub accepted: usize,
    pub rejected: usize
}

/// Feeds the materialized table from an in-process transaction log.
///
/// Accepted transactions are routed by a stable hash of their key components to
/// a fixed set of partition actors: updates to one key apply serially in log
/// order, different partitions apply in parallel. Accepting a transaction does
/// not make it visible; it becomes readable once its actor applies it.
pub struct IngestionEngine {
    sender: mpsc::Sender<Transaction>,
    dispatcher: JoinHandle<usize>
}

impl IngestionEngine {
    /// Spawns the dispatcher and its partition actors over `table`.
    pub fn start<T: MaterializedTable>(table: Arc<T>, partitions: usize, backpressure: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Transaction>(backpressure.max(1));
        let dispatcher = spawn(Self::dispatch(table, partitions.max(1), receiver));

        Self { sender, dispatcher }
    }

    /// Validates `transaction` and appends it to the log.
    ///
    /// `Ok` means accepted for processing, not yet visible in the table.
    pub async fn submit(&self, transaction: Transaction) -> Result<(), IngestError> {
        transaction.validate()?;

        self.sender.send(transaction).await.map_err(|_| IngestError::Closed)
    }

    /// Streams a CSV event log through [`IngestionEngine::submit`].
    ///
    /// Malformed or invalid rows are logged and counted as rejected; a missing
    /// file yields an empty report.
    pub async fn replay(&self, path: &str) -> Result<ReplayReport, IngestError> {
        let (row_sender, mut rows) = mpsc::channel::<Transaction>(self.sender.max_capacity());
        let reader = Self::spawn_csv_reader(path.to_string(), row_sender);

        let mut report = ReplayReport::default();

        while let Some(transaction) = rows.recv().await {
            match self.submit(transaction).await {
                Ok(()) => report.accepted += 1,
                Err(IngestError::Validation(error)) => {
                    warn!("{error}");
                    report.rejected += 1;
                },
                Err(error) => return Err(error)
            }
        }

        report.rejected += reader.await.map_err(|error| IngestError::ReplayAborted(error.to_string()))?;

        info!("Replayed event log [{path}]: [{}] accepted, [{}] rejected", report.accepted, report.rejected);

        Ok(report)
    }

    /// Closes the log and waits until every accepted transaction is applied.
    ///
    /// Returns the number of upserts applied to the table.
    pub async fn shutdown(self) -> usize {
        drop(self.sender);

        match self.dispatcher.await {
            Ok(applied) => applied,
            Err(error) => {
                error!("Ingestion dispatcher did not shut down gracefully: {error}");
                0
            }
        }
    }

    /// Parses rows off the blocking pool; returns how many rows failed to parse.
    fn spawn_csv_reader(path: String, rows: mpsc::Sender<Transaction>) -> JoinHandle<usize> {
        spawn_blocking(move || {
            let mut malformed = 0;

            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening event log at path: {path} | {error}");
                    return malformed;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<Transaction>() {
                match result {
                    Ok(transaction) => {
                        if rows.blocking_send(transaction).is_err() {
                            error!("Replay of [{path}] stopped before the end of the log");
                            break;
                        }
                    },
                    Err(error) => {
                        error!("Event log deserialization error: {error}");
                        malformed += 1;
                    }
                }
            }

            malformed
        })
    }

    async fn dispatch<T: MaterializedTable>(table: Arc<T>, partitions: usize, mut receiver: mpsc::Receiver<Transaction>) -> usize {
        let actors: Vec<PartitionActor> = (0..partitions)
            .map(|partition| PartitionActor::new(partition, table.clone()))
            .collect();

        while let Some(transaction) = receiver.recv().await {
            let actor = &actors[Self::partition_for(&transaction, partitions)];
            let transaction_id = transaction.id.clone();

            if !actor.accept(transaction) {
                error!("Partition actor [{}] could not accept transaction [{transaction_id}]", actor.partition());
            }
        }

        let despawns = actors.into_iter().map(|actor| actor.despawn());
        let mut applied = 0;

        for result in join_all(despawns).await {
            match result {
                Ok(count) => applied += count,
                Err(error) => error!("A partition actor did not despawn gracefully: {error:?}")
            }
        }

        applied
    }

    /// Same key components always land on the same partition.
    fn partition_for(transaction: &Transaction, partitions: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        transaction.customer_id.hash(&mut hasher);
        transaction.id.hash(&mut hasher);

        (hasher.finish() % partitions as u64) as usize
    }
}
