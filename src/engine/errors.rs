use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Transaction rejected: {0}")]
    Validation(#[from] ValidationError),
    #[error("Ingestion log is closed")]
    Closed,
    #[error("Event log replay aborted: {0}")]
    ReplayAborted(String)
}
