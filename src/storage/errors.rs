use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Transaction table is unavailable")]
    Unavailable,
    #[error("Invalid table key: {reason}")]
    InvalidKey {
        reason: String
    }
}

impl StorageError {
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey { reason: reason.into() }
    }
}
