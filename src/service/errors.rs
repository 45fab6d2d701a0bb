use std::time::Duration;

use thiserror::Error;

use crate::aggregation::AggregationError;
use crate::enrichment::{EnrichmentError, RateError};
use crate::models::ValidationError;
use crate::storage::StorageError;

/// Failures surfaced by the read boundary.
///
/// Resource failures are retryable; malformed input and arithmetic overflow
/// are not.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Rate service unavailable: {0}")]
    RateUnavailable(#[source] RateError),
    #[error("Transaction table unavailable")]
    TableUnavailable,
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Amount overflow: {0}")]
    Overflow(String)
}

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateUnavailable(_) | Self::TableUnavailable | Self::Timeout(_))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

impl From<StorageError> for ServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Unavailable => Self::TableUnavailable,
            StorageError::InvalidKey { .. } => Self::InvalidRequest(error.to_string())
        }
    }
}

impl From<EnrichmentError> for ServiceError {
    fn from(error: EnrichmentError) -> Self {
        match error {
            EnrichmentError::Rate(error) => Self::RateUnavailable(error),
            EnrichmentError::Overflow { .. } => Self::Overflow(error.to_string())
        }
    }
}

impl From<AggregationError> for ServiceError {
    fn from(error: AggregationError) -> Self {
        Self::Overflow(error.to_string())
    }
}
