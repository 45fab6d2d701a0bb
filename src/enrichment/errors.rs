use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{CurrencyCode, TransactionId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateError {
    #[error("Rate [{from}]->[{to}] as of [{date}] is unavailable: {reason}")]
    Unavailable {
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
        reason: String
    },
    #[error("Rate [{from}]->[{to}] as of [{date}] timed out")]
    Timeout {
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error(transparent)]
    Rate(#[from] RateError),
    #[error("Converted amount overflowed for transaction [{transaction_id}]")]
    Overflow {
        transaction_id: TransactionId
    }
}
