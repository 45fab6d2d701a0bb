use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Currency error: [{0}] must be exactly 3 uppercase letters")]
    InvalidFormat(String)
}
