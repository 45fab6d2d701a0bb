use crate::models::Transaction;
use crate::types::{censor, TransactionId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Transaction id must not be blank")]
    BlankId,
    #[error("Customer id must not be blank for transaction [{transaction_id}]")]
    BlankCustomerId {
        transaction_id: TransactionId
    },
    #[error("Customer id [{customer_id}] contains the key separator for transaction [{transaction_id}]")]
    InvalidCustomerId {
        transaction_id: TransactionId,
        customer_id: String
    },
    #[error("Account reference must not be blank for transaction [{transaction_id}]")]
    BlankAccountRef {
        transaction_id: TransactionId
    },
    #[error("Description must not be blank for transaction [{transaction_id}]")]
    BlankDescription {
        transaction_id: TransactionId
    },
    #[error("Amount must not be negative for transaction [{transaction_id}]")]
    NegativeAmount {
        transaction_id: TransactionId
    },
    #[error("Customer id must not be blank")]
    MissingCustomerId
}

impl ValidationError {
    pub fn blank_customer_id(tx: &Transaction) -> Self {
        Self::BlankCustomerId { transaction_id: tx.id.clone() }
    }

    pub fn invalid_customer_id(tx: &Transaction) -> Self {
        Self::InvalidCustomerId {
            transaction_id: tx.id.clone(),
            customer_id: censor(&tx.customer_id)
        }
    }

    pub fn blank_account_ref(tx: &Transaction) -> Self {
        Self::BlankAccountRef { transaction_id: tx.id.clone() }
    }

    pub fn blank_description(tx: &Transaction) -> Self {
        Self::BlankDescription { transaction_id: tx.id.clone() }
    }

    pub fn negative_amount(tx: &Transaction) -> Self {
        Self::NegativeAmount { transaction_id: tx.id.clone() }
    }
}
