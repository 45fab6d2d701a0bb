use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};
use crate::types::{AccountRef, CurrencyCode, TransactionId};

/// A transaction converted into a base currency for one response.
///
/// Never persisted; built fresh on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    pub id: TransactionId,
    pub original_amount: Decimal,
    pub original_currency: CurrencyCode,
    pub converted_amount: Decimal,
    pub base_currency: CurrencyCode,
    pub exchange_rate: Decimal,
    pub account_ref: AccountRef,
    pub value_date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType
}

impl EnrichedTransaction {
    /// Converts `transaction` at `rate`. Returns `None` if the product does not
    /// fit in a `Decimal`.
    pub fn convert(transaction: Transaction, base_currency: CurrencyCode, rate: Decimal) -> Option<Self> {
        let converted_amount = transaction.amount.checked_mul(rate)?;

        Some(Self {
            id: transaction.id,
            original_amount: transaction.amount,
            original_currency: transaction.currency,
            converted_amount,
            base_currency,
            exchange_rate: rate,
            account_ref: transaction.account_ref,
            value_date: transaction.value_date,
            description: transaction.description,
            transaction_type: transaction.transaction_type
        })
    }
}
