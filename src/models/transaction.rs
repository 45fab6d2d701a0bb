use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{TransactionType, ValidationError};
use crate::types::{AccountRef, CurrencyCode, CustomerId, TransactionId, KEY_SEPARATOR};

/// A single money-account transaction as carried by the event log.
///
/// Records are immutable once appended. The sign of `amount` is implied by
/// `transaction_type`; the magnitude itself is never negative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Globally unique transaction ID.
    pub id: TransactionId,
    /// Exact decimal magnitude, parsed from its textual form to keep the scale.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: CurrencyCode,
    /// Sensitive; formats censored.
    pub account_ref: AccountRef,
    pub value_date: NaiveDate,
    pub description: String,
    pub customer_id: CustomerId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType
}

impl Transaction {
    /// Checks every field the ingestion boundary requires before a record may
    /// enter the log. Currency and date are already enforced by their types.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::BlankId)
        }

        if self.customer_id.trim().is_empty() {
            return Err(ValidationError::blank_customer_id(self))
        }

        if self.customer_id.contains(KEY_SEPARATOR) {
            return Err(ValidationError::invalid_customer_id(self))
        }

        if self.account_ref.is_blank() {
            return Err(ValidationError::blank_account_ref(self))
        }

        if self.description.trim().is_empty() {
            return Err(ValidationError::blank_description(self))
        }

        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ValidationError::negative_amount(self))
        }

        Ok(())
    }

    /// The `YYYY-MM` bucket this transaction belongs to.
    pub fn period(&self) -> (i32, u32) {
        (self.value_date.year(), self.value_date.month())
    }
}
