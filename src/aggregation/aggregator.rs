use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{EnrichedTransaction, PageSummary, TransactionType};
use crate::types::CurrencyCode;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Page totals overflowed while summing {0:?} amounts")]
    Overflow(TransactionType)
}

/// Reduces an enriched page to its credit, debit and net totals.
///
/// An empty page yields an all-zero summary.
pub fn summarize(records: &[EnrichedTransaction], base_currency: CurrencyCode) -> Result<PageSummary, AggregationError> {
    if records.is_empty() {
        return Ok(PageSummary::empty(base_currency))
    }

    let total_credits = total_of(records, TransactionType::Credit)?;
    let total_debits = total_of(records, TransactionType::Debit)?;

    let net_amount = total_credits.checked_sub(total_debits)
        .ok_or(AggregationError::Overflow(TransactionType::Debit))?;

    Ok(PageSummary {
        total_credits,
        total_debits,
        net_amount,
        base_currency,
        transaction_count: records.len()
    })
}

fn total_of(records: &[EnrichedTransaction], transaction_type: TransactionType) -> Result<Decimal, AggregationError> {
    records.iter()
        .filter(|record| record.transaction_type == transaction_type)
        .try_fold(Decimal::ZERO, |total, record| total.checked_add(record.converted_amount))
        .ok_or(AggregationError::Overflow(transaction_type))
}
