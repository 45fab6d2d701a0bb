use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::EnrichedTransaction;
use crate::types::CurrencyCode;

/// Pagination metadata for one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based page index.
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool
}

impl PageInfo {
    /// Builds the metadata for `page` given the full result count.
    ///
    /// An empty result set is reported as a single page that is both first and
    /// last, with no neighbours, whatever page was asked for. Any `page` is
    /// accepted; indices past the end are neither last nor have a next page.
    pub fn new(page: usize, size: usize, total_elements: usize) -> Self {
        let total_pages = Self::total_pages(total_elements, size);

        if total_elements == 0 {
            return Self {
                page,
                size,
                total_elements,
                total_pages,
                first: true,
                last: true,
                has_next: false,
                has_previous: false
            }
        }

        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: total_pages.checked_sub(1) == Some(page),
            has_next: page < total_pages.saturating_sub(1),
            has_previous: page > 0
        }
    }

    /// `ceil(total_elements / size)`, with a zero size yielding zero pages.
    pub fn total_pages(total_elements: usize, size: usize) -> usize {
        if size == 0 {
            return 0
        }

        total_elements.div_ceil(size)
    }
}

/// Totals over the converted amounts of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net_amount: Decimal,
    pub base_currency: CurrencyCode,
    pub transaction_count: usize
}

impl PageSummary {
    pub fn empty(base_currency: CurrencyCode) -> Self {
        Self {
            total_credits: Decimal::ZERO,
            total_debits: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            base_currency,
            transaction_count: 0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<EnrichedTransaction>,
    pub page_info: PageInfo,
    pub summary: PageSummary
}
