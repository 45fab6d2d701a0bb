use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::aggregation::summarize;
use crate::enrichment::{Enricher, RateResolver};
use crate::models::{PageInfo, TransactionPage, ValidationError};
use crate::query::QueryEngine;
use crate::service::ServiceError;
use crate::storage::MaterializedTable;
use crate::types::{censor, CurrencyCode, CustomerId};

const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A request for one page of a customer's transactions in one month.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub customer_id: CustomerId,
    pub year: i32,
    pub month: u32,
    pub page: usize,
    /// Falls back to the service's default page size.
    pub size: Option<usize>,
    /// Falls back to the service's default base currency.
    pub base_currency: Option<CurrencyCode>
}

impl PageRequest {
    pub fn new(customer_id: impl Into<CustomerId>, year: i32, month: u32) -> Self {
        Self {
            customer_id: customer_id.into(),
            year,
            month,
            page: 0,
            size: None,
            base_currency: None
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_base_currency(mut self, base_currency: CurrencyCode) -> Self {
        self.base_currency = Some(base_currency);
        self
    }
}

/// Serves paginated, currency-converted, summarized reads over the table.
pub struct TransactionService<T, R> {
    query: QueryEngine<T>,
    enricher: Enricher<R>,
    default_base_currency: CurrencyCode,
    default_page_size: usize,
    request_timeout: Duration
}

impl<T: MaterializedTable, R: RateResolver> TransactionService<T, R> {
    pub fn new(query: QueryEngine<T>, enricher: Enricher<R>, default_base_currency: CurrencyCode) -> Self {
        Self {
            query,
            enricher,
            default_base_currency,
            default_page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT
        }
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Builds one page: query, enrich, summarize.
    ///
    /// The whole read is bounded by the request timeout; on expiry every rate
    /// lookup still in flight is dropped.
    pub async fn get_page(&self, request: PageRequest) -> Result<TransactionPage, ServiceError> {
        let result = match timeout(self.request_timeout, self.build_page(&request)).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.request_timeout))
        };

        if let Err(error) = &result {
            warn!(
                "Page request [{}:{:04}-{:02}] page [{}] failed (retryable: {}): {error}",
                censor(&request.customer_id),
                request.year,
                request.month,
                request.page,
                error.is_retryable()
            );
        }

        result
    }

    async fn build_page(&self, request: &PageRequest) -> Result<TransactionPage, ServiceError> {
        if request.customer_id.trim().is_empty() {
            return Err(ValidationError::MissingCustomerId.into())
        }

        let base_currency = request.base_currency.unwrap_or(self.default_base_currency);
        let size = request.size.unwrap_or(self.default_page_size);

        let result = self.query.query_page(&request.customer_id, request.year, request.month, request.page, size)?;
        let transactions = self.enricher.enrich(result.records, base_currency).await?;
        let summary = summarize(&transactions, base_currency)?;
        let page_info = PageInfo::new(request.page, size, result.total_elements);

        info!(
            "Served page [{}] of [{}] for [{}:{:04}-{:02}] in [{base_currency}]",
            page_info.page,
            page_info.total_pages,
            censor(&request.customer_id),
            request.year,
            request.month
        );

        Ok(TransactionPage { transactions, page_info, summary })
    }
}
