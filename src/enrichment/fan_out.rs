use std::time::Duration;

use chrono::NaiveDate;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use tokio::time::timeout;
use tracing::debug;

use crate::enrichment::{EnrichmentError, RateError, RateResolver};
use crate::models::{EnrichedTransaction, Transaction};
use crate::types::CurrencyCode;

/// Converts a page of transactions into a base currency.
///
/// Every rate lookup of a page is in flight at once and joined at a single
/// point, so a page costs the latency of its slowest lookup. The first failure
/// fails the page and drops the lookups still pending; dropping the returned
/// future cancels all of them as well.
pub struct Enricher<R> {
    resolver: R,
    lookup_timeout: Duration
}

impl<R: RateResolver> Enricher<R> {
    pub fn new(resolver: R, lookup_timeout: Duration) -> Self {
        Self { resolver, lookup_timeout }
    }

    /// Enriches `records`, preserving their order.
    pub async fn enrich(&self, records: Vec<Transaction>, base_currency: CurrencyCode) -> Result<Vec<EnrichedTransaction>, EnrichmentError> {
        debug!("Enriching [{}] transactions into [{base_currency}]", records.len());

        let enrichments = records.into_iter()
            .map(|transaction| self.enrich_one(transaction, base_currency));

        try_join_all(enrichments).await
    }

    async fn enrich_one(&self, transaction: Transaction, base_currency: CurrencyCode) -> Result<EnrichedTransaction, EnrichmentError> {
        // Identity conversion must not depend on provider rounding.
        let rate = if transaction.currency == base_currency {
            Decimal::ONE
        } else {
            self.lookup(transaction.currency, base_currency, transaction.value_date).await?
        };

        let transaction_id = transaction.id.clone();

        EnrichedTransaction::convert(transaction, base_currency, rate)
            .ok_or(EnrichmentError::Overflow { transaction_id })
    }

    async fn lookup(&self, from: CurrencyCode, to: CurrencyCode, date: NaiveDate) -> Result<Decimal, RateError> {
        match timeout(self.lookup_timeout, self.resolver.rate(from, to, date)).await {
            Ok(result) => result,
            Err(_) => Err(RateError::Timeout { from, to, date })
        }
    }
}
