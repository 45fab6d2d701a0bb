use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache;
use rust_decimal::Decimal;

use crate::enrichment::{RateError, RateResolver};
use crate::types::CurrencyCode;

type RateKey = (CurrencyCode, CurrencyCode, NaiveDate);

/// Memoizes another resolver's quotes per `(from, to, date)`.
///
/// Concurrent misses for one key share a single upstream call. Failures are
/// returned to every waiter but never cached.
pub struct CachedRateResolver<R> {
    inner: R,
    cache: Cache<RateKey, Decimal>
}

impl<R: RateResolver> CachedRateResolver<R> {
    pub fn new(inner: R, capacity: u64, time_to_live: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(time_to_live)
            .build();

        Self { inner, cache }
    }
}

#[async_trait]
impl<R: RateResolver> RateResolver for CachedRateResolver<R> {
    async fn rate(&self, from: CurrencyCode, to: CurrencyCode, as_of: NaiveDate) -> Result<Decimal, RateError> {
        self.cache
            .try_get_with((from, to, as_of), self.inner.rate(from, to, as_of))
            .await
            .map_err(|error| (*error).clone())
    }
}
