use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::debug;

use crate::enrichment::RateError;
use crate::types::CurrencyCode;

/// Source of conversion rates.
///
/// Calls may be slow or fail. Implementations are not expected to short-circuit
/// identical currencies or to enforce a deadline; the caller does both.
#[async_trait]
pub trait RateResolver: Send + Sync + 'static {
    async fn rate(&self, from: CurrencyCode, to: CurrencyCode, as_of: NaiveDate) -> Result<Decimal, RateError>;
}

#[async_trait]
impl<R: RateResolver + ?Sized> RateResolver for Arc<R> {
    async fn rate(&self, from: CurrencyCode, to: CurrencyCode, as_of: NaiveDate) -> Result<Decimal, RateError> {
        (**self).rate(from, to, as_of).await
    }
}

/// Stand-in provider answering every pair with one fixed rate after a delay.
///
/// A rate that is not strictly positive is never quoted; every lookup then
/// fails as unavailable.
pub struct SimulatedRateResolver {
    rate: Decimal,
    latency: Duration
}

impl SimulatedRateResolver {
    pub fn new(rate: Decimal, latency: Duration) -> Self {
        Self { rate, latency }
    }
}

#[async_trait]
impl RateResolver for SimulatedRateResolver {
    async fn rate(&self, from: CurrencyCode, to: CurrencyCode, as_of: NaiveDate) -> Result<Decimal, RateError> {
        debug!("Simulating rate lookup [{from}]->[{to}] as of [{as_of}]");
        sleep(self.latency).await;

        if self.rate <= Decimal::ZERO {
            return Err(RateError::Unavailable {
                from,
                to,
                date: as_of,
                reason: format!("no positive quote configured (rate {})", self.rate)
            })
        }

        Ok(self.rate)
    }
}
