use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use crate::types::CurrencyCode;

/// Runtime settings. Every field can be overridden by a `TXVIEW_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub default_base_currency: CurrencyCode,
    pub default_page_size: usize,
    /// Number of ingestion partition actors.
    pub partitions: usize,
    /// Capacity of the bounded ingestion log channel.
    pub backpressure: usize,
    pub rate_lookup_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub rate_cache_capacity: u64,
    pub rate_cache_ttl_secs: u64,
    pub simulated_rate: Decimal,
    pub simulated_latency_ms: u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "error".to_string(),
            default_base_currency: CurrencyCode::IDR,
            default_page_size: 20,
            partitions: 8,
            backpressure: 256,
            rate_lookup_timeout_ms: 2_000,
            request_timeout_ms: 10_000,
            rate_cache_capacity: 10_000,
            rate_cache_ttl_secs: 3_600,
            simulated_rate: Decimal::new(11, 1),
            simulated_latency_ms: 500
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        override_with(&lookup, "TXVIEW_LOG_LEVEL", &mut config.log_level)?;
        override_with(&lookup, "TXVIEW_BASE_CURRENCY", &mut config.default_base_currency)?;
        override_with(&lookup, "TXVIEW_PAGE_SIZE", &mut config.default_page_size)?;
        override_with(&lookup, "TXVIEW_PARTITIONS", &mut config.partitions)?;
        override_with(&lookup, "TXVIEW_BACKPRESSURE", &mut config.backpressure)?;
        override_with(&lookup, "TXVIEW_RATE_TIMEOUT_MS", &mut config.rate_lookup_timeout_ms)?;
        override_with(&lookup, "TXVIEW_REQUEST_TIMEOUT_MS", &mut config.request_timeout_ms)?;
        override_with(&lookup, "TXVIEW_RATE_CACHE_CAPACITY", &mut config.rate_cache_capacity)?;
        override_with(&lookup, "TXVIEW_RATE_CACHE_TTL_SECS", &mut config.rate_cache_ttl_secs)?;
        override_with(&lookup, "TXVIEW_SIMULATED_RATE", &mut config.simulated_rate)?;
        override_with(&lookup, "TXVIEW_SIMULATED_LATENCY_MS", &mut config.simulated_latency_ms)?;

        Ok(config)
    }

    pub fn rate_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.rate_lookup_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn rate_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_cache_ttl_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

fn override_with<V>(lookup: &impl Fn(&str) -> Option<String>, name: &str, target: &mut V) -> Result<()>
where
    V: FromStr,
    V::Err: Display,
{
    if let Some(raw) = lookup(name) {
        *target = raw.trim().parse().map_err(|error| anyhow!("Invalid value for {name}: {error}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[]))?;

        assert_eq!(config.default_base_currency.as_str(), "IDR");
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.simulated_rate, Decimal::from_str("1.1")?);
        assert_eq!(config.simulated_latency(), Duration::from_millis(500));
        assert_eq!(config.log_level, "error");

        Ok(())
    }

    #[test]
    fn test_environment_overrides_are_applied() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[
            ("TXVIEW_BASE_CURRENCY", "EUR"),
            ("TXVIEW_PAGE_SIZE", " 50 "),
            ("TXVIEW_RATE_TIMEOUT_MS", "250"),
            ("TXVIEW_SIMULATED_RATE", "0.92")
        ]))?;

        assert_eq!(config.default_base_currency.as_str(), "EUR");
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.rate_lookup_timeout(), Duration::from_millis(250));
        assert_eq!(config.simulated_rate, Decimal::from_str("0.92")?);

        Ok(())
    }

    #[test]
    fn test_unparseable_override_names_the_variable() {
        let result = Config::from_lookup(lookup_from(&[("TXVIEW_PARTITIONS", "many")]));

        assert!(result.is_err_and(|error| error.to_string().contains("TXVIEW_PARTITIONS")));
    }

    #[test]
    fn test_malformed_base_currency_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("TXVIEW_BASE_CURRENCY", "euro")])).is_err());
    }
}
