mod cached_resolver;
mod errors;
mod fan_out;
mod rate_resolver;

pub use cached_resolver::CachedRateResolver;
pub use errors::{EnrichmentError, RateError};
pub use fan_out::Enricher;
pub use rate_resolver::{RateResolver, SimulatedRateResolver};
