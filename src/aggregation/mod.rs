mod aggregator;

pub use aggregator::{summarize, AggregationError};
