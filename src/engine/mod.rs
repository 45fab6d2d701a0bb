mod errors;
mod ingestion_engine;
#[cfg(test)]
mod tests;

pub use errors::IngestError;
pub use ingestion_engine::IngestionEngine;
