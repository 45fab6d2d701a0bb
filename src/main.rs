mod actors;
mod aggregation;
mod config;
mod engine;
mod enrichment;
mod models;
mod query;
mod service;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::Config;
use crate::engine::IngestionEngine;
use crate::enrichment::{CachedRateResolver, Enricher, SimulatedRateResolver};
use crate::models::TransactionPage;
use crate::query::QueryEngine;
use crate::service::{PageRequest, TransactionService};
use crate::storage::TransactionTable;
use crate::types::CurrencyCode;

const USAGE: &str = "Usage: transaction-view [events].csv [customer_id] [year] [month] [page:optional] [size:optional] [base_currency:optional] > [page].json";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 5 {
        eprintln!("{USAGE}");
        eprintln!("Set TXVIEW_LOG_LEVEL to off, error, warn, info, debug or trace to log to stderr (default: error)");
        exit(1);
    }

    let config = Config::from_env()?;
    init_logging(log_level(&config));

    let request = match parse_request(&args[2..]) {
        Ok(request) => request,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            exit(1);
        }
    };

    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), config.partitions, config.backpressure);

    let timer = Instant::now();
    let report = engine.replay(&args[1]).await?;
    let applied = engine.shutdown().await;
    info!("Ingested [{applied}] of [{}] accepted events in: {:?}", report.accepted, timer.elapsed());

    let resolver = CachedRateResolver::new(
        SimulatedRateResolver::new(config.simulated_rate, config.simulated_latency()),
        config.rate_cache_capacity,
        config.rate_cache_ttl()
    );

    let service = TransactionService::new(
        QueryEngine::new(table.clone()),
        Enricher::new(resolver, config.rate_lookup_timeout()),
        config.default_base_currency
    )
    .with_default_page_size(config.default_page_size)
    .with_request_timeout(config.request_timeout());

    let timer = Instant::now();
    let page = service.get_page(request).await;
    info!("Served page in: {:?}", timer.elapsed());

    table.close();

    write_page_to_stdout(&page?)?;

    Ok(())
}

fn parse_request(args: &[String]) -> Result<PageRequest> {
    let customer_id = &args[0];
    let year: i32 = args[1].parse().with_context(|| format!("Invalid year '{}'", args[1]))?;
    let month: u32 = args[2].parse().with_context(|| format!("Invalid month '{}'", args[2]))?;

    let mut request = PageRequest::new(customer_id.as_str(), year, month);

    if let Some(page) = args.get(3) {
        request = request.with_page(page.parse().with_context(|| format!("Invalid page '{page}'"))?);
    }

    if let Some(size) = args.get(4) {
        let size: usize = size.parse().with_context(|| format!("Invalid size '{size}'"))?;

        if size == 0 {
            return Err(anyhow!("Page size must be at least 1"));
        }

        request = request.with_size(size);
    }

    if let Some(base_currency) = args.get(5) {
        request = request.with_base_currency(CurrencyCode::from_str(base_currency)?);
    }

    Ok(request)
}

/// Reads `TXVIEW_LOG_LEVEL`; anything `LevelFilter` cannot parse logs errors only.
fn log_level(config: &Config) -> LevelFilter {
    config.log_level.trim().parse().unwrap_or_else(|_| {
        eprintln!("TXVIEW_LOG_LEVEL '{}' is not a log level, logging errors only", config.log_level);
        LevelFilter::ERROR
    })
}

fn init_logging(level: LevelFilter) {
    // stdout is reserved for the page JSON
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .init();
}

fn write_page_to_stdout(page: &TransactionPage) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, page)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
