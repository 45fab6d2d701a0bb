use super::ingestion_engine::ReplayReport;
use super::{IngestError, IngestionEngine};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::models::{Transaction, TransactionType};
use crate::storage::{MaterializedTable, TableKey, TransactionTable};
use crate::types::{AccountRef, CurrencyCode};

const HEADER: &str = "id,amount,currency,accountRef,valueDate,description,customerId,type";

fn create_temporary_csv(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

fn create_transaction(id: &str, customer_id: &str, amount: &str) -> Result<Transaction> {
    Ok(Transaction {
        id: id.to_string(),
        amount: Decimal::from_str(amount)?,
        currency: CurrencyCode::from_str("CHF")?,
        account_ref: AccountRef::new("CH93-0000-0000-0000-0000-0"),
        value_date: NaiveDate::from_ymd_opt(2024, 3, 5).ok_or_else(|| anyhow!("invalid date"))?,
        description: "Transfer to friend".to_string(),
        customer_id: customer_id.to_string(),
        transaction_type: TransactionType::Credit
    })
}

#[tokio::test]
async fn test_engine_replays_valid_event_log() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,100.00,USD,CH93-0000-0000,2024-03-01,Salary payment,customer123,CREDIT",
        "tx-2,200.00,USD,CH93-0000-0000,2024-03-02,Online payment,customer123,CREDIT",
        "tx-3,150.00,USD,CH93-0000-0000,2024-03-03,ATM withdrawal,customer123,DEBIT"
    ])?;

    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 4, 16);
    let path = file.path().to_str().ok_or_else(|| anyhow!("non utf-8 temp path"))?;

    let report = engine.replay(path).await?;
    let applied = engine.shutdown().await;

    assert_eq!(report, ReplayReport { accepted: 3, rejected: 0 });
    assert_eq!(applied, 3);
    assert_eq!(table.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_engine_skips_malformed_and_invalid_rows() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,100.00,USD,CH93-0000-0000,2024-03-01,Salary payment,customer123,CREDIT",
        "tx-2,abc,USD,CH93-0000-0000,2024-03-02,Online payment,customer123,CREDIT",
        "tx-3,1.00,usd,CH93-0000-0000,2024-03-02,Online payment,customer123,CREDIT",
        "tx-4,1.00,USD,CH93-0000-0000,2024-02-30,Online payment,customer123,CREDIT",
        "tx-5,-1.00,USD,CH93-0000-0000,2024-03-02,Online payment,customer123,DEBIT",
        "tx-6,1.00,USD,CH93-0000-0000,2024-03-02,Online payment,cust:123,DEBIT",
        "tx-7,5.00,USD,CH93-0000-0000,2024-03-04,Shopping mall,customer123,debit"
    ])?;

    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 2, 16);
    let path = file.path().to_str().ok_or_else(|| anyhow!("non utf-8 temp path"))?;

    let report = engine.replay(path).await?;
    engine.shutdown().await;

    assert_eq!(report, ReplayReport { accepted: 2, rejected: 5 });
    assert_eq!(table.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_engine_handles_missing_event_log_without_error() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 2, 16);

    let report = engine.replay("missing.csv").await?;
    engine.shutdown().await;

    assert_eq!(report, ReplayReport::default());
    assert_eq!(table.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_submit_rejects_invalid_transactions_before_the_log() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 2, 16);

    let result = engine.submit(create_transaction("tx-1", "", "10.00")?).await;
    engine.shutdown().await;

    assert!(matches!(result, Err(IngestError::Validation(_))));
    assert_eq!(table.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_submitted_updates_to_one_key_apply_in_log_order() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 8, 4);

    for amount in 1..=50 {
        engine.submit(create_transaction("tx-1", "customer123", &format!("{amount}.00"))?).await?;
        engine.submit(create_transaction(&format!("other-{amount}"), "customer456", "1.00")?).await?;
    }

    assert_eq!(engine.shutdown().await, 100);

    let key = TableKey::derive(&create_transaction("tx-1", "customer123", "0")?)?;
    let stored = table.get(&key)?.ok_or_else(|| anyhow!("entry missing from table"))?;

    assert_eq!(table.len(), 51);
    assert_eq!(stored.amount, Decimal::from_str("50.00")?);

    Ok(())
}

#[tokio::test]
async fn test_replayed_updates_to_one_key_apply_in_log_order() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,10.00,CHF,CH93-0000-0000,2024-03-05,Transfer to friend,customer123,CREDIT",
        "tx-1,,CHF,CH93-0000-0000,2024-03-05,Transfer to friend,customer123,CREDIT",
        "tx-1,20.00,CHF,CH93-0000-0000,2024-03-05,Transfer to friend,customer123,CREDIT",
        "tx-1,30.00,CHF,CH93-0000-0000,2024-03-05,Transfer to friend,customer123,CREDIT"
    ])?;

    let table = Arc::new(TransactionTable::new());
    let engine = IngestionEngine::start(table.clone(), 4, 1);
    let path = file.path().to_str().ok_or_else(|| anyhow!("non utf-8 temp path"))?;

    let report = engine.replay(path).await?;
    let applied = engine.shutdown().await;

    let key = TableKey::derive(&create_transaction("tx-1", "customer123", "0")?)?;
    let stored = table.get(&key)?.ok_or_else(|| anyhow!("entry missing from table"))?;

    assert_eq!(report, ReplayReport { accepted: 3, rejected: 1 });
    assert_eq!(applied, 3);
    assert_eq!(table.len(), 1);
    assert_eq!(stored.amount, Decimal::from_str("30.00")?);

    Ok(())
}
