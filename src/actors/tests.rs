use super::PartitionActor;
use crate::models::{Transaction, TransactionType};
use crate::storage::{MaterializedTable, TableKey, TransactionTable};
use crate::types::{AccountRef, CurrencyCode};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn create_transaction(id: &str, customer_id: &str, amount: &str) -> Result<Transaction> {
    Ok(Transaction {
        id: id.to_string(),
        amount: Decimal::from_str(amount)?,
        currency: CurrencyCode::from_str("EUR")?,
        account_ref: AccountRef::new("DE89370400440532013000"),
        value_date: NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| anyhow!("invalid date"))?,
        description: "Utility bill".to_string(),
        customer_id: customer_id.to_string(),
        transaction_type: TransactionType::Debit
    })
}

#[tokio::test]
async fn test_actors_write_into_the_shared_table() -> Result<()> {
    let table = Arc::new(TransactionTable::new());

    let actor_partition_0 = PartitionActor::new(0, table.clone());
    let actor_partition_1 = PartitionActor::new(1, table.clone());

    assert!(actor_partition_0.accept(create_transaction("tx-1", "customer1", "100.0")?));
    assert!(actor_partition_1.accept(create_transaction("tx-2", "customer2", "200.0")?));
    assert!(actor_partition_0.accept(create_transaction("tx-3", "customer1", "50.0")?));

    assert_eq!(actor_partition_0.partition(), 0);
    assert_eq!(actor_partition_0.despawn().await?, 2);
    assert_eq!(actor_partition_1.despawn().await?, 1);

    assert_eq!(table.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_actor_applies_updates_for_one_key_in_order() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    let actor = PartitionActor::new(0, table.clone());

    actor.accept(create_transaction("tx-1", "customer1", "10.0")?);
    actor.accept(create_transaction("tx-1", "customer1", "20.0")?);
    actor.accept(create_transaction("tx-1", "customer1", "30.0")?);

    assert_eq!(actor.despawn().await?, 3);

    let key = TableKey::derive(&create_transaction("tx-1", "customer1", "0")?)?;
    let stored = table.get(&key)?.ok_or_else(|| anyhow!("entry missing from table"))?;

    assert_eq!(table.len(), 1);
    assert_eq!(stored.amount, Decimal::from_str("30.0")?);

    Ok(())
}

#[tokio::test]
async fn test_actor_survives_unkeyable_transactions() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    let actor = PartitionActor::new(0, table.clone());

    actor.accept(create_transaction("tx-1", "customer1", "10.0")?);
    actor.accept(create_transaction("tx-2", "bad:customer", "10.0")?);
    actor.accept(create_transaction("tx-3", "customer1", "20.0")?);

    assert_eq!(actor.despawn().await?, 2);
    assert_eq!(table.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_actor_keeps_running_when_table_is_closed() -> Result<()> {
    let table = Arc::new(TransactionTable::new());
    table.close();

    let actor = PartitionActor::new(0, table.clone());
    actor.accept(create_transaction("tx-1", "customer1", "10.0")?);

    assert_eq!(actor.despawn().await?, 0);

    Ok(())
}
