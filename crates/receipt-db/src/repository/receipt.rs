//! # Receipt Repository
//!
//! SQLite persistence for open receipts.
//!
//! ## Atomic Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   apply("input1", op)                                   │
//! │                                                                         │
//! │  1. LOCK      write_lock.lock()      ← serializes writers in-process   │
//! │  2. BEGIN     pool.begin()                                             │
//! │  3. READ      SELECT payload FROM receipts WHERE key = ?               │
//! │  4. DECIDE    op.apply(key, current) (pure, receipt-core)              │
//! │  5. WRITE     UPSERT or DELETE                                         │
//! │  6. COMMIT    tx.commit()                                              │
//! │                                                                         │
//! │  Any `?` between 2 and 6 drops the transaction → ROLLBACK,             │
//! │  and dropping the guard releases the lock.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use receipt_core::{Receipt, ReceiptOp, StoreWrite};
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ReceiptStore;

/// Repository for receipt database operations.
///
/// Obtain one from [`crate::Database::receipts`]; all repositories from the
/// same `Database` share one write lock.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool, write_lock: Arc<Mutex<()>>) -> Self {
        ReceiptRepository { pool, write_lock }
    }

    /// Number of open receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Query Helpers
// =============================================================================
// Generic over the executor so the same SQL runs on the pool or inside a
// transaction.

async fn fetch_receipt<'e, E>(executor: E, key: &str) -> DbResult<Option<Receipt>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT payload FROM receipts WHERE key = ?1")
        .bind(key.to_string())
        .fetch_optional(executor)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let payload: String = row.try_get("payload")?;
    let receipt: Receipt = serde_json::from_str(&payload)?;
    receipt.verify()?;

    Ok(Some(receipt))
}

async fn upsert_receipt<'e, E>(executor: E, receipt: &Receipt) -> DbResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let payload = serde_json::to_string(receipt)?;

    sqlx::query(
        r#"
        INSERT INTO receipts (
            key, payload, item_count,
            sales_tax_cents, total_cents,
            opened_at, updated_at
        ) VALUES (
            ?1, ?2, ?3,
            ?4, ?5,
            ?6, ?7
        )
        ON CONFLICT(key) DO UPDATE SET
            payload = excluded.payload,
            item_count = excluded.item_count,
            sales_tax_cents = excluded.sales_tax_cents,
            total_cents = excluded.total_cents,
            opened_at = excluded.opened_at,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(receipt.key().to_string())
    .bind(payload)
    .bind(receipt.item_count() as i64)
    .bind(receipt.sales_tax().cents())
    .bind(receipt.total().cents())
    .bind(receipt.opened_at())
    .bind(receipt.updated_at())
    .execute(executor)
    .await?;

    Ok(())
}

async fn delete_receipt<'e, E>(executor: E, key: &str) -> DbResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM receipts WHERE key = ?1")
        .bind(key.to_string())
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

// =============================================================================
// Store Implementation
// =============================================================================

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    async fn get(&self, key: &str) -> DbResult<Option<Receipt>> {
        fetch_receipt(&self.pool, key).await
    }

    async fn put(&self, receipt: &Receipt) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;
        upsert_receipt(&self.pool, receipt).await
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        let _guard = self.write_lock.lock().await;
        delete_receipt(&self.pool, key).await
    }

    async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM receipts ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    async fn clear(&self) -> DbResult<u64> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("DELETE FROM receipts")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn apply(&self, key: &str, op: ReceiptOp) -> DbResult<Option<Receipt>> {
        let _guard = self.write_lock.lock().await;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let op_name = op.name();
        let current = fetch_receipt(&mut *tx, key).await?;
        let transition = op.apply(key, current)?;

        match &transition.write {
            StoreWrite::Put(receipt) => upsert_receipt(&mut *tx, receipt).await?,
            StoreWrite::Delete => {
                delete_receipt(&mut *tx, key).await?;
            }
            StoreWrite::Nothing => {}
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(key = %key, op = op_name, "Applied receipt operation");

        Ok(transition.output)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
