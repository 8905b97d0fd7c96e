//! In-memory receipt store.
//!
//! Intended for tests and one-shot runs; nothing survives the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use receipt_core::{Receipt, ReceiptOp, StoreWrite};
use tokio::sync::Mutex;
use tracing::debug;

use super::ReceiptStore;
use crate::error::DbResult;

/// Receipts keyed by name, behind one lock.
///
/// Every operation holds the lock for its whole duration, so `apply` is a
/// single critical section.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    receipts: Mutex<BTreeMap<String, Receipt>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<Receipt>> {
        Ok(self.receipts.lock().await.get(key).cloned())
    }

    async fn put(&self, receipt: &Receipt) -> DbResult<()> {
        self.receipts
            .lock()
            .await
            .insert(receipt.key().to_string(), receipt.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        Ok(self.receipts.lock().await.remove(key).is_some())
    }

    async fn keys(&self) -> DbResult<Vec<String>> {
        Ok(self.receipts.lock().await.keys().cloned().collect())
    }

    async fn clear(&self) -> DbResult<u64> {
        let mut receipts = self.receipts.lock().await;
        let removed = receipts.len() as u64;
        receipts.clear();
        Ok(removed)
    }

    async fn apply(&self, key: &str, op: ReceiptOp) -> DbResult<Option<Receipt>> {
        let mut receipts = self.receipts.lock().await;

        let op_name = op.name();
        let transition = op.apply(key, receipts.get(key).cloned())?;

        match transition.write {
            StoreWrite::Put(receipt) => {
                receipts.insert(key.to_string(), receipt);
            }
            StoreWrite::Delete => {
                receipts.remove(key);
            }
            StoreWrite::Nothing => {}
        }

        debug!(key = %key, op = op_name, "Applied receipt operation in memory");

        Ok(transition.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use receipt_core::{LineItem, TaxPolicy};
    use std::sync::Arc;

    fn append(name: &str, price: &str) -> ReceiptOp {
        let item = LineItem::parse(1, name, price).unwrap();
        ReceiptOp::Append {
            line: TaxPolicy::default().price(&item),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_put_delete() {
        let store = InMemoryStore::new();
        let receipt = Receipt::open("a", Utc::now());

        assert!(store.get("a").await.unwrap().is_none());
        store.put(&receipt).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(receipt));

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_and_clear() {
        let store = InMemoryStore::new();
        store.apply("b", append("book", "1.00")).await.unwrap();
        store.apply("a", append("book", "1.00")).await.unwrap();

        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_checkout_removes_key() {
        let store = InMemoryStore::new();
        store.apply("k", append("music CD", "14.99")).await.unwrap();

        let receipt = store.apply("k", ReceiptOp::Checkout).await.unwrap().unwrap();
        assert_eq!(receipt.total().cents(), 1649);
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.apply("k", ReceiptOp::Checkout).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(InMemoryStore::new());

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.apply("shared", append("chocolate bar", "0.85")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let receipt = store.get("shared").await.unwrap().unwrap();
        assert_eq!(receipt.item_count(), 50);
        assert_eq!(receipt.total().cents(), 50 * 85);
    }
}
