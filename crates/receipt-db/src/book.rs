//! # Receipt Book
//!
//! Prices line items and accumulates them under receipt keys.
//!
//! ## Save / Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  save_item("input1", book)                                             │
//! │       │                                                                 │
//! │       ├── validate key                                                 │
//! │       ├── TaxPolicy::price(book)  → ReceiptLine (pure)                 │
//! │       └── store.apply(key, Append) → Receipt (atomic)                  │
//! │                                                                         │
//! │  checkout("input1")                                                    │
//! │       │                                                                 │
//! │       └── store.apply(key, Checkout) → Some(receipt), key removed      │
//! │                                        None if the key was never open  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use receipt_core::validation::validate_receipt_key;
use receipt_core::{LineItem, Receipt, ReceiptOp, ReceiptState, TaxPolicy};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::ReceiptStore;

/// The receipt aggregator: one tax policy, one store.
///
/// ## Usage
/// ```rust,ignore
/// let book = ReceiptBook::new(Arc::new(InMemoryStore::new()));
///
/// book.save_item("input1", &LineItem::parse(1, "book", "12.49")?).await?;
/// let receipt = book.checkout("input1").await?;
/// ```
#[derive(Clone)]
pub struct ReceiptBook {
    store: Arc<dyn ReceiptStore>,
    policy: TaxPolicy,
}

impl std::fmt::Debug for ReceiptBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptBook")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ReceiptBook {
    /// Creates a book using the standard tax policy.
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self::with_policy(store, TaxPolicy::default())
    }

    /// Creates a book with a custom tax policy.
    pub fn with_policy(store: Arc<dyn ReceiptStore>, policy: TaxPolicy) -> Self {
        ReceiptBook { store, policy }
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Prices `item` and appends it to the receipt under `key`.
    ///
    /// Opens the receipt if the key is absent. Returns the receipt as it
    /// stands after the append.
    pub async fn save_item(&self, key: &str, item: &LineItem) -> DbResult<Receipt> {
        let key = normalize_key(key)?;
        let line = self.policy.price(item);

        debug!(
            key = %key,
            name = %line.name,
            quantity = line.quantity,
            tax = %line.tax,
            price = %line.price,
            "Saving receipt item"
        );

        let receipt = self
            .store
            .apply(
                key,
                ReceiptOp::Append {
                    line,
                    at: Utc::now(),
                },
            )
            .await?
            .ok_or_else(|| DbError::Internal(format!("append to {key} returned no receipt")))?;

        debug!(
            key = %key,
            items = receipt.item_count(),
            sales_tax = %receipt.sales_tax(),
            total = %receipt.total(),
            "Receipt updated"
        );

        Ok(receipt)
    }

    /// Returns the receipt under `key` and removes it.
    ///
    /// An unknown key yields `Ok(None)`.
    pub async fn checkout(&self, key: &str) -> DbResult<Option<Receipt>> {
        let key = normalize_key(key)?;
        let receipt = self.store.apply(key, ReceiptOp::Checkout).await?;

        match &receipt {
            Some(r) => info!(
                key = %key,
                items = r.item_count(),
                total = %r.total(),
                "Receipt checked out"
            ),
            None => debug!(key = %key, "Checkout of absent receipt"),
        }

        Ok(receipt)
    }

    /// Reads the receipt under `key` without removing it.
    pub async fn peek(&self, key: &str) -> DbResult<Option<Receipt>> {
        let key = normalize_key(key)?;
        self.store.get(key).await
    }

    /// Whether `key` currently has an open receipt.
    pub async fn state(&self, key: &str) -> DbResult<ReceiptState> {
        Ok(ReceiptState::of(self.peek(key).await?.as_ref()))
    }

    /// Keys of all open receipts.
    pub async fn open_keys(&self) -> DbResult<Vec<String>> {
        self.store.keys().await
    }

    /// Drops every open receipt.
    pub async fn clear(&self) -> DbResult<u64> {
        let removed = self.store.clear().await?;
        info!(removed, "Cleared receipts");
        Ok(removed)
    }
}

fn normalize_key(key: &str) -> DbResult<&str> {
    validate_receipt_key(key)?;
    Ok(key.trim())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use receipt_core::CoreError;

    fn book() -> ReceiptBook {
        ReceiptBook::new(Arc::new(InMemoryStore::new()))
    }

    fn item(name: &str, price: &str) -> LineItem {
        LineItem::parse(1, name, price).unwrap()
    }

    #[tokio::test]
    async fn test_save_receipt_item() {
        let book = book();
        let receipt = book.save_item("input1", &item("book", "12.49")).await.unwrap();

        assert_eq!(receipt.item_count(), 1);
        assert_eq!(receipt.items()[0].name, "book");
        assert_eq!(receipt.items()[0].price.cents(), 1249);
    }

    #[tokio::test]
    async fn test_save_multiple_items() {
        let book = book();

        let r = book.save_item("input1", &item("book", "12.49")).await.unwrap();
        assert_eq!(r.item_count(), 1);
        let r = book.save_item("input1", &item("music CD", "14.99")).await.unwrap();
        assert_eq!(r.item_count(), 2);
        let r = book
            .save_item("input1", &item("chocolate bar", "0.85"))
            .await
            .unwrap();
        assert_eq!(r.item_count(), 3);

        assert_eq!(r.total().to_string(), "29.83");
        assert_eq!(r.sales_tax().to_string(), "1.50");
        assert_eq!(r.items()[0].name, "book");
    }

    #[tokio::test]
    async fn test_retrieve_receipt() {
        let book = book();
        book.save_item("input2", &item("imported box of chocolates", "10.00"))
            .await
            .unwrap();
        book.save_item("input2", &item("imported bottle of perfume", "47.50"))
            .await
            .unwrap();

        let receipt = book.checkout("input2").await.unwrap().unwrap();
        assert_eq!(receipt.total().to_string(), "65.15");
        assert_eq!(receipt.sales_tax().to_string(), "7.65");

        assert_eq!(book.state("input2").await.unwrap(), ReceiptState::Absent);
    }

    #[tokio::test]
    async fn test_retrieve_non_existent_receipt() {
        let book = book();
        assert!(book.checkout("input2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_after_checkout_starts_fresh() {
        let book = book();
        book.save_item("k", &item("book", "12.49")).await.unwrap();
        book.checkout("k").await.unwrap();

        let receipt = book.save_item("k", &item("music CD", "14.99")).await.unwrap();
        assert_eq!(receipt.item_count(), 1);
        assert_eq!(receipt.total().cents(), 1649);
    }

    #[tokio::test]
    async fn test_keys_are_trimmed_and_validated() {
        let book = book();
        book.save_item(" table 4 ", &item("book", "1.00")).await.unwrap();
        assert_eq!(book.open_keys().await.unwrap(), vec!["table 4"]);
        assert_eq!(book.state("table 4").await.unwrap(), ReceiptState::Open);

        assert!(matches!(
            book.save_item("  ", &item("book", "1.00")).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(book.checkout("").await, Err(DbError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_item_rejects_overflowing_total() {
        let store = Arc::new(InMemoryStore::new());
        let book = ReceiptBook::new(store.clone());

        let receipt = book.save_item("big", &item("book", "12.49")).await.unwrap();
        let mut json = serde_json::to_value(&receipt).unwrap();
        json["total"] = serde_json::json!(i64::MAX - 100);
        let near_limit: Receipt = serde_json::from_value(json).unwrap();
        store.put(&near_limit).await.unwrap();

        let err = book
            .save_item("big", &item("music CD", "14.99"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Receipt(CoreError::TotalOverflow { .. })
        ));
        assert_eq!(book.peek("big").await.unwrap(), Some(near_limit));
    }

    #[tokio::test]
    async fn test_quantity_is_carried_but_not_multiplied() {
        let book = book();
        let receipt = book
            .save_item("k", &LineItem::parse(2, "music CD", "14.99").unwrap())
            .await
            .unwrap();

        assert_eq!(receipt.items()[0].quantity, 2);
        assert_eq!(receipt.items()[0].price.to_string(), "16.49");
        assert_eq!(receipt.total().to_string(), "16.49");
        assert_eq!(receipt.sales_tax().to_string(), "1.50");
    }

    #[tokio::test]
    async fn test_clear() {
        let book = book();
        book.save_item("a", &item("book", "1.00")).await.unwrap();
        book.save_item("b", &item("book", "1.00")).await.unwrap();

        assert_eq!(book.clear().await.unwrap(), 2);
        assert!(book.peek("a").await.unwrap().is_none());
    }
}
