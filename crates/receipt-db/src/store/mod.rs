//! # Store Module
//!
//! The key-value contract every receipt backend implements.
//!
//! ## Store Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ReceiptStore                                       │
//! │                                                                         │
//! │  get(key)        → Option<Receipt>                                     │
//! │  put(receipt)    → insert or replace under receipt.key()               │
//! │  delete(key)     → true if something was removed                       │
//! │  keys()          → open receipt keys, sorted                           │
//! │  clear()         → number of receipts removed                          │
//! │                                                                         │
//! │  apply(key, op)  → ONE atomic read-modify-write:                       │
//! │                    acquire ─► get ─► op.apply() ─► put/delete ─► release│
//! │                    Release is guaranteed: guards and transactions are  │
//! │                    dropped on every exit path.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - `BTreeMap` behind a tokio `Mutex`
//! - [`crate::ReceiptRepository`] - SQLite file

pub mod memory;

use async_trait::async_trait;
use receipt_core::{Receipt, ReceiptOp};

use crate::error::DbResult;

pub use memory::InMemoryStore;

/// A keyed receipt store.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Reads the receipt stored under `key`.
    async fn get(&self, key: &str) -> DbResult<Option<Receipt>>;

    /// Inserts or replaces the receipt under its own key.
    async fn put(&self, receipt: &Receipt) -> DbResult<()>;

    /// Removes `key`; returns whether it existed.
    async fn delete(&self, key: &str) -> DbResult<bool>;

    /// All keys with an open receipt, in ascending order.
    async fn keys(&self) -> DbResult<Vec<String>>;

    /// Removes every receipt; returns how many were removed.
    async fn clear(&self) -> DbResult<u64>;

    /// Applies `op` to the current state of `key` atomically and returns
    /// the operation's output.
    async fn apply(&self, key: &str, op: ReceiptOp) -> DbResult<Option<Receipt>>;
}
