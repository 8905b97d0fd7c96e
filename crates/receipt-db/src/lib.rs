//! # receipt-db: Receipt Storage for the Receipt Generator
//!
//! This crate provides the receipt stores and the aggregator that writes to
//! them. Pricing rules live in `receipt-core`; this crate only decides where
//! receipts are kept and guarantees each update is atomic.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Generator Data Flow                         │
//! │                                                                         │
//! │  CLI command (add / checkout)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   receipt-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │  ReceiptBook  │───►│  ReceiptStore  │    │  Migrations  │  │   │
//! │  │   │   (book.rs)   │    │   (trait)      │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    ├────────────────┤    └──────────────┘  │   │
//! │  │                        │ InMemoryStore  │                      │   │
//! │  │                        │ ReceiptRepo    │──► SQLite (pool.rs)  │   │
//! │  │                        └────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`book`] - `ReceiptBook`: save_item / checkout
//! - [`store`] - `ReceiptStore` trait and the in-memory store
//! - [`repository`] - SQLite store
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use receipt_db::{Database, DbConfig, ReceiptBook};
//!
//! let db = Database::new(DbConfig::new("receipts.db")).await?;
//! let book = ReceiptBook::new(Arc::new(db.receipts()));
//!
//! book.save_item("input1", &LineItem::parse(1, "book", "12.49")?).await?;
//! let receipt = book.checkout("input1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use book::ReceiptBook;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::receipt::ReceiptRepository;
pub use store::{InMemoryStore, ReceiptStore};
