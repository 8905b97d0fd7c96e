//! # Repository Module
//!
//! SQLite-backed implementations of [`crate::ReceiptStore`].
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ReceiptBook                                                           │
//! │       │                                                                 │
//! │       │  store.apply("input1", Append { .. })                          │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── get / put / delete / keys / clear                                 │
//! │  └── apply  (write lock + transaction)                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (receipts table)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod receipt;
