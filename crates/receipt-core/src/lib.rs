//! # receipt-core: Pure Pricing Logic for the Receipt Generator
//!
//! This crate is the **heart** of the receipt generator. It contains the
//! tax classification, nickel rounding and receipt aggregation rules as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Generator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    receipt-cli                                  │   │
//! │  │        add ──► show ──► checkout ──► print receipt              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               receipt-db (ReceiptBook + stores)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ receipt-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    tax    │  │  receipt  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │ TaxPolicy │  │  Receipt  │  │   │
//! │  │   │  TaxRate  │  │  nickels  │  │  pricing  │  │ ReceiptOp │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, ReceiptLine, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tax`] - Tax classification and nickel-rounded pricing
//! - [`receipt`] - Receipt aggregate and its state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{LineItem, TaxPolicy};
//!
//! let policy = TaxPolicy::default();
//! let cd = LineItem::parse(1, "music CD", "14.99").unwrap();
//!
//! // 14.99 × 10% = 1.499 → 1.50
//! assert_eq!(policy.price_with_tax(&cd).to_string(), "16.49");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{Receipt, ReceiptOp, ReceiptState, StoreWrite, Transition};
pub use tax::{compute_tax, TaxClass, TaxPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest accepted unit price, in cents (1,000,000,000.00).
///
/// Price plus tax at the 100% rate ceiling stays far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Maximum item name length, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum receipt key length, in characters.
pub const MAX_KEY_LENGTH: usize = 100;
