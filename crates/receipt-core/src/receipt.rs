//! # Receipt Module
//!
//! The receipt aggregate and its per-key state machine.
//!
//! ## Receipt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Key Lifecycle                               │
//! │                                                                         │
//! │              Append                       Append                        │
//! │   ┌────────┐ ──────────────────► ┌──────┐ ───┐                          │
//! │   │ Absent │                     │ Open │ ◄──┘                          │
//! │   └────────┘ ◄────────────────── └──────┘                               │
//! │      │  ▲           Checkout                                            │
//! │      └──┘ Checkout (returns nothing, not an error)                      │
//! │                                                                         │
//! │  A key that was checked out starts over on the next Append.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transitions are pure: a store reads the current receipt, calls
//! [`ReceiptOp::apply`], and performs the returned [`StoreWrite`] inside the
//! same lock or transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ReceiptLine;

// =============================================================================
// Receipt
// =============================================================================

/// Priced lines accumulated under one key, with running totals.
///
/// ## Invariants
/// - `total == Σ items.price`
/// - `sales_tax == Σ items.tax`
///
/// Fields are private and `push` is the only mutator, so a receipt built
/// in-process always satisfies both. Receipts read back from storage are
/// checked with [`Receipt::verify`]. Running totals use checked addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    key: String,
    items: Vec<ReceiptLine>,
    sales_tax: Money,
    total: Money,
    opened_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Receipt {
    /// Creates an empty receipt.
    pub fn open(key: impl Into<String>, at: DateTime<Utc>) -> Self {
        Receipt {
            key: key.into(),
            items: Vec::new(),
            sales_tax: Money::zero(),
            total: Money::zero(),
            opened_at: at,
            updated_at: at,
        }
    }

    /// Appends a priced line and bumps the running totals.
    ///
    /// On overflow the receipt is left unchanged.
    pub fn push(&mut self, line: ReceiptLine, at: DateTime<Utc>) -> CoreResult<()> {
        let overflow = || CoreError::TotalOverflow {
            key: self.key.clone(),
        };
        let sales_tax = self.sales_tax.checked_add(line.tax).ok_or_else(overflow)?;
        let total = self.total.checked_add(line.price).ok_or_else(overflow)?;

        self.sales_tax = sales_tax;
        self.total = total;
        self.items.push(line);
        self.updated_at = at;
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lines in the order they were saved.
    pub fn items(&self) -> &[ReceiptLine] {
        &self.items
    }

    pub fn sales_tax(&self) -> Money {
        self.sales_tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks the running totals against the lines.
    pub fn verify(&self) -> CoreResult<()> {
        let sum = |pick: fn(&ReceiptLine) -> Money| {
            self.items
                .iter()
                .try_fold(Money::zero(), |acc, l| acc.checked_add(pick(l)))
                .ok_or_else(|| CoreError::TotalOverflow {
                    key: self.key.clone(),
                })
        };
        let line_tax = sum(|l| l.tax)?;
        let line_total = sum(|l| l.price)?;

        if line_tax != self.sales_tax || line_total != self.total {
            return Err(CoreError::InconsistentReceipt {
                key: self.key.clone(),
                recorded_tax: self.sales_tax,
                recorded_total: self.total,
                line_tax,
                line_total,
            });
        }

        Ok(())
    }
}

// =============================================================================
// State Machine
// =============================================================================

/// Whether a key currently has a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptState {
    Absent,
    Open,
}

impl ReceiptState {
    pub fn of(receipt: Option<&Receipt>) -> Self {
        match receipt {
            Some(_) => ReceiptState::Open,
            None => ReceiptState::Absent,
        }
    }
}

/// What a store must do after applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// Insert or replace the receipt under its key.
    Put(Receipt),
    /// Remove the key.
    Delete,
    /// Leave the store untouched.
    Nothing,
}

/// Result of applying a [`ReceiptOp`] to the current state of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub write: StoreWrite,
    /// Handed back to the caller.
    pub output: Option<Receipt>,
}

/// An atomic read-modify-write on one receipt key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptOp {
    /// Add a priced line, opening the receipt if needed.
    Append {
        line: ReceiptLine,
        at: DateTime<Utc>,
    },
    /// Hand the receipt back and remove it.
    Checkout,
}

impl ReceiptOp {
    /// Computes the next state of `key` from its current receipt.
    ///
    /// Fails only when an append would overflow the running totals; the
    /// caller then writes nothing.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use receipt_core::receipt::{ReceiptOp, StoreWrite};
    ///
    /// let t = ReceiptOp::Checkout.apply("missing", None).unwrap();
    /// assert_eq!(t.write, StoreWrite::Nothing);
    /// assert!(t.output.is_none());
    /// ```
    pub fn apply(self, key: &str, current: Option<Receipt>) -> CoreResult<Transition> {
        let transition = match self {
            ReceiptOp::Append { line, at } => {
                let mut receipt = current.unwrap_or_else(|| Receipt::open(key, at));
                receipt.push(line, at)?;
                Transition {
                    write: StoreWrite::Put(receipt.clone()),
                    output: Some(receipt),
                }
            }
            ReceiptOp::Checkout => match current {
                Some(receipt) => Transition {
                    write: StoreWrite::Delete,
                    output: Some(receipt),
                },
                None => Transition {
                    write: StoreWrite::Nothing,
                    output: None,
                },
            },
        };
        Ok(transition)
    }

    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            ReceiptOp::Append { .. } => "append",
            ReceiptOp::Checkout => "checkout",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxPolicy;
    use crate::types::LineItem;
    use proptest::prelude::*;

    fn line(name: &str, price: &str) -> ReceiptLine {
        TaxPolicy::default().price(&LineItem::parse(1, name, price).unwrap())
    }

    fn append(name: &str, price: &str) -> ReceiptOp {
        ReceiptOp::Append {
            line: line(name, price),
            at: Utc::now(),
        }
    }

    #[test]
    fn test_append_opens_absent_receipt() {
        let t = append("book", "12.49").apply("input1", None).unwrap();

        let receipt = t.output.unwrap();
        assert_eq!(receipt.key(), "input1");
        assert_eq!(receipt.item_count(), 1);
        assert_eq!(receipt.items()[0].name, "book");
        assert_eq!(t.write, StoreWrite::Put(receipt));
    }

    #[test]
    fn test_append_accumulates_totals() {
        let mut current = None;
        for (name, price) in [("book", "12.49"), ("music CD", "14.99"), ("chocolate bar", "0.85")] {
            current = append(name, price).apply("input1", current).unwrap().output;
        }

        let receipt = current.unwrap();
        assert_eq!(receipt.item_count(), 3);
        assert_eq!(receipt.sales_tax().cents(), 150);
        assert_eq!(receipt.total().cents(), 2983);
        assert_eq!(receipt.items()[0].name, "book");
        assert!(receipt.verify().is_ok());
    }

    #[test]
    fn test_checkout_open_receipt_deletes() {
        let open = append("book", "12.49").apply("k", None).unwrap().output;
        let t = ReceiptOp::Checkout.apply("k", open.clone()).unwrap();

        assert_eq!(t.write, StoreWrite::Delete);
        assert_eq!(t.output, open);
    }

    #[test]
    fn test_checkout_absent_receipt_is_not_an_error() {
        let t = ReceiptOp::Checkout.apply("nope", None).unwrap();
        assert_eq!(t.write, StoreWrite::Nothing);
        assert_eq!(t.output, None);
        assert_eq!(ReceiptState::of(t.output.as_ref()), ReceiptState::Absent);
    }

    #[test]
    fn test_verify_detects_tampered_totals() {
        let receipt = append("music CD", "14.99").apply("k", None).unwrap().output.unwrap();
        let mut json = serde_json::to_value(&receipt).unwrap();
        json["total"] = serde_json::json!(1);

        let tampered: Receipt = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.verify(),
            Err(CoreError::InconsistentReceipt { .. })
        ));
    }

    #[test]
    fn test_append_past_total_limit_fails_without_change() {
        let mut receipt = append("book", "12.49").apply("big", None).unwrap().output.unwrap();
        receipt.total = Money::from_cents(i64::MAX - 100);
        let before = receipt.clone();

        assert!(matches!(
            receipt.push(line("music CD", "14.99"), Utc::now()),
            Err(CoreError::TotalOverflow { .. })
        ));
        assert_eq!(receipt, before);

        assert!(matches!(
            append("music CD", "14.99").apply("big", Some(receipt)),
            Err(CoreError::TotalOverflow { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_totals_match_lines(prices in proptest::collection::vec(0i64..100_000, 1..20)) {
            let policy = TaxPolicy::default();
            let mut receipt = Receipt::open("k", Utc::now());

            for (i, cents) in prices.iter().enumerate() {
                let name = if i % 2 == 0 { "imported perfume" } else { "book" };
                let item = LineItem::new(1, name, Money::from_cents(*cents)).unwrap();
                receipt.push(policy.price(&item), Utc::now()).unwrap();
            }

            prop_assert!(receipt.verify().is_ok());
            prop_assert_eq!(receipt.item_count(), prices.len());
        }
    }
}
