//! # Domain Types
//!
//! Core domain types used throughout the receipt generator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   price()    ┌─────────────────┐                  │
//! │  │    LineItem     │ ───────────► │  ReceiptLine    │                  │
//! │  │  ─────────────  │  TaxPolicy   │  ─────────────  │                  │
//! │  │  quantity       │              │  quantity       │                  │
//! │  │  name           │              │  name           │                  │
//! │  │  unit_price     │              │  unit_price     │                  │
//! │  └─────────────────┘              │  tax            │                  │
//! │                                   │  price          │                  │
//! │  ┌─────────────────┐              └────────┬────────┘                  │
//! │  │    TaxRate      │                       │ push()                    │
//! │  │  ─────────────  │                       ▼                           │
//! │  │  bps (u32)      │              ┌─────────────────┐                  │
//! │  │  1000 = 10%     │              │    Receipt      │ (receipt.rs)     │
//! │  └─────────────────┘              └─────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_quantity, ValidationResult};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (base sales tax), 500 bps = 5% (import duty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Surcharges stack: 10% base + 5% import = 15%.
impl Add for TaxRate {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        TaxRate(self.0 + other.0)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of a shopping basket, before tax.
///
/// The name carries the classification: `TaxPolicy` looks for exempt
/// keywords and the `imported` marker in it. Fields are private so an
/// item can only exist in a validated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    quantity: i64,
    name: String,
    unit_price: Money,
}

impl LineItem {
    /// Creates a validated line item.
    ///
    /// ## Errors
    /// - quantity not positive
    /// - empty or overlong name
    /// - negative unit price, or one above MAX_PRICE_CENTS
    pub fn new(quantity: i64, name: impl Into<String>, unit_price: Money) -> ValidationResult<Self> {
        let name = name.into();

        validate_quantity(quantity)?;
        validate_product_name(&name)?;
        validate_price(unit_price)?;

        Ok(LineItem {
            quantity,
            name: name.trim().to_string(),
            unit_price,
        })
    }

    /// Creates a line item from a textual price such as `"12.49"`.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::LineItem;
    ///
    /// let book = LineItem::parse(1, "book", "12.49").unwrap();
    /// assert_eq!(book.unit_price().cents(), 1249);
    ///
    /// assert!(LineItem::parse(1, "book", "twelve").is_err());
    /// ```
    pub fn parse(quantity: i64, name: impl Into<String>, price: &str) -> ValidationResult<Self> {
        let unit_price: Money = price.parse()?;
        Self::new(quantity, name, unit_price)
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

// =============================================================================
// Receipt Line
// =============================================================================

/// A priced line on a receipt.
/// Uses snapshot pattern to freeze the item and its tax at time of saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Quantity as entered; printed, never multiplied into the price.
    pub quantity: i64,
    /// Item name at time of saving (frozen).
    pub name: String,
    /// Unit price before tax (frozen).
    pub unit_price: Money,
    /// Nickel-rounded sales tax on the unit price.
    pub tax: Money,
    /// Line price including tax; this is what the receipt prints.
    pub price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_tax_rate_add_and_display() {
        let rate = TaxRate::from_bps(1000) + TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 1500);
        assert_eq!(rate.to_string(), "15%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::default(), TaxRate::zero());
    }

    #[test]
    fn test_line_item_new() {
        let item = LineItem::new(2, "  chocolate bar ", Money::from_cents(85)).unwrap();
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.name(), "chocolate bar");
        assert_eq!(item.unit_price().cents(), 85);
    }

    #[test]
    fn test_line_item_accepts_any_positive_quantity() {
        let item = LineItem::parse(1000, "book", "12.49").unwrap();
        assert_eq!(item.quantity(), 1000);
        assert!(LineItem::parse(i64::MAX, "book", "12.49").is_ok());
    }

    #[test]
    fn test_line_item_rejects_price_above_cap() {
        let max = Money::from_cents(crate::MAX_PRICE_CENTS);
        assert!(LineItem::new(1, "music CD", max).is_ok());
        assert!(matches!(
            LineItem::parse(1, "music CD", "92233720368547758.07"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_line_item_rejects_invalid_input() {
        assert!(matches!(
            LineItem::new(0, "book", Money::from_cents(100)),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            LineItem::new(-1, "book", Money::from_cents(100)),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            LineItem::new(1, "   ", Money::from_cents(100)),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            LineItem::new(1, "book", Money::from_cents(-1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            LineItem::parse(1, "book", "12.4x"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_free_item_is_allowed() {
        let item = LineItem::parse(1, "sample", "0").unwrap();
        assert_eq!(item.unit_price(), Money::zero());
    }
}
