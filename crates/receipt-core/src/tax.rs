//! # Tax Module
//!
//! Classifies line items and prices them with sales tax.
//!
//! ## Classification Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Tax Rate by Item Classification                        │
//! │                                                                         │
//! │                      │  not imported   │  imported                      │
//! │  ────────────────────┼─────────────────┼──────────────────────         │
//! │  exempt              │  0%             │  5%  (import only)             │
//! │  (book, chocolate,   │                 │                                │
//! │   pills)             │                 │                                │
//! │  ────────────────────┼─────────────────┼──────────────────────         │
//! │  taxable             │  10% (base)     │  15% (base + import)           │
//! │                                                                         │
//! │  Classification is a case-sensitive substring search on the name.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Flow
//! ```text
//! LineItem { 1, "music CD", 14.99 }
//!      │
//!      ▼
//! tax_rate()      → 10%
//!      │
//!      ▼
//! compute_tax()   → 1.499 → 1.50 (next nickel)
//!      │
//!      ▼
//! price_with_tax()→ 16.49
//! ```

use crate::money::Money;
use crate::types::{LineItem, ReceiptLine, TaxRate};
use crate::validation::{validate_tax_rate, ValidationResult};

// =============================================================================
// Standard Policy Constants
// =============================================================================

/// Base sales tax applied to every non-exempt item.
pub const BASE_SALES_TAX: TaxRate = TaxRate::from_bps(1000);

/// Surcharge applied to every imported item, exempt or not.
pub const IMPORT_DUTY: TaxRate = TaxRate::from_bps(500);

/// Name fragments that mark an item as exempt from the base sales tax.
pub const TAX_EXEMPT_KEYWORDS: &[&str] = &["book", "chocolate", "chocolates", "pills"];

/// Name fragment that marks an item as imported.
pub const IMPORTED_MARKER: &str = "imported";

/// Rounds `price × rate` up to the next nickel.
///
/// ## Example
/// ```rust
/// use receipt_core::money::Money;
/// use receipt_core::tax::{compute_tax, BASE_SALES_TAX};
///
/// assert_eq!(compute_tax(Money::from_cents(1000), BASE_SALES_TAX).cents(), 50);
/// ```
#[inline]
pub fn compute_tax(price: Money, rate: TaxRate) -> Money {
    price.calculate_tax(rate)
}

// =============================================================================
// Tax Class
// =============================================================================

/// The two independent facts a name can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxClass {
    pub exempt: bool,
    pub imported: bool,
}

// =============================================================================
// Tax Policy
// =============================================================================

/// The sales tax rules: rates plus the keywords that classify an item.
///
/// `TaxPolicy::default()` is the standard policy (10% base, 5% import,
/// books / chocolates / pills exempt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPolicy {
    base_rate: TaxRate,
    import_rate: TaxRate,
    exempt_keywords: Vec<String>,
    import_marker: String,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy {
            base_rate: BASE_SALES_TAX,
            import_rate: IMPORT_DUTY,
            exempt_keywords: TAX_EXEMPT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            import_marker: IMPORTED_MARKER.to_string(),
        }
    }
}

impl TaxPolicy {
    /// Creates a policy with custom rates and the standard keywords.
    pub fn with_rates(base_rate: TaxRate, import_rate: TaxRate) -> ValidationResult<Self> {
        validate_tax_rate(base_rate)?;
        validate_tax_rate(import_rate)?;
        validate_tax_rate(base_rate + import_rate)?;

        Ok(TaxPolicy {
            base_rate,
            import_rate,
            ..TaxPolicy::default()
        })
    }

    #[inline]
    pub fn base_rate(&self) -> TaxRate {
        self.base_rate
    }

    #[inline]
    pub fn import_rate(&self) -> TaxRate {
        self.import_rate
    }

    /// True if any exempt keyword occurs in `name`.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::tax::TaxPolicy;
    ///
    /// let policy = TaxPolicy::default();
    /// assert!(policy.is_tax_exempt("packet of headache pills"));
    /// assert!(!policy.is_tax_exempt("music CD"));
    /// // case-sensitive
    /// assert!(!policy.is_tax_exempt("Book"));
    /// ```
    pub fn is_tax_exempt(&self, name: &str) -> bool {
        self.exempt_keywords.iter().any(|k| name.contains(k.as_str()))
    }

    /// True if the name says the item is imported.
    pub fn is_imported(&self, name: &str) -> bool {
        name.contains(self.import_marker.as_str())
    }

    pub fn classify(&self, name: &str) -> TaxClass {
        TaxClass {
            exempt: self.is_tax_exempt(name),
            imported: self.is_imported(name),
        }
    }

    /// The combined rate for an item.
    pub fn tax_rate(&self, item: &LineItem) -> TaxRate {
        let class = self.classify(item.name());

        let base = if class.exempt {
            TaxRate::zero()
        } else {
            self.base_rate
        };

        if class.imported {
            base + self.import_rate
        } else {
            base
        }
    }

    /// Nickel-rounded tax on the item's price.
    ///
    /// Quantity is a label on the line; it does not scale the tax.
    pub fn tax_amount(&self, item: &LineItem) -> Money {
        compute_tax(item.unit_price(), self.tax_rate(item))
    }

    /// Price plus its tax.
    ///
    /// Cannot overflow: prices are capped at `MAX_PRICE_CENTS` and the
    /// rate at 100%.
    pub fn price_with_tax(&self, item: &LineItem) -> Money {
        item.unit_price() + self.tax_amount(item)
    }

    /// Prices an item into the snapshot stored on a receipt.
    pub fn price(&self, item: &LineItem) -> ReceiptLine {
        ReceiptLine {
            quantity: item.quantity(),
            name: item.name().to_string(),
            unit_price: item.unit_price(),
            tax: self.tax_amount(item),
            price: self.price_with_tax(item),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
