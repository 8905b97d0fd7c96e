//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    14.99 × 0.10 = 1.4990000000000001                                    │
//! │    47.50 × 0.15 = 7.124999999999999  ← rounds to the wrong nickel      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents × Basis Points                             │
//! │    4750 cents × 1500 bps = 7_125_000 (exact, in 1/10000 of a cent)     │
//! │    The only rounding is deliberate: 4 significant digits, then nickel  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::money::Money;
//!
//! // Parse from the decimal text a caller supplies
//! let price: Money = "14.99".parse().unwrap();
//! assert_eq!(price.cents(), 1499);
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(150);
//! assert_eq!(total.to_string(), "16.49");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Sales tax is always a whole number of these.
pub const NICKEL: Money = Money::from_cents(5);

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

/// Significant digits kept when the raw tax is first rounded.
const TAX_PRECISION_DIGITS: u32 = 4;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic stays closed under subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serialized as a plain integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// let price = Money::from_cents(1249); // Represents 12.49
    /// assert_eq!(price.cents(), 1249);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates sales tax, rounded UP to the next nickel.
    ///
    /// ## Nickel Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  STEP 1: keep 4 significant digits (round half to even)             │
    /// │    4.1985 → 4.198    10.003 → 10.00    10.5015 → 10.50              │
    /// │                                                                     │
    /// │  STEP 2: NICKEL ROUNDING (ceiling to 0.05)                          │
    /// │    Any partial nickel is charged as a whole nickel:                 │
    /// │    0.0125 → 0.05     1.499 → 1.50     7.125 → 7.15                  │
    /// │    0.5625 → 0.60     4.198 → 4.20                                   │
    /// │                                                                     │
    /// │    Exact multiples stay put:                                        │
    /// │    0.50 → 0.50       10.00 → 10.00    0.00 → 0.00                   │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// `cents × bps` is the exact tax in 1/10000 of a cent. After step 1 a
    /// nickel is `5 × 10000` of those units, so step 2 is a ceiling
    /// division.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    /// use receipt_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(1499); // 14.99
    /// let tax = price.calculate_tax(TaxRate::from_bps(1000)); // 10%
    /// // 14.99 × 10% = 1.499 → next nickel is 1.50
    /// assert_eq!(tax.cents(), 150);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128: cents × bps can exceed i64 for very large amounts
        let raw = round_significant(self.0 as i128 * rate.bps() as i128, TAX_PRECISION_DIGITS);
        let nickel = NICKEL.0 as i128 * BPS_SCALE;

        let mut nickels = raw / nickel;
        if raw % nickel > 0 {
            nickels += 1;
        }

        Money::from_cents((nickels * NICKEL.0 as i128) as i64)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Rounds `value` half to even so at most `digits` significant digits remain.
fn round_significant(value: i128, digits: u32) -> i128 {
    let magnitude = value.unsigned_abs();
    let len = magnitude.checked_ilog10().map_or(1, |l| l + 1);
    if len <= digits {
        return value;
    }

    let scale = 10u128.pow(len - digits);
    let half = scale / 2;
    let mut kept = magnitude / scale;
    let dropped = magnitude % scale;
    if dropped > half || (dropped == half && kept % 2 == 1) {
        kept += 1;
    }

    let rounded = (kept * scale) as i128;
    if value < 0 {
        -rounded
    } else {
        rounded
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a non-negative decimal amount such as `"12.49"`, `"10"` or `"0.5"`.
///
/// ## Rejected Input
/// ```text
/// ""        → Required
/// "-1.00"   → OutOfRange (negative)
/// "abc"     → InvalidFormat
/// "1.999"   → InvalidFormat (sub-cent precision)
/// "1e3"     → InvalidFormat
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        if s.starts_with('-') {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let (major, minor) = s.split_once('.').unwrap_or((s, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("must be a decimal amount"));
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major) || !all_digits(minor) {
            return Err(invalid("must be a decimal amount"));
        }

        if minor.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount is too large"))?
        };

        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("must be a decimal amount"))? * 10,
            _ => minor.parse().map_err(|_| invalid("must be a decimal amount"))?,
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the amount the way receipts print it: `16.49`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
