//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── CoreError        - Receipt integrity and overflow failures        │
//! │  └── ValidationError  - Invalid input (bad price, quantity, name, key) │
//! │                                                                         │
//! │  receipt-db errors (separate crate)                                    │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → anyhow (CLI)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, key, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A receipt's running totals disagree with its lines.
    ///
    /// ## When This Occurs
    /// - A stored payload was edited by hand
    /// - A payload written by an incompatible version was loaded
    ///
    /// Receipts built through `Receipt::push` can never reach this state.
    #[error(
        "Receipt {key} is inconsistent: recorded tax {recorded_tax} / total {recorded_total}, \
         lines sum to {line_tax} / {line_total}"
    )]
    InconsistentReceipt {
        key: String,
        recorded_tax: Money,
        recorded_total: Money,
        line_tax: Money,
        line_total: Money,
    },

    /// Appending a line would push a running total past `i64` cents.
    #[error("Receipt {key} cannot take another line: running totals would overflow")]
    TotalOverflow { key: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// This is the invalid-input error of the pricing API: every rejected
/// line item or receipt key surfaces as one of these variants, at
/// construction time, before any tax is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price is required");

        let err = ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a decimal amount".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "price has invalid format: must be a decimal amount"
        );
    }

    #[test]
    fn test_inconsistent_receipt_message() {
        let err = CoreError::InconsistentReceipt {
            key: "input1".to_string(),
            recorded_tax: Money::from_cents(150),
            recorded_total: Money::from_cents(2983),
            line_tax: Money::from_cents(150),
            line_total: Money::from_cents(2900),
        };
        assert_eq!(
            err.to_string(),
            "Receipt input1 is inconsistent: recorded tax 1.50 / total 29.83, \
             lines sum to 1.50 / 29.00"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
