//! # Error Types
//!
//! Domain-specific error types for planeta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  planeta-core errors (this file)                                       │
//! │  ├── CoreError        - Checkout / lookup failures                     │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  planeta-auth errors (separate crate)                                  │
//! │  └── AuthError        - Identity backend rejections                    │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the screens see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen alert           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations have no error type at all: an unknown product id is a
//! no-op, and bad quantities are stopped by validation before the cart is
//! touched.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog entry cannot be found.
    #[error("Planet not found: {0}")]
    PlanetNotFound(String),

    /// Checkout was attempted with nothing in the bag.
    ///
    /// ## User Workflow
    /// ```text
    /// Bag screen (0 items)
    ///      │
    ///      ▼
    /// "Finalizar Compra" ── place_order()
    ///      │
    ///      ▼
    /// EmptyCart ── UI keeps the button disabled
    /// ```
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// Payment method key is not one the checkout screen offers.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the rules the login and signup forms apply before calling
/// a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, non-numeric age).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
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
    fn test_error_messages() {
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot place an order with an empty cart"
        );
        assert_eq!(
            CoreError::PlanetNotFound("Plutão".to_string()).to_string(),
            "Planet not found: Plutão"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("email").to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("email").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
