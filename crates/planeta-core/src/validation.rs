//! # Validation Module
//!
//! Input validation for the storefront forms and command arguments.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen (TypeScript form schema)                              │
//! │  └── Immediate field-level feedback                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: same rules, enforced before any store operation      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── Total operations: never reject, only merge / clamp / no-op        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use planeta_core::validation::{validate_login, validate_quantity};
//!
//! assert!(validate_login("ana@planeta.com", "segredo123").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ProfileData;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length on both the login and the signup form.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Accepted age range on the signup form.
pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=120;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address shape.
///
/// ## Rules
/// - Not blank
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must be a valid e-mail address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let dot_inside = domain
        .find('.')
        .map(|idx| idx > 0 && !domain.ends_with('.'))
        .unwrap_or(false);
    if !dot_inside {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a password.
///
/// ## Rules
/// - Not blank
/// - At least [`MIN_PASSWORD_LEN`] characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a free-text field that must not be blank.
pub fn validate_required(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::required(field)),
    }
}

/// Validates the signup age field.
///
/// ## Rules
/// - Must be numeric (decimals accepted, as the form's number field does)
/// - Must fall within [`AGE_RANGE`]
pub fn validate_age(age: &str) -> ValidationResult<()> {
    let age = age.trim();
    if age.is_empty() {
        return Err(ValidationError::required("age"));
    }

    let value: f64 = age.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "age".to_string(),
        reason: "must contain only numbers".to_string(),
    })?;

    let (min, max) = (*AGE_RANGE.start(), *AGE_RANGE.end());
    if !value.is_finite() || value < min as f64 || value > max as f64 {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the login form (email + password).
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    validate_email(email)?;
    validate_password(password)
}

/// Validates the signup form.
///
/// ## Rules
/// ```text
///   name      required
///   email     required, valid address
///   age       required, number in 1..=120
///   sex       required
///   planet    required
///   password  required, ≥ 8 characters
/// ```
///
/// Stops at the first failing field, in the form's field order.
pub fn validate_signup(profile: &ProfileData, password: &str) -> ValidationResult<()> {
    validate_required("name", profile.name.as_deref())?;
    validate_email(profile.email.as_deref().unwrap_or_default())?;
    validate_age(profile.age.as_deref().unwrap_or_default())?;
    validate_required("sex", profile.sex.as_deref())?;
    validate_required("planet", profile.planet.as_deref())?;
    validate_password(password)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity chosen on the detail screen.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`] (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY as i64 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    // Bounded by MAX_ITEM_QUANTITY above.
    Ok(qty as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
