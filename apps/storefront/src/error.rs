//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Screen                        Rust                                     │
//! │  ──────                        ────                                     │
//! │                                                                         │
//! │  signIn(email, senha)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  ── Result<T, ApiError>                        │  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ── ValidationError ──────────┐                 │  │
//! │  │         │                                      │                 │  │
//! │  │  Backend rejected? ── AuthError (pt-BR msg) ───┤                 │  │
//! │  │         │                                      ▼                 │  │
//! │  │  Checkout failed?  ── CoreError ───────────► ApiError ──────────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code    = "AUTH_ERROR"                                          │
//! │    // e.message = "E-mail ou senha incorretos."                         │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use planeta_auth::AuthError;
use planeta_core::{CoreError, ValidationError};
use serde::Serialize;
use ts_rs::TS;

use crate::state::ConfigError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Planet not found: Plutão"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Catalog entry not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Identity backend rejected the call
    AuthError,

    /// Another sign-in / sign-up / sign-out is still pending
    AuthBusy,

    /// Order could not be placed
    CheckoutError,

    /// A store was used before being provisioned
    NotProvisioned,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates the error for a store that was never provisioned.
    pub fn not_provisioned(store: &str) -> Self {
        ApiError::new(
            ErrorCode::NotProvisioned,
            format!("{} accessed outside its provider scope", store),
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PlanetNotFound(name) => ApiError::not_found("Planet", &name),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutError, err.to_string()),
            CoreError::UnknownPaymentMethod(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Backend rejections keep their pt-BR message; the raw code is logged only.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Backend { code, .. } => {
                tracing::debug!(code = %code, "Identity backend rejected request");
                ApiError::new(ErrorCode::AuthError, err.user_message())
            }
            AuthError::OperationInProgress => ApiError::new(ErrorCode::AuthBusy, err.user_message()),
            AuthError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::internal("Storefront configuration is invalid")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use planeta_auth::BackendErrorCode;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Planet", "Plutão");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Planet not found: Plutão");
    }

    #[test]
    fn test_from_core_error() {
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::CheckoutError);
        assert_eq!(
            ApiError::from(CoreError::UnknownPaymentMethod("cheque".into())).code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_from_auth_error_uses_user_message() {
        let err = ApiError::from(AuthError::backend(BackendErrorCode::EmailAlreadyInUse));
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "Este e-mail já está cadastrado.");

        assert_eq!(ApiError::from(AuthError::OperationInProgress).code, ErrorCode::AuthBusy);
    }

    #[test]
    fn test_not_provisioned_message() {
        let err = ApiError::not_provisioned("CartStore");
        assert_eq!(err.code, ErrorCode::NotProvisioned);
        assert_eq!(err.message, "CartStore accessed outside its provider scope");
    }
}
