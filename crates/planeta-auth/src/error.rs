//! # Auth Error Types
//!
//! Errors returned by the identity backend and the backend session store.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Auth Error Categories                             │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │  Backend             │  │  Store           │  │  Validation      │  │
//! │  │                      │  │                  │  │                  │  │
//! │  │  InvalidEmail        │  │  Operation       │  │  Credentials /   │  │
//! │  │  UserNotFound        │  │  InProgress      │  │  form rules      │  │
//! │  │  WrongPassword       │  │                  │  │                  │  │
//! │  │  EmailAlreadyInUse   │  │                  │  │                  │  │
//! │  │  WeakPassword        │  │                  │  │                  │  │
//! │  │  NetworkRequestFailed│  │                  │  │                  │  │
//! │  │  ...                 │  │                  │  │                  │  │
//! │  └──────────────────────┘  └──────────────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries a pt-BR message fit to show in an alert via
//! [`AuthError::user_message`]. The backend code itself is only used to pick
//! that message.

use planeta_core::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Backend Error Code
// =============================================================================

/// Machine-readable failure code reported by an identity backend.
///
/// Codes follow the `auth/<kebab-case>` shape identity providers use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendErrorCode {
    InvalidEmail,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    EmailAlreadyInUse,
    WeakPassword,
    NetworkRequestFailed,
    TooManyRequests,
    /// Anything the mapping does not know; keeps the raw code.
    Unknown(String),
}

impl BackendErrorCode {
    /// Parses a raw `auth/...` code.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "auth/invalid-email" => BackendErrorCode::InvalidEmail,
            "auth/user-not-found" => BackendErrorCode::UserNotFound,
            "auth/wrong-password" => BackendErrorCode::WrongPassword,
            "auth/invalid-credential" => BackendErrorCode::InvalidCredential,
            "auth/email-already-in-use" => BackendErrorCode::EmailAlreadyInUse,
            "auth/weak-password" => BackendErrorCode::WeakPassword,
            "auth/network-request-failed" => BackendErrorCode::NetworkRequestFailed,
            "auth/too-many-requests" => BackendErrorCode::TooManyRequests,
            other => BackendErrorCode::Unknown(other.to_string()),
        }
    }

    /// Returns the raw code string.
    pub fn as_code(&self) -> &str {
        match self {
            BackendErrorCode::InvalidEmail => "auth/invalid-email",
            BackendErrorCode::UserNotFound => "auth/user-not-found",
            BackendErrorCode::WrongPassword => "auth/wrong-password",
            BackendErrorCode::InvalidCredential => "auth/invalid-credential",
            BackendErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            BackendErrorCode::WeakPassword => "auth/weak-password",
            BackendErrorCode::NetworkRequestFailed => "auth/network-request-failed",
            BackendErrorCode::TooManyRequests => "auth/too-many-requests",
            BackendErrorCode::Unknown(code) => code,
        }
    }

    /// Human-readable pt-BR message for this code.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendErrorCode::InvalidEmail => "O e-mail informado é inválido.",
            BackendErrorCode::UserNotFound
            | BackendErrorCode::WrongPassword
            | BackendErrorCode::InvalidCredential => "E-mail ou senha incorretos.",
            BackendErrorCode::EmailAlreadyInUse => "Este e-mail já está cadastrado.",
            BackendErrorCode::WeakPassword => "A senha é muito fraca.",
            BackendErrorCode::NetworkRequestFailed => {
                "Falha de conexão. Verifique sua internet e tente novamente."
            }
            BackendErrorCode::TooManyRequests => {
                "Muitas tentativas. Aguarde um momento e tente novamente."
            }
            BackendErrorCode::Unknown(_) => "Ocorreu um erro inesperado. Tente novamente.",
        }
    }
}

impl fmt::Display for BackendErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

// =============================================================================
// Auth Error
// =============================================================================

/// Auth error type covering backend rejections and store preconditions.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity backend rejected the call.
    #[error("Identity backend error ({code}): {message}")]
    Backend {
        code: BackendErrorCode,
        message: String,
    },

    /// Another sign-in / sign-up / sign-out is still running on this store.
    #[error("Another authentication operation is already in progress")]
    OperationInProgress,

    /// Input rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl AuthError {
    /// Builds a backend error from a code, using its default message.
    pub fn backend(code: BackendErrorCode) -> Self {
        let message = code.user_message().to_string();
        AuthError::Backend { code, message }
    }

    /// Builds a backend error from a raw `auth/...` code.
    pub fn from_code(code: &str) -> Self {
        AuthError::backend(BackendErrorCode::from_code(code))
    }

    /// The backend code, when the backend produced this error.
    pub fn code(&self) -> Option<&BackendErrorCode> {
        match self {
            AuthError::Backend { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Message suitable for an alert on the login / signup screens.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Backend { message, .. } => message.clone(),
            AuthError::OperationInProgress => "Aguarde, já estamos processando sua solicitação.".to_string(),
            AuthError::Validation(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_and_unknown() {
        assert_eq!(
            BackendErrorCode::from_code("auth/wrong-password"),
            BackendErrorCode::WrongPassword
        );
        assert_eq!(
            BackendErrorCode::from_code("auth/quota-exceeded"),
            BackendErrorCode::Unknown("auth/quota-exceeded".into())
        );
        assert_eq!(BackendErrorCode::EmailAlreadyInUse.to_string(), "auth/email-already-in-use");
    }

    #[test]
    fn test_credential_failures_share_a_message() {
        let wrong = AuthError::from_code("auth/wrong-password");
        let missing = AuthError::from_code("auth/user-not-found");
        assert_eq!(wrong.user_message(), missing.user_message());
        assert_eq!(wrong.user_message(), "E-mail ou senha incorretos.");
    }

    #[test]
    fn test_error_display_contains_code() {
        let err = AuthError::from_code("auth/email-already-in-use");
        assert!(err.to_string().contains("auth/email-already-in-use"));
        assert_eq!(err.code(), Some(&BackendErrorCode::EmailAlreadyInUse));
        assert!(AuthError::OperationInProgress.code().is_none());
    }

    #[test]
    fn test_validation_converts() {
        let err: AuthError = ValidationError::required("email").into();
        assert_eq!(err.user_message(), "email is required");
    }
}
