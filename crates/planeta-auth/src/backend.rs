//! # Identity Backend
//!
//! The seam between the session store and whatever provider actually
//! authenticates users.
//!
//! ```text
//!   BackendSessionStore ──► dyn IdentityBackend ──► hosted provider
//!                                     │
//!                                     └───────────► InMemoryIdentityBackend
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthResult;

/// A user as the backend knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Async identity provider.
///
/// Implementations report failures as [`crate::AuthError::Backend`] with an
/// `auth/...` code; the store only uses that code to pick a message.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Authenticates an existing account.
    async fn sign_in_with_credentials(&self, email: &str, password: &str) -> AuthResult<BackendUser>;

    /// Creates a new account and signs it in.
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<BackendUser>;

    /// Ends the backend session.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Sets the display name of the currently signed-in account.
    async fn update_display_name(&self, uid: &str, display_name: &str) -> AuthResult<()>;
}
