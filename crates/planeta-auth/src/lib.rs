//! # planeta-auth: Backend-Backed Session for the Planeta Storefront
//!
//! The local [`planeta_core::Session`] changes instantly. This crate is its
//! counterpart for when an identity provider has to confirm each transition
//! first: sign-in, sign-up and sign-out become async, may fail with a
//! provider code, and never leave the identity half-updated.
//!
//! ## Module Organization
//! - [`backend`] - The `IdentityBackend` trait and `BackendUser`
//! - [`memory`] - `InMemoryIdentityBackend` (argon2-hashed accounts)
//! - [`store`] - `BackendSessionStore` with its in-flight guard
//! - [`error`] - `AuthError`, `BackendErrorCode`, pt-BR user messages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use planeta_auth::{BackendSessionStore, InMemoryIdentityBackend};
//! use planeta_core::session::Credentials;
//!
//! let backend = Arc::new(InMemoryIdentityBackend::new());
//! let store = BackendSessionStore::new(backend);
//!
//! // No account yet: the identity stays empty and a readable message comes back
//! let err = store
//!     .sign_in(&Credentials::new("ana@planeta.com", "segredo123").unwrap())
//!     .await
//!     .unwrap_err();
//! assert_eq!(err.user_message(), "E-mail ou senha incorretos.");
//! assert!(store.current().await.is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod memory;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{BackendUser, IdentityBackend};
pub use error::{AuthError, AuthResult, BackendErrorCode};
pub use memory::InMemoryIdentityBackend;
pub use store::BackendSessionStore;
