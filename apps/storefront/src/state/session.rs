//! # Session State
//!
//! The signed-in identity, either held locally or confirmed by an identity
//! backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SessionState                                   │
//! │                                                                         │
//! │  Local                               Backend                            │
//! │  ─────                               ───────                            │
//! │  Arc<Mutex<Session>>                 Arc<BackendSessionStore>           │
//! │  transitions apply instantly         transitions wait for the provider  │
//! │  never fails                         AuthError on rejection / busy      │
//! │                                                                         │
//! │  Both derive the Identity with the same rules.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use planeta_auth::{AuthResult, BackendSessionStore, IdentityBackend};
use planeta_core::session::Credentials;
use planeta_core::{Identity, ProfileData, Session};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
enum Store {
    Local(Arc<Mutex<Session>>),
    Backend(Arc<BackendSessionStore>),
}

/// Shared session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    store: Store,
}

impl SessionState {
    /// Session kept entirely on the device.
    pub fn local() -> Self {
        SessionState {
            store: Store::Local(Arc::new(Mutex::new(Session::new()))),
        }
    }

    /// Session whose transitions go through an identity backend.
    pub fn backed(backend: Arc<dyn IdentityBackend>) -> Self {
        SessionState {
            store: Store::Backend(Arc::new(BackendSessionStore::new(backend))),
        }
    }

    pub fn is_backed(&self) -> bool {
        matches!(self.store, Store::Backend(_))
    }

    fn with_local<R>(session: &Mutex<Session>, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Identity> {
        match &self.store {
            Store::Local(session) => {
                Ok(Self::with_local(session, |s| s.sign_in(credentials).clone()))
            }
            Store::Backend(store) => store.sign_in(credentials).await,
        }
    }

    pub async fn sign_up(&self, profile: &ProfileData, password: &str) -> AuthResult<Identity> {
        match &self.store {
            Store::Local(session) => Ok(Self::with_local(session, |s| s.sign_up(profile).clone())),
            Store::Backend(store) => store.sign_up(profile, password).await,
        }
    }

    pub async fn sign_out(&self) -> AuthResult<()> {
        match &self.store {
            Store::Local(session) => {
                Self::with_local(session, Session::sign_out);
                Ok(())
            }
            Store::Backend(store) => store.sign_out().await,
        }
    }

    /// Snapshot of the current identity.
    pub async fn current(&self) -> Option<Identity> {
        match &self.store {
            Store::Local(session) => Self::with_local(session, |s| s.current().cloned()),
            Store::Backend(store) => store.current().await,
        }
    }
}
