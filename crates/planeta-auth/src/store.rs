//! # Backend Session Store
//!
//! The session store variant whose transitions are confirmed by an
//! [`IdentityBackend`] before the local identity changes.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     BackendSessionStore                                 │
//! │                                                                         │
//! │  sign_in(credentials)                                                   │
//! │    backend.sign_in_with_credentials ── Err ──► identity unchanged       │
//! │            │ Ok                                                         │
//! │            ▼                                                            │
//! │    derive from credentials (blanks first) ──► identity = Some(new)     │
//! │                                                                         │
//! │  sign_up(profile, password)                                             │
//! │    backend.create_account ── Err ──► identity unchanged                 │
//! │            │ Ok                                                         │
//! │            ▼                                                            │
//! │    name given? ── update_display_name ── Err ──► warn, keep going      │
//! │            ▼                                                            │
//! │    derive from profile ──► identity = Some(new)                        │
//! │                                                                         │
//! │  sign_out()                                                             │
//! │    backend.sign_out ── Err ──► identity kept, error returned            │
//! │            │ Ok                                                         │
//! │            ▼                                                            │
//! │    identity = None                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## In-Flight Guard
//! Only one of the three operations may run at a time per store. A call
//! that arrives while another is pending fails immediately with
//! [`AuthError::OperationInProgress`] and touches nothing.

use planeta_core::session::{derive_identity, today, Credentials};
use planeta_core::types::{Identity, ProfileData};
use planeta_core::ValidationError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::backend::IdentityBackend;
use crate::error::{AuthError, AuthResult};

/// Resets the in-flight flag when the operation finishes, on every path.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Session store backed by an async identity provider.
pub struct BackendSessionStore {
    backend: Arc<dyn IdentityBackend>,
    identity: RwLock<Option<Identity>>,
    in_flight: AtomicBool,
}

impl fmt::Debug for BackendSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSessionStore")
            .field("identity", &self.identity)
            .field("in_flight", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl BackendSessionStore {
    /// Creates a signed-out store over a backend.
    pub fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        Self {
            backend,
            identity: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    fn begin(&self) -> AuthResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| {
                debug!("Rejected auth call: another one is pending");
                AuthError::OperationInProgress
            })
    }

    /// Whether an auth operation is currently pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the current identity.
    pub async fn current(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Signs in through the backend, then derives the identity from the
    /// credentials exactly like the local session does.
    pub async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Identity> {
        let _guard = self.begin()?;
        debug!(email = %credentials.email(), "Signing in");

        self.backend
            .sign_in_with_credentials(credentials.email(), credentials.password())
            .await
            .inspect_err(|e| warn!(email = %credentials.email(), error = %e, "Sign-in rejected"))?;

        let identity = derive_identity(&credentials.sign_in_profile(), today());
        *self.identity.write().await = Some(identity.clone());

        info!(email = %identity.email, "Signed in");
        Ok(identity)
    }

    /// Creates the account, sets its display name when one was given, and
    /// derives the identity from the submitted profile.
    pub async fn sign_up(&self, profile: &ProfileData, password: &str) -> AuthResult<Identity> {
        let _guard = self.begin()?;

        let email = profile
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ValidationError::required("email"))?;
        debug!(email = %email, "Signing up");

        let user = self
            .backend
            .create_account(email, password)
            .await
            .inspect_err(|e| warn!(email = %email, error = %e, "Sign-up rejected"))?;

        if let Some(name) = profile.name.as_deref().filter(|n| !n.trim().is_empty()) {
            if let Err(e) = self.backend.update_display_name(&user.uid, name).await {
                warn!(uid = %user.uid, error = %e, "Display name update failed, keeping account");
            }
        }

        let identity = derive_identity(profile, today());
        *self.identity.write().await = Some(identity.clone());

        info!(email = %identity.email, "Signed up");
        Ok(identity)
    }

    /// Signs out on the backend; the identity is cleared only on success.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let _guard = self.begin()?;

        self.backend
            .sign_out()
            .await
            .inspect_err(|e| warn!(error = %e, "Sign-out rejected, keeping session"))?;

        if self.identity.write().await.take().is_some() {
            info!("Signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendUser;
    use crate::error::BackendErrorCode;
    use crate::memory::InMemoryIdentityBackend;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    async fn store_with_account(email: &str, password: &str) -> (Arc<InMemoryIdentityBackend>, BackendSessionStore) {
        let backend = Arc::new(InMemoryIdentityBackend::new());
        backend.create_account(email, password).await.unwrap();
        backend.sign_out().await.unwrap();
        let store = BackendSessionStore::new(backend.clone());
        (backend, store)
    }

    fn signup_profile() -> ProfileData {
        ProfileData {
            email: Some("leo@planeta.com".into()),
            name: Some("Leo".into()),
            age: Some("31".into()),
            planet: Some("Saturno".into()),
            sex: Some("M".into()),
        }
    }

    /// Backend whose sign-in blocks until released.
    struct GatedBackend {
        gate: Notify,
    }

    #[async_trait]
    impl IdentityBackend for GatedBackend {
        async fn sign_in_with_credentials(&self, email: &str, _: &str) -> AuthResult<BackendUser> {
            self.gate.notified().await;
            Ok(BackendUser {
                uid: "gated".into(),
                email: email.into(),
                display_name: None,
            })
        }

        async fn create_account(&self, _: &str, _: &str) -> AuthResult<BackendUser> {
            Err(AuthError::backend(BackendErrorCode::NetworkRequestFailed))
        }

        async fn sign_out(&self) -> AuthResult<()> {
            Ok(())
        }

        async fn update_display_name(&self, _: &str, _: &str) -> AuthResult<()> {
            Ok(())
        }
    }

    /// Backend that creates accounts but refuses display-name updates.
    struct NoNamesBackend;

    #[async_trait]
    impl IdentityBackend for NoNamesBackend {
        async fn sign_in_with_credentials(&self, _: &str, _: &str) -> AuthResult<BackendUser> {
            Err(AuthError::backend(BackendErrorCode::UserNotFound))
        }

        async fn create_account(&self, email: &str, _: &str) -> AuthResult<BackendUser> {
            Ok(BackendUser {
                uid: "u1".into(),
                email: email.into(),
                display_name: None,
            })
        }

        async fn sign_out(&self) -> AuthResult<()> {
            Ok(())
        }

        async fn update_display_name(&self, _: &str, _: &str) -> AuthResult<()> {
            Err(AuthError::backend(BackendErrorCode::TooManyRequests))
        }
    }

    #[tokio::test]
    async fn test_sign_in_derives_identity() {
        let (_, store) = store_with_account("a@b.com", "segredo123").await;

        let identity = store
            .sign_in(&Credentials::new("a@b.com", "segredo123").unwrap())
            .await
            .unwrap();

        assert_eq!(identity.display_name, "a");
        assert_eq!(identity.planet, "Terra");
        assert_eq!(store.current().await, Some(identity));
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_previous_identity() {
        let (_, store) = store_with_account("a@b.com", "segredo123").await;
        store
            .sign_in(&Credentials::new("a@b.com", "segredo123").unwrap())
            .await
            .unwrap();

        let err = store
            .sign_in(&Credentials::new("a@b.com", "errada123").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "E-mail ou senha incorretos.");
        assert_eq!(store.current().await.unwrap().email, "a@b.com");
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn test_sign_up_sets_backend_display_name() {
        let backend = Arc::new(InMemoryIdentityBackend::new());
        let store = BackendSessionStore::new(backend.clone());

        let identity = store.sign_up(&signup_profile(), "segredo123").await.unwrap();

        assert_eq!(identity.display_name, "Leo");
        assert_eq!(identity.planet, "Saturno");
        assert_eq!(backend.display_name_of("leo@planeta.com").await.as_deref(), Some("Leo"));
    }

    #[tokio::test]
    async fn test_sign_up_survives_display_name_failure() {
        let store = BackendSessionStore::new(Arc::new(NoNamesBackend));

        let identity = store.sign_up(&signup_profile(), "segredo123").await.unwrap();

        assert_eq!(identity.display_name, "Leo");
        assert!(store.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_sign_up_requires_email() {
        let store = BackendSessionStore::new(Arc::new(InMemoryIdentityBackend::new()));
        let err = store.sign_up(&ProfileData::default(), "segredo123").await.unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let (_, store) = store_with_account("leo@planeta.com", "segredo123").await;
        let err = store.sign_up(&signup_profile(), "segredo123").await.unwrap_err();

        assert_eq!(err.code(), Some(&BackendErrorCode::EmailAlreadyInUse));
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_failure_keeps_identity() {
        let (backend, store) = store_with_account("a@b.com", "segredo123").await;
        store
            .sign_in(&Credentials::new("a@b.com", "segredo123").unwrap())
            .await
            .unwrap();

        backend.set_offline(true);
        assert!(store.sign_out().await.is_err());
        assert!(store.is_signed_in().await);

        backend.set_offline(false);
        store.sign_out().await.unwrap();
        assert!(!store.is_signed_in().await);

        // Second sign-out is a no-op.
        store.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_call_fails_fast() {
        let backend = Arc::new(GatedBackend { gate: Notify::new() });
        let store = Arc::new(BackendSessionStore::new(backend.clone()));

        let pending = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .sign_in(&Credentials::new("first@x.com", "segredo123").unwrap())
                    .await
            })
        };

        while !store.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = store
            .sign_in(&Credentials::new("second@x.com", "segredo123").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OperationInProgress));
        assert!(store.current().await.is_none());

        backend.gate.notify_one();
        let identity = pending.await.unwrap().unwrap();
        assert_eq!(identity.display_name, "first");
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn test_debug_hides_backend() {
        let (_, store) = store_with_account("a@b.com", "segredo123").await;
        let printed = format!("{:?}", store);
        assert!(printed.starts_with("BackendSessionStore"));
        assert!(printed.contains("in_flight: false"));
    }
}
