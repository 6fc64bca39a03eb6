//! # In-Memory Identity Backend
//!
//! A self-contained [`IdentityBackend`] for demos and tests. Accounts live
//! in a map keyed by lower-cased email; passwords are stored only as argon2
//! PHC strings.
//!
//! ## Rules
//! ```text
//!   email shape invalid        → auth/invalid-email
//!   password shorter than 6    → auth/weak-password        (create only)
//!   email already registered   → auth/email-already-in-use (create only)
//!   unknown email              → auth/user-not-found
//!   hash mismatch              → auth/wrong-password
//!   offline mode               → auth/network-request-failed (every call)
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use planeta_core::validation::validate_email;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error};
use uuid::Uuid;

use crate::backend::{BackendUser, IdentityBackend};
use crate::error::{AuthError, AuthResult, BackendErrorCode};

/// Minimum password length the backend accepts on account creation.
pub const MIN_BACKEND_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
}

impl Account {
    fn to_user(&self) -> BackendUser {
        BackendUser {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// In-process identity provider.
#[derive(Debug, Default)]
pub struct InMemoryIdentityBackend {
    accounts: Mutex<HashMap<String, Account>>,
    current_uid: Mutex<Option<String>>,
    offline: AtomicBool,
}

impl InMemoryIdentityBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `auth/network-request-failed` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.lock().await.len()
    }

    /// Uid of the account signed in on the backend side, if any.
    pub async fn current_uid(&self) -> Option<String> {
        self.current_uid.lock().await.clone()
    }

    /// Display name stored for an email, if the account exists and has one.
    pub async fn display_name_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .await
            .get(&normalize(email))
            .and_then(|a| a.display_name.clone())
    }

    fn ensure_online(&self) -> AuthResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::backend(BackendErrorCode::NetworkRequestFailed));
        }
        Ok(())
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(email: &str) -> AuthResult<()> {
    validate_email(email).map_err(|_| AuthError::backend(BackendErrorCode::InvalidEmail))
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            AuthError::backend(BackendErrorCode::Unknown("auth/internal-error".into()))
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[async_trait]
impl IdentityBackend for InMemoryIdentityBackend {
    async fn sign_in_with_credentials(&self, email: &str, password: &str) -> AuthResult<BackendUser> {
        self.ensure_online()?;
        check_email(email)?;

        let account = self
            .accounts
            .lock()
            .await
            .get(&normalize(email))
            .cloned()
            .ok_or_else(|| AuthError::backend(BackendErrorCode::UserNotFound))?;

        if !verify_password(password, &account.password_hash) {
            debug!(email = %account.email, "Password mismatch");
            return Err(AuthError::backend(BackendErrorCode::WrongPassword));
        }

        *self.current_uid.lock().await = Some(account.uid.clone());
        Ok(account.to_user())
    }

    async fn create_account(&self, email: &str, password: &str) -> AuthResult<BackendUser> {
        self.ensure_online()?;
        check_email(email)?;

        if password.chars().count() < MIN_BACKEND_PASSWORD_LEN {
            return Err(AuthError::backend(BackendErrorCode::WeakPassword));
        }

        let key = normalize(email);
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::backend(BackendErrorCode::EmailAlreadyInUse));
        }

        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            password_hash: hash_password(password)?,
            display_name: None,
        };
        let user = account.to_user();
        accounts.insert(key, account);
        drop(accounts);

        *self.current_uid.lock().await = Some(user.uid.clone());
        debug!(uid = %user.uid, "Account created");
        Ok(user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.ensure_online()?;
        *self.current_uid.lock().await = None;
        Ok(())
    }

    async fn update_display_name(&self, uid: &str, display_name: &str) -> AuthResult<()> {
        self.ensure_online()?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .values_mut()
            .find(|a| a.uid == uid)
            .ok_or_else(|| AuthError::backend(BackendErrorCode::UserNotFound))?;

        account.display_name = Some(display_name.to_string());
        Ok(())
    }
}
