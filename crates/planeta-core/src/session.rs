//! # Session
//!
//! Identity derivation and the local (backend-less) session container.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ProfileData ──► Identity                             │
//! │                                                                         │
//! │  email         present? ── yes ──► email                               │
//! │                    └────── no ───► "N/A"                                │
//! │                                                                         │
//! │  display_name  name ──► local part of email ──► "Usuário"              │
//! │                (first non-blank wins)                                   │
//! │                                                                         │
//! │  age, sex      present? else "N/A"                                      │
//! │  planet        present? else "Terra"                                    │
//! │  member_since  today, dd/mm/yyyy (stamped once, never re-derived)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank and missing values are treated the same way, so derivation is
//! total: any `ProfileData` yields a well-formed `Identity`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Identity, ProfileData};
use crate::{DEFAULT_PLANET, FALLBACK_DISPLAY_NAME, MEMBER_SINCE_FORMAT, NOT_AVAILABLE};

// =============================================================================
// Derivation
// =============================================================================

/// Returns the value when it is set and not blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Returns the part of an email before the first `@`, if non-empty.
pub fn email_local_part(email: &str) -> Option<&str> {
    email.split('@').next().filter(|local| !local.is_empty())
}

/// Builds an [`Identity`] from raw profile fields.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use planeta_core::session::derive_identity;
/// use planeta_core::types::ProfileData;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let identity = derive_identity(&ProfileData::with_email("a@b.com"), today);
///
/// assert_eq!(identity.display_name, "a");
/// assert_eq!(identity.planet, "Terra");
/// assert_eq!(identity.member_since, "16/10/2026");
/// ```
pub fn derive_identity(profile: &ProfileData, today: NaiveDate) -> Identity {
    let email = present(&profile.email);

    let display_name = present(&profile.name)
        .or_else(|| email.and_then(email_local_part))
        .unwrap_or(FALLBACK_DISPLAY_NAME);

    Identity {
        email: email.unwrap_or(NOT_AVAILABLE).to_string(),
        display_name: display_name.to_string(),
        age: present(&profile.age).unwrap_or(NOT_AVAILABLE).to_string(),
        planet: present(&profile.planet).unwrap_or(DEFAULT_PLANET).to_string(),
        sex: present(&profile.sex).unwrap_or(NOT_AVAILABLE).to_string(),
        member_since: today.format(MEMBER_SINCE_FORMAT).to_string(),
    }
}

/// Today's date on the device clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Credentials
// =============================================================================

/// Email + password, plus optional profile overrides, for a sign-in.
///
/// Constructed only through [`Credentials::new`], which guarantees both the
/// email and the password are present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
    overrides: ProfileData,
}

impl Credentials {
    /// Validates that both fields are present.
    ///
    /// ## Example
    /// ```rust
    /// use planeta_core::session::Credentials;
    ///
    /// assert!(Credentials::new("a@b.com", "segredo123").is_ok());
    /// assert!(Credentials::new("a@b.com", "   ").is_err());
    /// ```
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        let password = password.into();

        if email.is_empty() {
            return Err(ValidationError::required("email"));
        }
        if password.trim().is_empty() {
            return Err(ValidationError::required("password"));
        }

        Ok(Credentials {
            email,
            password,
            overrides: ProfileData::default(),
        })
    }

    /// Attaches profile overrides (`name`, `age`, `planet`, `sex`).
    ///
    /// An `email` inside the overrides is ignored; the credential email wins.
    pub fn with_overrides(mut self, overrides: ProfileData) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The profile the sign-in path derives from: overrides, the credential
    /// email, and blanks for everything else.
    pub fn sign_in_profile(&self) -> ProfileData {
        ProfileData {
            email: Some(self.email.clone()),
            ..self.overrides.clone()
        }
        .with_blank_defaults()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("overrides", &self.overrides)
            .finish()
    }
}

// =============================================================================
// Session
// =============================================================================

/// The local session: at most one identity, replaced wholesale.
///
/// ## Lifecycle
/// ```text
///            sign_in / sign_up            sign_in / sign_up
///   None ───────────────────────► Some(A) ──────────────────► Some(B)
///    ▲                               │
///    └────────── sign_out ───────────┘   (sign_out on None: no-op)
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Creates a session with an initial identity already in place.
    pub fn with_identity(identity: Identity) -> Self {
        Session {
            identity: Some(identity),
        }
    }

    /// Signs in: blanks fill missing profile fields, then derivation runs.
    pub fn sign_in(&mut self, credentials: &Credentials) -> &Identity {
        let identity = derive_identity(&credentials.sign_in_profile(), today());
        self.identity.insert(identity)
    }

    /// Signs up: derivation runs directly on the submitted profile.
    pub fn sign_up(&mut self, profile: &ProfileData) -> &Identity {
        let identity = derive_identity(profile, today());
        self.identity.insert(identity)
    }

    /// Clears the identity. Idempotent.
    pub fn sign_out(&mut self) {
        self.identity = None;
    }

    /// The current identity, if anyone is signed in.
    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

// =============================================================================
// Profile Summary
// =============================================================================

/// The three lines the profile screen shows, with its placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub member_since: String,
}

impl From<Option<&Identity>> for ProfileSummary {
    fn from(identity: Option<&Identity>) -> Self {
        let email = identity
            .map(|i| i.email.as_str())
            .filter(|e| !e.is_empty());

        ProfileSummary {
            name: email
                .and_then(email_local_part)
                .unwrap_or(FALLBACK_DISPLAY_NAME)
                .to_string(),
            email: email.unwrap_or("E-mail não disponível").to_string(),
            member_since: identity
                .map(|i| i.member_since.clone())
                .unwrap_or_else(|| "Data não disponível".to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
