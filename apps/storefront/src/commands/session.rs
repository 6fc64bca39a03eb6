//! # Session Commands
//!
//! Commands behind the login, signup and profile screens.
//!
//! ```text
//!  Login form ──► validate_login ──► Credentials::new ──► SessionState::sign_in
//!  Signup form ─► validate_signup ─────────────────────► SessionState::sign_up
//!  "Sair" ─────────────────────────────────────────────► SessionState::sign_out
//!  Profile ─────► ProfileSummary::from(current identity)
//! ```

use planeta_core::session::Credentials;
use planeta_core::validation::{validate_login, validate_signup};
use planeta_core::{Identity, ProfileData, ProfileSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;

/// Session snapshot handed to the screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub identity: Option<Identity>,
}

impl From<Option<Identity>> for SessionResponse {
    fn from(identity: Option<Identity>) -> Self {
        SessionResponse {
            signed_in: identity.is_some(),
            identity,
        }
    }
}

/// Signs in from the login form.
///
/// ## Arguments
/// * `email`, `password` - Form fields
/// * `overrides` - Optional profile fields (name, age, planet, sex)
pub async fn sign_in(
    session: &SessionState,
    email: &str,
    password: &str,
    overrides: Option<ProfileData>,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "sign_in command");

    validate_login(email, password)?;
    let credentials = Credentials::new(email, password)?.with_overrides(overrides.unwrap_or_default());

    let identity = session.sign_in(&credentials).await?;
    info!(display_name = %identity.display_name, "User signed in");
    Ok(SessionResponse::from(Some(identity)))
}

/// Signs up from the signup form.
pub async fn sign_up(
    session: &SessionState,
    profile: ProfileData,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(email = ?profile.email, "sign_up command");

    validate_signup(&profile, password)?;

    let identity = session.sign_up(&profile, password).await?;
    info!(display_name = %identity.display_name, "User signed up");
    Ok(SessionResponse::from(Some(identity)))
}

/// Signs out. Signing out twice is fine.
pub async fn sign_out(session: &SessionState) -> Result<SessionResponse, ApiError> {
    debug!("sign_out command");

    session.sign_out().await?;
    Ok(SessionResponse::from(None))
}

/// Current session snapshot.
pub async fn current_session(session: &SessionState) -> SessionResponse {
    SessionResponse::from(session.current().await)
}

/// The three lines of the profile screen.
pub async fn profile_summary(session: &SessionState) -> ProfileSummary {
    ProfileSummary::from(session.current().await.as_ref())
}
