//! # Planeta Storefront Library
//!
//! State and command layer for the storefront screens.
//!
//! ## Module Organization
//! ```text
//! planeta_storefront/
//! ├── lib.rs          ◄─── You are here (logging, provisioning, demo)
//! ├── state/
//! │   ├── mod.rs      ◄─── Providers (provisioning scope)
//! │   ├── cart.rs     ◄─── Cart state
//! │   ├── session.rs  ◄─── Session state (local or backend)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── cart.rs     ◄─── Bag commands
//! │   ├── session.rs  ◄─── Login / signup / profile commands
//! │   ├── catalog.rs  ◄─── Planet list commands
//! │   ├── checkout.rs ◄─── Checkout commands
//! │   └── config.rs   ◄─── Config command
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use planeta_auth::InMemoryIdentityBackend;
use planeta_core::ProfileData;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{ConfigState, Providers};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,planeta=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=planeta_auth=trace` - Trace the auth crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Builds the provisioning scope used at startup.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Config ──► defaults, storefront.toml, PLANETA_* overrides      │
/// │  2. Identity Backend ──► in-memory provider                             │
/// │  3. Stores ──► CartState (configured policy), backed SessionState      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn bootstrap(config_path: Option<PathBuf>) -> Providers {
    let config = ConfigState::load_or_default(config_path);
    info!(store = %config.store_name, policy = %config.decrement_policy, "Configuration loaded");

    provision(config)
}

/// Provisions every store over an already loaded configuration.
pub fn provision(config: ConfigState) -> Providers {
    let backend = Arc::new(InMemoryIdentityBackend::new());
    let providers = Providers::backed(config, backend);

    info!("Stores provisioned");
    providers
}

/// Loads the configuration and runs the scripted session.
pub async fn run() -> Result<(), ApiError> {
    init_tracing();
    info!("Starting Planeta storefront");

    run_session(&bootstrap(None)).await
}

/// Walks through one shopping session end to end: sign up, browse, fill
/// the bag, check out, sign out.
pub async fn run_session(providers: &Providers) -> Result<(), ApiError> {
    let (cart, session, config) = (
        providers.try_cart()?,
        providers.try_session()?,
        providers.config(),
    );

    let profile = ProfileData {
        email: Some("astronauta@planeta.com".into()),
        name: Some("Astronauta".into()),
        age: Some("28".into()),
        planet: Some("Marte".into()),
        sex: Some("F".into()),
    };
    let signed_up = commands::session::sign_up(session, profile, "estrelas123").await?;
    if let Some(identity) = &signed_up.identity {
        info!(name = %identity.display_name, since = %identity.member_since, "Welcome");
    }

    let planets = commands::catalog::list_planets();
    info!(count = planets.len(), "Catalog loaded");

    let sol = commands::catalog::get_planet("Sol")?;
    commands::cart::add_to_cart(cart, config, sol.id, Some(1))?;
    let bag = commands::cart::add_to_cart(cart, config, sol.id, Some(1))?;
    info!(
        lines = bag.items.len(),
        subtotal = %bag.subtotal_label,
        shipping = %bag.shipping_label,
        total = %bag.total_label,
        "Bag updated"
    );

    let summary = commands::checkout::order_summary(cart, config);
    info!(total = %summary.total_label, "Checkout summary");

    let confirmation = commands::checkout::place_order(cart, config, Some("pix"))?;
    info!("{}", confirmation.message);
    let receipt = serde_json::to_string_pretty(&confirmation)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    info!("Order confirmation:\n{}", receipt);

    commands::session::sign_out(session).await?;
    let profile = commands::session::profile_summary(session).await;
    info!(name = %profile.name, email = %profile.email, "Signed out");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_provisions_backed_session() {
        let missing = std::env::temp_dir().join("planeta-storefront-bootstrap-missing.toml");
        let providers = bootstrap(Some(missing));

        assert!(providers.session().is_backed());
        assert!(providers.cart().with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_run_session_completes() {
        let providers = provision(ConfigState::default());

        assert!(run_session(&providers).await.is_ok());
        assert!(providers.cart().with_cart(|c| c.is_empty()));
        assert!(providers.session().current().await.is_none());
    }
}
