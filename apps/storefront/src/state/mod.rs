//! # State Module
//!
//! Application state for the storefront, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Providers                               │   │
//! │  │  built once at startup, handed to every command by reference    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  CartState   │  │  SessionState    │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Arc<Mutex<  │  │  local Session   │  │  store name      │          │
//! │  │    Cart      │  │  or backend      │  │  shipping rule   │          │
//! │  │  >>          │  │  session store   │  │  decrement rule  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  A store that was not provisioned is a programming error:               │
//! │  cart() / session() panic, try_cart() / try_session() return           │
//! │  NOT_PROVISIONED.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod session;

pub use cart::CartState;
pub use config::{ConfigError, ConfigState, CONFIG_FILE_NAME};
pub use session::SessionState;

use planeta_auth::IdentityBackend;
use std::sync::Arc;

use crate::error::ApiError;

const CART_STORE: &str = "CartStore";
const SESSION_STORE: &str = "SessionStore";

/// The provisioning scope: every store the commands may use.
#[derive(Debug, Clone)]
pub struct Providers {
    config: ConfigState,
    cart: Option<CartState>,
    session: Option<SessionState>,
}

impl Providers {
    /// An empty scope holding only configuration.
    pub fn new(config: ConfigState) -> Self {
        Providers {
            config,
            cart: None,
            session: None,
        }
    }

    /// Full scope with a local session.
    pub fn local(config: ConfigState) -> Self {
        let cart = CartState::with_policy(config.decrement_policy);
        Self::new(config)
            .with_cart(cart)
            .with_session(SessionState::local())
    }

    /// Full scope with a backend-confirmed session.
    pub fn backed(config: ConfigState, backend: Arc<dyn IdentityBackend>) -> Self {
        let cart = CartState::with_policy(config.decrement_policy);
        Self::new(config)
            .with_cart(cart)
            .with_session(SessionState::backed(backend))
    }

    pub fn with_cart(mut self, cart: CartState) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = Some(session);
        self
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// The cart store.
    ///
    /// # Panics
    /// If no cart was provisioned.
    pub fn cart(&self) -> &CartState {
        match &self.cart {
            Some(cart) => cart,
            None => panic!("{} accessed outside its provider scope", CART_STORE),
        }
    }

    /// The session store.
    ///
    /// # Panics
    /// If no session was provisioned.
    pub fn session(&self) -> &SessionState {
        match &self.session {
            Some(session) => session,
            None => panic!("{} accessed outside its provider scope", SESSION_STORE),
        }
    }

    pub fn try_cart(&self) -> Result<&CartState, ApiError> {
        self.cart
            .as_ref()
            .ok_or_else(|| ApiError::not_provisioned(CART_STORE))
    }

    pub fn try_session(&self) -> Result<&SessionState, ApiError> {
        self.session
            .as_ref()
            .ok_or_else(|| ApiError::not_provisioned(SESSION_STORE))
    }
}
