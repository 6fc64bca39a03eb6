//! # Commands Module
//!
//! Every operation the storefront screens call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Bag manipulation
//! ├── session.rs   ◄─── Sign in / up / out, profile
//! ├── catalog.rs   ◄─── Planet list and lookup
//! ├── checkout.rs  ◄─── Summary, payment options, place order
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs, by reference:
//! ```rust,ignore
//! // Only needs the bag
//! get_cart(providers.cart(), providers.config())
//!
//! // Only needs the session
//! sign_out(providers.session()).await
//! ```
//!
//! Commands return serde-serializable DTOs or `ApiError`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod session;
