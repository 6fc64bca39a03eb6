//! # planeta-core: Pure State Model for the Planeta Storefront
//!
//! This crate holds the rules behind the two pieces of shared client state
//! the storefront screens read from: the **session** (who is signed in)
//! and the **cart** (what they intend to buy). Everything here is a pure
//! function or a plain data container with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Planeta Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Screens (React Native, out of scope)           │   │
//! │  │   Login ─► Home ─► Detail ─► Bag ─► Checkout      Profile       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/storefront (state + commands)                │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼─────────────────┐  ┌────────────▼────────────────┐  │
//! │  │   ★ planeta-core (THIS CRATE) ★ │  │  planeta-auth               │  │
//! │  │   cart • session • money        │◄─│  async identity backend     │  │
//! │  │   validation • catalog • order  │  │  session store              │  │
//! │  └─────────────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, Identity, ProfileData)
//! - [`money`] - Integer-cent Money plus BRL price parsing/formatting
//! - [`cart`] - The cart container: merge-by-identity and quantity rules
//! - [`session`] - Identity derivation and the local session container
//! - [`checkout`] - Payment methods, delivery address, order confirmation
//! - [`catalog`] - The solar-system catalog shown on the home screen
//! - [`validation`] - Form rules checked before a store operation runs
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use planeta_core::cart::Cart;
//! use planeta_core::types::Product;
//!
//! let mut cart = Cart::new();
//! let sol = Product::new(1, "Sol", "R$ 25,00", "sol.jpeg");
//!
//! cart.add_item(&sol, 1);
//! cart.add_item(&sol, 2); // merges, never duplicates
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total_quantity(), 3);
//! assert_eq!(cart.subtotal().cents(), 7500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, DecrementPolicy, QuantityDelta, ShippingPolicy};
pub use catalog::Planet;
pub use checkout::{DeliveryAddress, OrderConfirmation, OrderSummary, PaymentMethod};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{ProfileSummary, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item accepted from a form.
///
/// The cart itself never rejects a quantity; this bound is enforced by
/// [`validation::validate_quantity`] at the command boundary.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Display name used when neither a name nor an email local part exists.
pub const FALLBACK_DISPLAY_NAME: &str = "Usuário";

/// Placeholder for profile fields that were never provided.
pub const NOT_AVAILABLE: &str = "N/A";

/// Planet assigned to profiles that did not pick one.
pub const DEFAULT_PLANET: &str = "Terra";

/// pt-BR short date format used for `member_since` (e.g. `16/10/2026`).
pub const MEMBER_SINCE_FORMAT: &str = "%d/%m/%Y";
