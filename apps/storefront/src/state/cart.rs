//! # Cart State
//!
//! Shared handle to the one cart every screen reads.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands read and modify the cart
//! 2. Each mutation must be applied whole before anyone reads
//! 3. Commands may run concurrently
//!
//! ```text
//!  add_to_cart ───────┐
//!  update_cart_item ──┼──► with_cart_mut ──► lock ──► Cart ──► unlock
//!  remove_from_cart ──┤
//!  get_cart ──────────┴──► with_cart ─────► lock ──► &Cart ─► unlock
//! ```

use planeta_core::{Cart, DecrementPolicy};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state with the default decrement policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty cart state with an explicit decrement policy.
    pub fn with_policy(policy: DecrementPolicy) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::with_policy(policy))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.item_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&product, 1));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
