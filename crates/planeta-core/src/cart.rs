//! # Cart
//!
//! The working set of products the user intends to buy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Operation                 Collection Change   │
//! │  ─────────────            ─────────                 ─────────────────   │
//! │                                                                         │
//! │  "Adicionar" ───────────► add_item(p, q) ─────────► merge or push       │
//! │                                                                         │
//! │  (+) / (−) ─────────────► update_quantity(id, ±1) ► qty ± 1 / remove    │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item(id) ────────► retain(id != ..)    │
//! │                                                                         │
//! │  Order placed ──────────► clear() ────────────────► items.clear()       │
//! │                                                                         │
//! │  Bag footer ────────────► totals(&policy) ────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one [`LineItem`] per `product_id` (adding merges).
//! - A line's quantity is never below 1; a line that would reach 0 is
//!   removed instead.
//! - Insertion order is kept for display.
//! - No operation fails: unknown ids and zero quantities are no-ops.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, CURRENCY_SYMBOL};
use crate::types::{LineItem, Product};

// =============================================================================
// Quantity Delta
// =============================================================================

/// A single-step quantity change from the (+) / (−) buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityDelta {
    Increment,
    Decrement,
}

impl QuantityDelta {
    /// Returns the signed step (`+1` or `-1`).
    #[inline]
    pub const fn step(self) -> i64 {
        match self {
            QuantityDelta::Increment => 1,
            QuantityDelta::Decrement => -1,
        }
    }
}

impl TryFrom<i64> for QuantityDelta {
    type Error = ValidationError;

    /// Only `+1` and `-1` are valid steps.
    fn try_from(step: i64) -> Result<Self, Self::Error> {
        match step {
            1 => Ok(QuantityDelta::Increment),
            -1 => Ok(QuantityDelta::Decrement),
            _ => Err(ValidationError::OutOfRange {
                field: "delta".to_string(),
                min: -1,
                max: 1,
            }),
        }
    }
}

// =============================================================================
// Decrement Policy
// =============================================================================

/// What a (−) press does to a line that holds a single unit.
///
/// ```text
///  quantity 3 ─(−)─► 2 ─(−)─► 1 ─(−)─► RemoveAtZero: line removed
///                                      FloorAtOne:   stays at 1
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecrementPolicy {
    /// Decrementing past 1 removes the line.
    #[default]
    RemoveAtZero,

    /// Quantity clamps at 1; only an explicit remove deletes the line.
    FloorAtOne,
}

impl fmt::Display for DecrementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecrementPolicy::RemoveAtZero => write!(f, "remove_at_zero"),
            DecrementPolicy::FloorAtOne => write!(f, "floor_at_one"),
        }
    }
}

impl FromStr for DecrementPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remove_at_zero" | "remove" => Ok(DecrementPolicy::RemoveAtZero),
            "floor_at_one" | "floor" | "clamp" => Ok(DecrementPolicy::FloorAtOne),
            other => Err(ValidationError::InvalidFormat {
                field: "decrement_policy".to_string(),
                reason: format!(
                    "unknown policy '{}', expected remove_at_zero or floor_at_one",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Shipping Policy
// =============================================================================

/// Flat-fee shipping that becomes free from a threshold on.
///
/// ```text
///   subtotal == 0          → R$ 0,00   (empty bag pays nothing)
///   0 < subtotal < R$ 50   → R$ 10,00
///   subtotal >= R$ 50      → GRÁTIS
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    pub flat_fee: Money,
    pub free_threshold: Money,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy {
            flat_fee: Money::from_reais(10),
            free_threshold: Money::from_reais(50),
        }
    }
}

impl ShippingPolicy {
    /// Returns the shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.is_positive() && subtotal < self.free_threshold {
            self.flat_fee
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    policy: DecrementPolicy,
}

impl Cart {
    /// Creates a new empty cart with the default decrement policy.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Creates a new empty cart with an explicit decrement policy.
    pub fn with_policy(policy: DecrementPolicy) -> Self {
        Cart {
            items: Vec::new(),
            policy,
        }
    }

    /// Returns the decrement policy in force.
    pub fn policy(&self) -> DecrementPolicy {
        self.policy
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by `quantity`; the
    ///   name, price and image copied on first add stay as they were.
    /// - Product not in cart: a new line is appended.
    /// - `quantity == 0`: nothing happens, so no zero-quantity line can
    ///   ever be created.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(LineItem::from_product(product, quantity));
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns `true` if a line was removed; an absent id is not an error.
    pub fn remove_item(&mut self, product_id: u32) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != initial_len
    }

    /// Applies a single-step change to one line.
    ///
    /// ## Returns
    /// - `Some(quantity)` when the line still exists afterwards
    /// - `None` when the line was removed or was never in the cart
    ///
    /// Under [`DecrementPolicy::FloorAtOne`] a decrement on a single unit
    /// leaves it at 1, so the line is never removed by this method.
    pub fn update_quantity(&mut self, product_id: u32, delta: QuantityDelta) -> Option<u32> {
        let idx = self.items.iter().position(|i| i.product_id == product_id)?;
        let current = self.items[idx].quantity as i64;
        let next = current + delta.step();

        let next = match self.policy {
            DecrementPolicy::FloorAtOne => next.max(1),
            DecrementPolicy::RemoveAtZero => next,
        };

        if next <= 0 {
            self.items.remove(idx);
            return None;
        }

        let next = u32::try_from(next).unwrap_or(u32::MAX);
        self.items[idx].quantity = next;
        Some(next)
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: u32) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Returns the number of distinct lines (the "Sua Sacola (n)" header).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Computes subtotal, shipping and total under a shipping policy.
    pub fn totals(&self, shipping: &ShippingPolicy) -> CartTotals {
        CartTotals::compute(self, shipping)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived totals shown in the bag footer and on the checkout summary.
///
/// Never stored on the cart; recomputed from the current lines on every
/// read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    /// Computes totals for a cart.
    pub fn compute(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.subtotal();
        let shipping = policy.shipping_for(subtotal);

        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Whether shipping is free for this cart.
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Shipping as the footer prints it: `GRÁTIS` or an amount.
    pub fn shipping_label(&self) -> String {
        self.shipping_label_with(CURRENCY_SYMBOL)
    }

    /// Same as [`CartTotals::shipping_label`] with a custom currency symbol.
    pub fn shipping_label_with(&self, symbol: &str) -> String {
        if self.is_free_shipping() {
            "GRÁTIS".to_string()
        } else {
            self.shipping.format_with(symbol)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: u32, price: &str) -> Product {
        Product::new(id, format!("Produto {}", id), price, format!("produto-{}.jpeg", id))
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 2);

        assert_eq!(cart.item_count(), 1);
        let item = cart.get(1).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.name, "Produto 1");
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product(1, "R$ 25,00");

        cart.add_item(&product, 2);
        cart.add_item(&product, 3);

        assert_eq!(cart.item_count(), 1); // Still one line
        assert_eq!(cart.get(1).unwrap().quantity, 5);
    }

    #[test]
    fn test_merge_keeps_original_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 1);

        let repriced = Product::new(1, "Renamed", "R$ 99,00", "other.jpeg");
        cart.add_item(&repriced, 1);

        let item = cart.get(1).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.name, "Produto 1");
        assert_eq!(item.price, "R$ 25,00");
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(3, "R$ 1,00"), 1);
        cart.add_item(&test_product(1, "R$ 1,00"), 1);
        cart.add_item(&test_product(3, "R$ 1,00"), 1);

        let ids: Vec<u32> = cart.items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 1);
        cart.add_item(&test_product(2, "R$ 30,00"), 1);

        assert!(cart.remove_item(1));
        assert_eq!(cart.item_count(), 1);
        assert!(cart.get(1).is_none());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 2);
        let before = cart.items().to_vec();

        assert!(!cart.remove_item(42));
        assert!(!cart.remove_item(42));
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 1);

        assert_eq!(cart.update_quantity(1, QuantityDelta::Increment), Some(2));
        assert_eq!(cart.get(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrement_until_zero_removes_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 3);

        assert_eq!(cart.update_quantity(1, QuantityDelta::Decrement), Some(2));
        assert_eq!(cart.update_quantity(1, QuantityDelta::Decrement), Some(1));
        assert_eq!(cart.update_quantity(1, QuantityDelta::Decrement), None);

        assert!(cart.get(1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_floor_at_one_policy_keeps_last_unit() {
        let mut cart = Cart::with_policy(DecrementPolicy::FloorAtOne);
        cart.add_item(&test_product(1, "R$ 25,00"), 2);

        assert_eq!(cart.update_quantity(1, QuantityDelta::Decrement), Some(1));
        assert_eq!(cart.update_quantity(1, QuantityDelta::Decrement), Some(1));
        assert_eq!(cart.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_quantity_never_observed_below_one() {
        for policy in [DecrementPolicy::RemoveAtZero, DecrementPolicy::FloorAtOne] {
            let mut cart = Cart::with_policy(policy);
            cart.add_item(&test_product(1, "R$ 25,00"), 2);

            for _ in 0..5 {
                cart.update_quantity(1, QuantityDelta::Decrement);
                assert!(cart.items().iter().all(|i| i.quantity >= 1));
            }
        }
    }

    #[test]
    fn test_update_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 25,00"), 1);

        assert_eq!(cart.update_quantity(9, QuantityDelta::Increment), None);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_delta_from_step() {
        assert_eq!(QuantityDelta::try_from(1).unwrap(), QuantityDelta::Increment);
        assert_eq!(QuantityDelta::try_from(-1).unwrap(), QuantityDelta::Decrement);
        assert!(QuantityDelta::try_from(0).is_err());
        assert!(QuantityDelta::try_from(2).is_err());
    }

    #[test]
    fn test_decrement_policy_parsing() {
        assert_eq!(
            "remove_at_zero".parse::<DecrementPolicy>().unwrap(),
            DecrementPolicy::RemoveAtZero
        );
        assert_eq!("FLOOR".parse::<DecrementPolicy>().unwrap(), DecrementPolicy::FloorAtOne);
        assert!("sometimes".parse::<DecrementPolicy>().is_err());
    }

    #[test]
    fn test_totals_below_then_above_free_shipping() {
        let policy = ShippingPolicy::default();
        let mut cart = Cart::new();

        cart.add_item(&test_product(1, "R$ 25,00"), 1);
        let totals = cart.totals(&policy);
        assert_eq!(totals.subtotal.cents(), 2500);
        assert_eq!(totals.shipping.cents(), 1000);
        assert_eq!(totals.total.cents(), 3500);
        assert_eq!(totals.shipping_label(), "R$ 10,00");

        cart.add_item(&test_product(2, "R$ 30,00"), 1);
        let totals = cart.totals(&policy);
        assert_eq!(totals.subtotal.cents(), 5500);
        assert_eq!(totals.shipping.cents(), 0);
        assert_eq!(totals.total.cents(), 5500);
        assert_eq!(totals.shipping_label(), "GRÁTIS");
    }

    #[test]
    fn test_shipping_at_exact_threshold_is_free() {
        let policy = ShippingPolicy::default();
        assert!(policy.shipping_for(Money::from_reais(50)).is_zero());
        assert_eq!(policy.shipping_for(Money::from_cents(4999)).cents(), 1000);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = Cart::new().totals(&ShippingPolicy::default());
        assert_eq!(totals.item_count, 0);
        assert!(totals.subtotal.is_zero());
        assert!(totals.shipping.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_unparseable_price_counts_as_zero() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "sob consulta"), 3);
        cart.add_item(&test_product(2, "R$ 20,00"), 1);

        assert_eq!(cart.subtotal().cents(), 2000);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_unit_price_rounds_before_multiplying() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, "R$ 12,345"), 2);

        // 12,345 rounds to 12,35 per unit, so two units are 24,70.
        assert_eq!(cart.subtotal().cents(), 2470);
    }
}
