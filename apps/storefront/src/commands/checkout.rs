//! # Checkout Commands
//!
//! The checkout screen: order summary, payment options and placing the
//! order.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Finalizar Pedido"                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  place_order(method = "pix" | "card" | "boleto")                        │
//! │        │                                                                │
//! │        ├── unknown method ───────► VALIDATION_ERROR                     │
//! │        ├── empty bag ────────────► CHECKOUT_ERROR                       │
//! │        ▼                                                                │
//! │  OrderConfirmation ──► alert "Pedido Finalizado!" ──► bag is empty      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use planeta_core::checkout;
use planeta_core::{DeliveryAddress, OrderConfirmation, OrderSummary, PaymentMethod};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

/// A payment option as the radio group renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentOption {
    pub key: String,
    pub label: String,
}

/// Available payment options, default first.
pub fn payment_options() -> Vec<PaymentOption> {
    PaymentMethod::ALL
        .iter()
        .map(|m| PaymentOption {
            key: m.key().to_string(),
            label: m.label().to_string(),
        })
        .collect()
}

/// Where the order will ship.
pub fn delivery_address() -> DeliveryAddress {
    DeliveryAddress::default()
}

/// Summary card built from the live bag.
pub fn order_summary(cart: &CartState, config: &ConfigState) -> OrderSummary {
    debug!("order_summary command");
    let totals = cart.with_cart(|c| c.totals(&config.shipping_policy()));
    OrderSummary::from_totals(totals, &config.currency_symbol)
}

/// Places the order and empties the bag.
///
/// ## Arguments
/// * `method` - Payment key; `None` picks the default (Pix)
pub fn place_order(
    cart: &CartState,
    config: &ConfigState,
    method: Option<&str>,
) -> Result<OrderConfirmation, ApiError> {
    let method = method
        .map(str::parse::<PaymentMethod>)
        .transpose()?
        .unwrap_or_default();
    debug!(method = method.key(), "place_order command");

    let confirmation = cart.with_cart_mut(|c| {
        checkout::place_order(
            c,
            method,
            delivery_address(),
            &config.shipping_policy(),
            &config.currency_symbol,
        )
    })?;

    info!(
        order_id = %confirmation.order_id,
        total = %confirmation.total,
        method = method.key(),
        "Order placed"
    );
    Ok(confirmation)
}
