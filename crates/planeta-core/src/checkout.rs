//! # Checkout
//!
//! Payment methods, the delivery address, and order placement.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Placing an Order                                 │
//! │                                                                         │
//! │  Bag ── "Finalizar Compra" ──► Checkout screen                          │
//! │                                   │  OrderSummary (real cart totals)   │
//! │                                   │  DeliveryAddress                   │
//! │                                   │  PaymentMethod (default Pix)       │
//! │                                   ▼                                    │
//! │                              place_order()                              │
//! │                   ┌───────────────┴───────────────┐                    │
//! │              empty cart                      has lines                  │
//! │                   │                               │                    │
//! │             Err(EmptyCart)            OrderConfirmation                 │
//! │                                       cart.clear()                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartTotals, ShippingPolicy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// Payment options offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Pix,
    #[serde(rename = "card")]
    CreditCard,
    Boleto,
}

impl PaymentMethod {
    /// All methods in the order the screen lists them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Pix,
        PaymentMethod::CreditCard,
        PaymentMethod::Boleto,
    ];

    /// Stable key used by the screen's radio group.
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::CreditCard => "card",
            PaymentMethod::Boleto => "boleto",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::CreditCard => "Cartão de Crédito",
            PaymentMethod::Boleto => "Boleto Bancário",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| CoreError::UnknownPaymentMethod(s.trim().to_string()))
    }
}

// =============================================================================
// Delivery Address
// =============================================================================

/// Where the order is shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryAddress {
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
}

/// Until address editing exists every order ships to the same address.
impl Default for DeliveryAddress {
    fn default() -> Self {
        DeliveryAddress {
            street: "Rua das Flores".to_string(),
            number: "123".to_string(),
            district: "Jardim Novo".to_string(),
            city: "São Paulo".to_string(),
            postal_code: "01000-000".to_string(),
        }
    }
}

impl fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} - {}, {} - CEP: {}",
            self.street, self.number, self.district, self.city, self.postal_code
        )
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// The "Resumo do Pedido" card: totals plus the labels it prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub totals: CartTotals,
    pub subtotal_label: String,
    pub shipping_label: String,
    pub total_label: String,
}

impl OrderSummary {
    /// Labels are printed with `symbol` in front of every amount.
    pub fn from_totals(totals: CartTotals, symbol: &str) -> Self {
        OrderSummary {
            subtotal_label: totals.subtotal.format_with(symbol),
            shipping_label: totals.shipping_label_with(symbol),
            total_label: totals.total.format_with(symbol),
            totals,
        }
    }
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// What the customer sees once an order goes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    #[ts(type = "string")]
    pub order_id: Uuid,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub address: DeliveryAddress,
    pub message: String,
    #[ts(type = "string")]
    pub placed_at: DateTime<Utc>,
}

/// Confirmation text shown in the "Pedido Finalizado!" alert.
pub fn confirmation_message(total: Money, method: PaymentMethod, symbol: &str) -> String {
    format!(
        "Seu pedido no valor de {} foi confirmado. Método de Pagamento: {}.",
        total.format_with(symbol),
        method.label()
    )
}

/// Places an order for everything in the cart.
///
/// On success the cart is emptied. An empty cart is rejected and left
/// untouched. `symbol` is the currency symbol used in the message.
///
/// ## Example
/// ```rust
/// use planeta_core::cart::{Cart, ShippingPolicy};
/// use planeta_core::checkout::{place_order, DeliveryAddress, PaymentMethod};
/// use planeta_core::money::CURRENCY_SYMBOL;
/// use planeta_core::types::Product;
///
/// let mut cart = Cart::new();
/// cart.add_item(&Product::new(1, "Sol", "R$ 25,00", "sol.jpeg"), 1);
///
/// let confirmation = place_order(
///     &mut cart,
///     PaymentMethod::Pix,
///     DeliveryAddress::default(),
///     &ShippingPolicy::default(),
///     CURRENCY_SYMBOL,
/// )
/// .unwrap();
///
/// assert_eq!(confirmation.total.cents(), 3500);
/// assert!(cart.is_empty());
/// ```
pub fn place_order(
    cart: &mut Cart,
    method: PaymentMethod,
    address: DeliveryAddress,
    shipping: &ShippingPolicy,
    symbol: &str,
) -> CoreResult<OrderConfirmation> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let total = cart.totals(shipping).total;
    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4(),
        total,
        payment_method: method,
        address,
        message: confirmation_message(total, method, symbol),
        placed_at: Utc::now(),
    };

    cart.clear();
    Ok(confirmation)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn cart_with(price: &str, qty: u32) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "Sol", price, "sol.jpeg"), qty);
        cart
    }

    #[test]
    fn test_payment_method_keys_and_labels() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Pix);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!(" BOLETO ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Boleto);
        assert_eq!(PaymentMethod::CreditCard.label(), "Cartão de Crédito");
        assert_eq!(PaymentMethod::Boleto.to_string(), "Boleto Bancário");

        assert!(matches!(
            "cheque".parse::<PaymentMethod>(),
            Err(CoreError::UnknownPaymentMethod(k)) if k == "cheque"
        ));
    }

    #[test]
    fn test_payment_method_serializes_as_key() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"card\"");
    }

    #[test]
    fn test_default_address() {
        let address = DeliveryAddress::default();
        assert_eq!(
            address.to_string(),
            "Rua das Flores, 123 - Jardim Novo, São Paulo - CEP: 01000-000"
        );
    }

    #[test]
    fn test_order_summary_labels() {
        let summary = OrderSummary::from_totals(cart_with("R$ 25,00", 1).totals(&ShippingPolicy::default()), "R$");
        assert_eq!(summary.subtotal_label, "R$ 25,00");
        assert_eq!(summary.shipping_label, "R$ 10,00");
        assert_eq!(summary.total_label, "R$ 35,00");

        let free = OrderSummary::from_totals(cart_with("R$ 55,00", 1).totals(&ShippingPolicy::default()), "R$");
        assert_eq!(free.shipping_label, "GRÁTIS");
    }

    #[test]
    fn test_place_order_confirms_and_clears() {
        let mut cart = cart_with("R$ 30,00", 2);

        let confirmation = place_order(
            &mut cart,
            PaymentMethod::CreditCard,
            DeliveryAddress::default(),
            &ShippingPolicy::default(),
            "R$",
        )
        .unwrap();

        assert_eq!(confirmation.total.cents(), 6000);
        assert_eq!(
            confirmation.message,
            "Seu pedido no valor de R$ 60,00 foi confirmado. Método de Pagamento: Cartão de Crédito."
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut cart = Cart::new();
        let result = place_order(
            &mut cart,
            PaymentMethod::Pix,
            DeliveryAddress::default(),
            &ShippingPolicy::default(),
            "R$",
        );
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_labels_follow_currency_symbol() {
        let totals = cart_with("R$ 25,00", 1).totals(&ShippingPolicy::default());
        let summary = OrderSummary::from_totals(totals, "US$");
        assert_eq!(summary.subtotal_label, "US$ 25,00");
        assert_eq!(summary.shipping_label, "US$ 10,00");
        assert_eq!(summary.total_label, "US$ 35,00");

        assert_eq!(
            confirmation_message(totals.total, PaymentMethod::Boleto, "US$"),
            "Seu pedido no valor de US$ 35,00 foi confirmado. Método de Pagamento: Boleto Bancário."
        );
    }

    #[test]
    fn test_order_ids_are_unique() {
        let policy = ShippingPolicy::default();
        let a = place_order(&mut cart_with("R$ 1,00", 1), PaymentMethod::Pix, DeliveryAddress::default(), &policy, "R$").unwrap();
        let b = place_order(&mut cart_with("R$ 1,00", 1), PaymentMethod::Pix, DeliveryAddress::default(), &policy, "R$").unwrap();
        assert_ne!(a.order_id, b.order_id);
    }
}
