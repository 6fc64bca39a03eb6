//! # Cart Commands
//!
//! Commands behind the detail screen's "add to bag" button and the bag
//! screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  In Bag  │────►│ Checkout │────►│  Order   │       │
//! │  │   Bag    │     │          │     │  Screen  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order         │
//! │                   update_cart_item                  (checkout.rs)       │
//! │                   remove_from_cart                       │              │
//! │                        │                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use planeta_core::catalog::find_planet_by_id;
use planeta_core::validation::validate_quantity;
use planeta_core::{Cart, CartTotals, LineItem, Product, QuantityDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

/// One bag line plus its printed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: LineItem,
    pub line_total_label: String,
}

/// Cart response including items, totals and footer labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub subtotal_label: String,
    pub shipping_label: String,
    pub total_label: String,
}

impl CartResponse {
    pub fn build(cart: &Cart, config: &ConfigState) -> Self {
        let totals = cart.totals(&config.shipping_policy());

        CartResponse {
            items: cart
                .items()
                .iter()
                .map(|item| CartLine {
                    line_total_label: config.format(item.line_total()),
                    item: item.clone(),
                })
                .collect(),
            subtotal_label: config.format(totals.subtotal),
            shipping_label: totals.shipping_label_with(&config.currency_symbol),
            total_label: config.format(totals.total),
            totals,
        }
    }
}

/// Gets the current bag contents.
///
/// ## Bag Screen
/// ```text
/// ┌────────────────────────────────────────────────┐
/// │  Sua Sacola (2)                                │
/// ├────────────────────────────────────────────────┤
/// │  Sol        R$ 25,00   (−) 1 (+)   Total: ...  │
/// │  Terra      R$ 30,00   (−) 1 (+)   Total: ...  │
/// ├────────────────────────────────────────────────┤
/// │  Subtotal                          R$ 55,00    │
/// │  Frete                             GRÁTIS      │
/// │  Total                             R$ 55,00    │
/// └────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::build(c, config))
}

/// Adds a catalog product to the bag.
///
/// ## Arguments
/// * `product_id` - Catalog id of the planet
/// * `quantity` - Units to add (default: 1, range 1..=999)
pub fn add_to_cart(
    cart: &CartState,
    config: &ConfigState,
    product_id: u32,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, ?quantity, "add_to_cart command");

    let product = find_planet_by_id(product_id)?.to_product();
    add_product_to_cart(cart, config, &product, quantity)
}

/// Adds an arbitrary product snapshot to the bag.
///
/// Merges into the existing line when the id is already present.
pub fn add_product_to_cart(
    cart: &CartState,
    config: &ConfigState,
    product: &Product,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = validate_quantity(quantity.unwrap_or(1))?;
    debug!(product_id = product.id, quantity, "Adding product to cart");

    Ok(cart.with_cart_mut(|c| {
        c.add_item(product, quantity);
        CartResponse::build(c, config)
    }))
}

/// Applies a (+) or (−) press to one line.
///
/// ## Arguments
/// * `product_id` - Line to change
/// * `delta` - `1` or `-1`; anything else is rejected
pub fn update_cart_item(
    cart: &CartState,
    config: &ConfigState,
    product_id: u32,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, delta, "update_cart_item command");

    let delta = QuantityDelta::try_from(delta)?;
    Ok(cart.with_cart_mut(|c| {
        c.update_quantity(product_id, delta);
        CartResponse::build(c, config)
    }))
}

/// Removes a line from the bag. Unknown ids leave the bag unchanged.
pub fn remove_from_cart(cart: &CartState, config: &ConfigState, product_id: u32) -> CartResponse {
    debug!(product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(product_id);
        CartResponse::build(c, config)
    })
}

/// Empties the bag.
pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (CartState, ConfigState) {
        (CartState::new(), ConfigState::default())
    }

    #[test]
    fn test_add_to_cart_with_shipping() {
        let (cart, config) = setup();

        // Sol, R$ 25,00
        let response = add_to_cart(&cart, &config, 1, None).unwrap();
        assert_eq!(response.totals.subtotal.cents(), 2500);
        assert_eq!(response.shipping_label, "R$ 10,00");
        assert_eq!(response.total_label, "R$ 35,00");

        // Terra, R$ 30,00
        let response = add_to_cart(&cart, &config, 4, Some(1)).unwrap();
        assert_eq!(response.totals.subtotal.cents(), 5500);
        assert_eq!(response.shipping_label, "GRÁTIS");
        assert_eq!(response.total_label, "R$ 55,00");
        assert_eq!(response.items.len(), 2);
    }

    #[test]
    fn test_add_same_product_merges() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, 1, Some(2)).unwrap();
        let response = add_to_cart(&cart, &config, 1, Some(3)).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].item.quantity, 5);
        assert_eq!(response.items[0].line_total_label, "R$ 125,00");
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (cart, config) = setup();

        assert_eq!(
            add_to_cart(&cart, &config, 1, Some(0)).unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            add_to_cart(&cart, &config, 99, None).unwrap_err().code,
            ErrorCode::NotFound
        );
        assert!(get_cart(&cart, &config).items.is_empty());
    }

    #[test]
    fn test_decrement_until_removed() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, 1, Some(2)).unwrap();

        update_cart_item(&cart, &config, 1, -1).unwrap();
        let response = update_cart_item(&cart, &config, 1, -1).unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.total_label, "R$ 0,00");
    }

    #[test]
    fn test_update_rejects_large_step() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, 1, None).unwrap();

        let err = update_cart_item(&cart, &config, 1, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&cart, &config).totals.total_quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let (cart, config) = setup();
        add_to_cart(&cart, &config, 1, None).unwrap();
        add_to_cart(&cart, &config, 2, None).unwrap();

        let unchanged = remove_from_cart(&cart, &config, 42);
        assert_eq!(unchanged.items.len(), 2);

        let response = remove_from_cart(&cart, &config, 1);
        assert_eq!(response.items.len(), 1);

        assert!(clear_cart(&cart, &config).items.is_empty());
    }

    #[test]
    fn test_custom_product_and_symbol() {
        let cart = CartState::new();
        let config = ConfigState {
            currency_symbol: "US$".into(),
            ..ConfigState::default()
        };
        let mug = Product::new(500, "Caneca", "R$ 60,00", "caneca.jpeg");

        let response = add_product_to_cart(&cart, &config, &mug, None).unwrap();
        assert_eq!(response.subtotal_label, "US$ 60,00");
        assert_eq!(response.shipping_label, "GRÁTIS");
    }

    #[test]
    fn test_checkout_uses_bag_currency_symbol() {
        use crate::commands::checkout::{order_summary, place_order};

        let cart = CartState::new();
        let config = ConfigState {
            currency_symbol: "US$".into(),
            ..ConfigState::default()
        };
        let bag = add_to_cart(&cart, &config, 1, None).unwrap();
        assert_eq!(bag.total_label, "US$ 35,00");

        let summary = order_summary(&cart, &config);
        assert_eq!(summary.total_label, bag.total_label);
        assert_eq!(summary.shipping_label, bag.shipping_label);

        let confirmation = place_order(&cart, &config, Some("pix")).unwrap();
        assert_eq!(
            confirmation.message,
            "Seu pedido no valor de US$ 35,00 foi confirmado. Método de Pagamento: Pix."
        );
    }

    #[test]
    fn test_response_serializes_flat_lines() {
        let (cart, config) = setup();
        let response = add_to_cart(&cart, &config, 1, None).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["items"][0]["productId"], 1);
        assert_eq!(json["items"][0]["lineTotalLabel"], "R$ 25,00");
        assert_eq!(json["totals"]["subtotal"], 2500);
    }
}
