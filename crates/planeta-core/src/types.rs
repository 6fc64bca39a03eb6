//! # Domain Types
//!
//! Core domain types shared by the cart and the session.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   copied at    ┌─────────────────┐                 │
//! │  │    Product      │   add-time     │    LineItem     │                 │
//! │  │  ─────────────  │ ─────────────► │  ─────────────  │                 │
//! │  │  id (u32)       │                │  product_id     │ ◄── merge key   │
//! │  │  name           │                │  name, price    │                 │
//! │  │  price "R$ .."  │                │  image          │                 │
//! │  │  image          │                │  quantity ≥ 1   │                 │
//! │  └─────────────────┘                └─────────────────┘                 │
//! │                                                                         │
//! │  ┌─────────────────┐   derive       ┌─────────────────┐                 │
//! │  │  ProfileData    │ ─────────────► │    Identity     │                 │
//! │  │  (raw form,     │  (session.rs)  │  (immutable,    │                 │
//! │  │   all optional) │                │   at most one)  │                 │
//! │  └─────────────────┘                └─────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{parse_price, Money};

// =============================================================================
// Product
// =============================================================================

/// A product as the home and detail screens describe it.
///
/// The price stays in its display form (`"R$ 25,00"`); it is parsed into
/// [`Money`] only when totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Numeric product identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Currency-formatted price, e.g. `"R$ 25,00"`.
    pub price: String,

    /// Image reference (asset name or URI).
    pub image: String,
}

impl Product {
    /// Creates a product.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price: price.into(),
            image: image.into(),
        }
    }

    /// Returns the parsed price.
    #[inline]
    pub fn price(&self) -> Money {
        parse_price(&self.price)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `product_id` is the merge key: the cart never holds two lines with the
///   same id.
/// - `name`, `price` and `image` are a frozen copy of the product at the
///   moment it was first added. Merging more units never refreshes them.
/// - `quantity` is at least 1 while the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub product_id: u32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    /// Snapshots a product into a new line.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        LineItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            quantity,
        }
    }

    /// Returns the parsed unit price (zero when the price string is malformed).
    #[inline]
    pub fn unit_price(&self) -> Money {
        parse_price(&self.price)
    }

    /// Calculates the line total (unit price × quantity).
    ///
    /// This is the "Total: R$ …" shown on each bag item card.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The signed-in user's derived profile.
///
/// Built once per sign-in / sign-up by [`crate::session::derive_identity`]
/// and never edited afterwards; changing any field means signing in again.
/// The password is deliberately not part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Identity {
    /// Unique user key. `"N/A"` only when a profile arrived without one.
    pub email: String,

    /// Explicit name, else the email local part, else `"Usuário"`.
    pub display_name: String,

    /// Age as typed in the form, or `"N/A"`.
    pub age: String,

    /// Favourite planet, defaulting to `"Terra"`.
    pub planet: String,

    /// Free-form sex field, or `"N/A"`.
    pub sex: String,

    /// pt-BR date (`dd/mm/yyyy`) stamped when the identity was built.
    pub member_since: String,
}

// =============================================================================
// Profile Data
// =============================================================================

/// Raw profile fields as a form submits them.
///
/// Every field is optional; blank strings are treated exactly like missing
/// ones during derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProfileData {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub planet: Option<String>,
    pub sex: Option<String>,
}

impl ProfileData {
    /// Profile carrying only an email.
    pub fn with_email(email: impl Into<String>) -> Self {
        ProfileData {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Fills every missing optional field with an empty string.
    ///
    /// The sign-in path runs this before derivation so derivation only ever
    /// sees present values. Fields already set are kept as they are.
    pub fn with_blank_defaults(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.age,
            &mut self.planet,
            &mut self.sex,
        ] {
            field.get_or_insert_with(String::new);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_snapshot_and_total() {
        let product = Product::new(7, "Saturno", "R$ 12,50", "saturno.jpeg");
        let item = LineItem::from_product(&product, 3);

        assert_eq!(item.product_id, 7);
        assert_eq!(item.name, "Saturno");
        assert_eq!(item.unit_price().cents(), 1250);
        assert_eq!(item.line_total().cents(), 3750);
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = LineItem::from_product(&Product::new(1, "Sol", "R$ 25,00", "sol.jpeg"), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_blank_defaults_keep_present_fields() {
        let profile = ProfileData {
            email: Some("a@b.com".into()),
            name: Some("Ana".into()),
            ..Default::default()
        }
        .with_blank_defaults();

        assert_eq!(profile.name.as_deref(), Some("Ana"));
        assert_eq!(profile.age.as_deref(), Some(""));
        assert_eq!(profile.planet.as_deref(), Some(""));
        assert_eq!(profile.sex.as_deref(), Some(""));
        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_profile_deserializes_partial_json() {
        let profile: ProfileData =
            serde_json::from_str(r#"{"email":"x@y.com","planet":"Marte"}"#).unwrap();
        assert_eq!(profile.planet.as_deref(), Some("Marte"));
        assert!(profile.name.is_none());
    }
}
