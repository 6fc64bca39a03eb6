//! # Money Module
//!
//! Provides the `Money` type plus the BRL price parsing and formatting the
//! storefront screens rely on.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices drifts:                                           │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    "R$ 25,00" ──parse_price──► 2500                                     │
//! │    2500 × 2 + 3000 = 8000 ──format──► "R$ 80,00"                        │
//! │                                                                         │
//! │  Strings exist only at the edges (product data in, labels out).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use planeta_core::money::{parse_price, Money};
//!
//! let price = parse_price("R$ 25,00");
//! assert_eq!(price, Money::from_cents(2500));
//! assert_eq!((price * 2).to_string(), "R$ 50,00");
//!
//! // Garbage never panics, it is worth nothing
//! assert!(parse_price("grátis").is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Currency symbol printed in front of every amount.
pub const CURRENCY_SYMBOL: &str = "R$";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Where Money is Used
/// ```text
/// Product.price ("R$ 25,00") ──► parse_price ──► LineItem::line_total
///                                                      │
///          Cart::subtotal ◄────────────────────────────┘
///               │
///               ├──► ShippingPolicy::shipping_for ──► shipping
///               ▼
///          CartTotals.total ──► Display "R$ 35,00"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use planeta_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole reais.
    #[inline]
    pub const fn from_reais(reais: i64) -> Self {
        Money(reais * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use planeta_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2500);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 7500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats with a custom currency symbol: `US$ 12,34`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{} {},{:02}",
            sign,
            symbol,
            self.reais().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a currency-formatted price string into Money.
///
/// ## Accepted Shapes
/// ```text
/// "R$ 25,00"      → 2500     symbol, comma decimal, surrounding spaces
/// "  R$30,5 "     → 3050     one decimal digit
/// "R$ 1.234,56"   → 123456   dots before the comma are thousands marks
/// "19.90"         → 1990     a plain dot decimal still works
/// "12,345"        → 1235     third decimal rounds half away from zero
/// "R$ 7,00 cada"  → 700      trailing text after the number is ignored
/// "sob consulta"  → 0        no leading number at all
/// ```
///
/// Never fails: anything without a leading number is worth zero, which is
/// what the bag screen shows for a malformed price.
pub fn parse_price(input: &str) -> Money {
    let stripped = input.replacen(CURRENCY_SYMBOL, "", 1);
    let mut text = stripped.trim().to_string();

    if let Some(comma) = text.find(',') {
        let (whole, fraction) = text.split_at(comma);
        text = format!("{}.{}", whole.replace('.', ""), &fraction[1..]);
    }

    parse_decimal_prefix(&text).unwrap_or_default()
}

/// Reads the longest `[+-]digits[.digits]` prefix and rounds it to cents.
fn parse_decimal_prefix(text: &str) -> Option<Money> {
    let mut chars = text.chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut whole: i64 = 0;
    let mut seen_digit = false;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        whole = whole.checked_mul(10)?.checked_add(d as i64)?;
        seen_digit = true;
        chars.next();
    }

    // Up to three fraction digits matter: two kept, one for rounding.
    let mut fraction = [0u32; 3];
    if chars.peek() == Some(&'.') {
        chars.next();
        let mut idx = 0;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            if idx < fraction.len() {
                fraction[idx] = d;
            }
            idx += 1;
            seen_digit = true;
            chars.next();
        }
    }

    if !seen_digit {
        return None;
    }

    let mut cents = whole
        .checked_mul(100)?
        .checked_add((fraction[0] * 10 + fraction[1]) as i64)?;
    if fraction[2] >= 5 {
        cents = cents.checked_add(1)?;
    }

    Some(Money(if negative { -cents } else { cents }))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as the screens print prices: `R$ 12,34`.
///
/// No thousands separator is inserted, matching the bag and checkout
/// screens.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
