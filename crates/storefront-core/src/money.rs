//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers:                          │
//! │    { "price": 109.95 }                                                  │
//! │                                                                         │
//! │  Summing them as floats drifts:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: round to cents ONCE at the wire boundary,               │
//! │  then every sum is exact integer arithmetic.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(999);
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_decimal_string(), "14.99");
//! assert_eq!(total.to_string(), "$14.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Wire price (109.95) ──► Product.price ──► CartEntry snapshot ──► Cart total
///                                │
///                                └──► "$109.95" in the catalog listing
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Largest accepted price, wire or typed: `$9,223,372,036,854.77`.
    ///
    /// Ten thousand slots at this price still sum without saturating.
    pub const MAX_PRICE: Money = Money(i64::MAX / 10_000);

    /// Converts a major-unit amount as it appears on the wire.
    ///
    /// The amount is rounded to the nearest cent. Returns `None` for
    /// negative, NaN or infinite amounts and for anything above
    /// [`Money::MAX_PRICE`].
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents > Money::MAX_PRICE.0 as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the amount in major units, for the wire.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
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

    /// Formats the amount with exactly two decimals and no currency symbol.
    ///
    /// This is the cart total format shown in the navigation badge and on the
    /// cart screen.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::zero().to_decimal_string(), "0.00");
    /// assert_eq!(Money::from_cents(1499).to_decimal_string(), "14.99");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a price the way a user types it into the product form.
///
/// Accepts an optional leading `$`, digits, and at most two decimals after a
/// `.`; `"5"`, `"5.5"`, `"$9.99"` are all valid. Amounts above
/// [`Money::MAX_PRICE`] are rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a number with at most two decimals".to_string(),
        };

        let s = s.trim();
        let s = s.strip_prefix('$').unwrap_or(s);

        if let Some(rest) = s.strip_prefix('-') {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
                return Err(ValidationError::MustNotBeNegative {
                    field: "price".to_string(),
                });
            }
            return Err(invalid());
        }

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return Err(invalid());
        }
        if !major.chars().all(|c| c.is_ascii_digit())
            || !minor.chars().all(|c| c.is_ascii_digit())
            || minor.len() > 2
        {
            return Err(invalid());
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor.parse().map_err(|_| invalid())?,
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
            .filter(|money| *money <= Money::MAX_PRICE)
            .ok_or_else(invalid)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for prices expressed in major units on the wire.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::major_units")]
/// pub price: Money,
/// ```
pub mod major_units {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major_units())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_units(amount)
            .ok_or_else(|| D::Error::custom(format!("invalid price: {}", amount)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with a currency symbol, e.g. `$10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Saturates at `i64::MAX` cents instead of overflowing.
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
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(1499).to_decimal_string(), "14.99");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_from_major_units_rounds_to_cents() {
        assert_eq!(Money::from_major_units(109.95).map(|m| m.cents()), Some(10995));
        assert_eq!(Money::from_major_units(9.99).map(|m| m.cents()), Some(999));
        assert_eq!(Money::from_major_units(0.1 + 0.2).map(|m| m.cents()), Some(30));
        assert_eq!(Money::from_major_units(0.0), Some(Money::zero()));
    }

    #[test]
    fn test_from_major_units_rejects_invalid() {
        assert!(Money::from_major_units(-0.01).is_none());
        assert!(Money::from_major_units(f64::NAN).is_none());
        assert!(Money::from_major_units(f64::INFINITY).is_none());
        assert!(Money::from_major_units(5.0e16).is_none());
    }

    #[test]
    fn test_max_price_boundary() {
        let max = Money::MAX_PRICE.to_major_units();
        assert!(Money::from_major_units(max).is_some());
        assert!(Money::from_major_units(max * 2.0).is_none());

        assert_eq!(
            "9223372036854.77".parse::<Money>().unwrap(),
            Money::MAX_PRICE
        );
        assert!("9223372036854.78".parse::<Money>().is_err());
        assert!("92233720368547758.07".parse::<Money>().is_err());
    }

    #[test]
    fn test_addition_saturates() {
        let near_max = Money::from_cents(i64::MAX - 1);
        assert_eq!((near_max + Money::from_cents(5)).cents(), i64::MAX);

        let total: Money = [near_max, near_max].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("5".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("5.5".parse::<Money>().unwrap().cents(), 550);
        assert_eq!(" $12.30 ".parse::<Money>().unwrap().cents(), 1230);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("0".parse::<Money>().unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "-3".parse::<Money>(),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);

        let mut running = a;
        running += b;
        assert_eq!(running.cents(), 1500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_wire_round_trip_through_product_json() {
        #[derive(Serialize, Deserialize)]
        struct Wire {
            #[serde(with = "major_units")]
            price: Money,
        }

        let wire: Wire = serde_json::from_str(r#"{"price":109.95}"#).unwrap();
        assert_eq!(wire.price.cents(), 10995);
        assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"price":109.95}"#);

        assert!(serde_json::from_str::<Wire>(r#"{"price":-1}"#).is_err());
    }
}
