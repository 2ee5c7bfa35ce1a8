//! # Money Module
//!
//! Provides the `Money` type for shilling amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES AT THE STORE BOUNDARY                                           │
//! │                                                                         │
//! │  Catalog rows carry prices as numbers OR as text:                       │
//! │    { "price": 500 }   { "price": "1500" }   { "price": 499.5 }         │
//! │                                                                         │
//! │  Summing those naively mixes string concatenation and float error.     │
//! │                                                                         │
//! │  OUR SOLUTION: convert once, at the boundary, into integer cents       │
//! │    "1500"  → Money(150000)                                              │
//! │    499.5   → Money(49950)                                               │
//! │  Everything downstream (cart totals, checkout text) is integer math.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use duka_core::money::Money;
//!
//! let price = Money::parse("1500").unwrap();
//! assert_eq!(price.formatted(), "1,500");
//! assert_eq!(price.to_string(), "Ksh.1,500");
//!
//! let total: Money = [price, Money::from_shillings(300)].into_iter().sum();
//! assert_eq!(total.formatted(), "1,800");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::CURRENCY_PREFIX;

const CENTS_PER_SHILLING: i64 = 100;

/// Largest price accepted from text or floats: one trillion shillings.
pub const MAX_PRICE: Money = Money::from_shillings(1_000_000_000_000);

// =============================================================================
// Money Type
// =============================================================================

/// A shilling amount stored in cents (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case subtraction,
///   even though catalog prices themselves are validated non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serializes as cents; catalog items use [`shillings`] instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole shillings.
    ///
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// assert_eq!(Money::from_shillings(500).cents(), 50_000);
    /// ```
    #[inline]
    pub const fn from_shillings(shillings: i64) -> Self {
        Money(shillings * CENTS_PER_SHILLING)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-shilling portion.
    #[inline]
    pub const fn shillings(&self) -> i64 {
        self.0 / CENTS_PER_SHILLING
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_SHILLING).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a price that arrived as text.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Plain decimal notation only: `500`, `499.5`, `1500.25`, `.5`
    /// - At most two fractional digits
    /// - No sign, no thousands separators, no currency prefix
    /// - At most [`MAX_PRICE`]
    ///
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 499.5 ").unwrap().cents(), 49_950);
    /// assert!(Money::parse("-5").is_err());
    /// assert!(Money::parse("1,500").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Money, ValidationError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        if text.starts_with('-') {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(ValidationError::invalid_format(
                "price",
                format!("'{}' is not a decimal number", text),
            ));
        }

        if fraction.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "at most 2 decimal places are allowed",
            ));
        }

        let out_of_range = || ValidationError::invalid_format("price", "amount is too large");

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        // "5" → 50 cents, "05" → 5 cents
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| out_of_range())? * 10,
            _ => fraction.parse().map_err(|_| out_of_range())?,
        };

        whole_value
            .checked_mul(CENTS_PER_SHILLING)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Money)
            .filter(|money| *money <= MAX_PRICE)
            .ok_or_else(out_of_range)
    }

    /// Converts a JSON-style floating point shilling amount, rounding to the
    /// nearest cent.
    pub fn from_f64(shillings: f64) -> Result<Money, ValidationError> {
        if !shillings.is_finite() {
            return Err(ValidationError::invalid_format("price", "amount is not a finite number"));
        }

        if shillings < 0.0 {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        let cents = (shillings * CENTS_PER_SHILLING as f64).round();
        if cents > MAX_PRICE.0 as f64 {
            return Err(ValidationError::invalid_format("price", "amount is too large"));
        }

        Ok(Money(cents as i64))
    }

    /// Renders the amount with thousands separators and no currency prefix.
    ///
    /// Trailing zero cents are dropped, so whole amounts render as integers.
    ///
    /// ```rust
    /// use duka_core::money::Money;
    ///
    /// assert_eq!(Money::from_shillings(12_500).formatted(), "12,500");
    /// assert_eq!(Money::from_cents(1_250_050).formatted(), "12,500.5");
    /// assert_eq!(Money::from_cents(99).formatted(), "0.99");
    /// ```
    pub fn formatted(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = group_thousands(magnitude / CENTS_PER_SHILLING as u64);

        match magnitude % CENTS_PER_SHILLING as u64 {
            0 => format!("{}{}", sign, whole),
            cents if cents % 10 == 0 => format!("{}{}.{}", sign, whole, cents / 10),
            cents => format!("{}{}.{:02}", sign, whole, cents),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount the way the storefront prints prices: `Ksh.1,500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CURRENCY_PREFIX, self.formatted())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds instead of overflowing.
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
// Shilling Serde Format
// =============================================================================

/// Serde adapter for prices expressed in shillings.
///
/// Serializes whole amounts as integers and fractional amounts as floats.
/// Deserializes from integers, floats, or numeric strings, which is how
/// catalog rows deliver them.
///
/// ```rust
/// use duka_core::money::{self, Money};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(with = "money::shillings")]
///     price: Money,
/// }
///
/// let row: Row = serde_json::from_str(r#"{ "price": "1500" }"#).unwrap();
/// assert_eq!(row.price, Money::from_shillings(1500));
/// ```
pub mod shillings {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::Money;
    use crate::error::ValidationError;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.cents_part() == 0 {
            serializer.serialize_i64(money.shillings())
        } else {
            serializer.serialize_f64(money.cents() as f64 / 100.0)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(ShillingsVisitor)
    }

    struct ShillingsVisitor;

    impl<'de> Visitor<'de> for ShillingsVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a shilling amount as a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
            if value < 0 {
                return Err(E::custom(ValidationError::Negative {
                    field: "price".to_string(),
                }));
            }
            value
                .checked_mul(super::CENTS_PER_SHILLING)
                .map(Money::from_cents)
                .filter(|money| *money <= super::MAX_PRICE)
                .ok_or_else(|| E::custom("price is too large"))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
            let value = i64::try_from(value).map_err(|_| E::custom("price is too large"))?;
            self.visit_i64(value)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
            Money::from_f64(value).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
            Money::parse(value).map_err(E::custom)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct PricedRow {
        #[serde(with = "shillings")]
        price: Money,
    }

    #[test]
    fn test_from_shillings() {
        let money = Money::from_shillings(1500);
        assert_eq!(money.cents(), 150_000);
        assert_eq!(money.shillings(), 1500);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_shillings(500).to_string(), "Ksh.500");
        assert_eq!(Money::from_shillings(1500).to_string(), "Ksh.1,500");
        assert_eq!(Money::zero().to_string(), "Ksh.0");
    }

    #[test]
    fn test_formatted_thousands() {
        assert_eq!(Money::from_shillings(0).formatted(), "0");
        assert_eq!(Money::from_shillings(999).formatted(), "999");
        assert_eq!(Money::from_shillings(1000).formatted(), "1,000");
        assert_eq!(Money::from_shillings(123_456).formatted(), "123,456");
        assert_eq!(Money::from_shillings(1_234_567).formatted(), "1,234,567");
    }

    #[test]
    fn test_formatted_fractions() {
        assert_eq!(Money::from_cents(49_950).formatted(), "499.5");
        assert_eq!(Money::from_cents(49_905).formatted(), "499.05");
        assert_eq!(Money::from_cents(150_025).formatted(), "1,500.25");
        assert_eq!(Money::from_cents(-550).formatted(), "-5.5");
    }

    #[test]
    fn test_parse_accepts_decimal_text() {
        assert_eq!(Money::parse("500").unwrap(), Money::from_shillings(500));
        assert_eq!(Money::parse("  800 ").unwrap(), Money::from_shillings(800));
        assert_eq!(Money::parse("499.5").unwrap().cents(), 49_950);
        assert_eq!(Money::parse("499.05").unwrap().cents(), 49_905);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("5.").unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(matches!(Money::parse(""), Err(ValidationError::Required { .. })));
        assert!(matches!(Money::parse("-5"), Err(ValidationError::Negative { .. })));
        assert!(matches!(Money::parse("abc"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(Money::parse("1,500"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(Money::parse("1.234"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(Money::parse("."), Err(ValidationError::InvalidFormat { .. })));
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_caps_at_max_price() {
        assert_eq!(Money::parse("1000000000000").unwrap(), MAX_PRICE);
        assert!(Money::parse("1000000000000.01").is_err());
        assert!(Money::parse("92233720368547758").is_err());
        assert!(Money::from_f64(2e12).is_err());
        assert!(serde_json::from_str::<PricedRow>(r#"{"price": 92233720368547758}"#).is_err());
    }

    #[test]
    fn test_add_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!(huge + huge, Money::from_cents(i64::MAX));

        let mut total = huge;
        total += Money::from_shillings(5);
        assert_eq!(total, Money::from_cents(i64::MAX));

        let sum: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(sum.cents(), i64::MAX);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(499.5).unwrap().cents(), 49_950);
        assert_eq!(Money::from_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert!(Money::from_f64(-1.0).is_err());
        assert!(Money::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_shillings(500), Money::from_shillings(300)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_shillings(800));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_shillings_deserialize_number_or_text() {
        let row: PricedRow = serde_json::from_str(r#"{"price": 500}"#).unwrap();
        assert_eq!(row.price, Money::from_shillings(500));

        let row: PricedRow = serde_json::from_str(r#"{"price": "1500"}"#).unwrap();
        assert_eq!(row.price, Money::from_shillings(1500));

        let row: PricedRow = serde_json::from_str(r#"{"price": 499.5}"#).unwrap();
        assert_eq!(row.price.cents(), 49_950);

        assert!(serde_json::from_str::<PricedRow>(r#"{"price": -3}"#).is_err());
        assert!(serde_json::from_str::<PricedRow>(r#"{"price": "free"}"#).is_err());
    }

    #[test]
    fn test_shillings_serialize() {
        let whole = serde_json::to_string(&PricedRow {
            price: Money::from_shillings(800),
        })
        .unwrap();
        assert_eq!(whole, r#"{"price":800}"#);

        let fractional = serde_json::to_string(&PricedRow {
            price: Money::from_cents(49_950),
        })
        .unwrap();
        assert_eq!(fractional, r#"{"price":499.5}"#);
    }
}
