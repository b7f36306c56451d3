//! Amount type for the euro value of a bill.
//!
//! This module provides the `Amount` type which wraps `Decimal`. It parses what an employee types
//! in the amount field of the form and is exchanged with the bills API as a JSON number.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a euro amount.
///
/// Parsing accepts surrounding whitespace, a trailing `€` and a comma as the decimal separator.
/// An empty string parses to zero, since the form sends whatever is in the field.
///
/// # Examples
///
/// ```
/// # use billed::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("348,50 €").unwrap();
/// assert_eq!(amount.to_string(), "348.5 €");
/// ```
///
/// ```
/// # use billed::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("").unwrap();
/// assert!(amount.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let without_currency = trimmed.strip_suffix('€').unwrap_or(trimmed).trim_end();
        if without_currency.is_empty() {
            return Ok(Amount::default());
        }

        // French input uses a comma as the decimal separator
        let normalized = without_currency.replace(' ', "").replace(',', ".");
        let value = Decimal::from_str(&normalized).map_err(AmountError)?;
        Ok(Amount { value })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} €", self.value.normalize())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Whole amounts go out as integers so the API sees `400`, not `400.0`
        let value = self.value.normalize();
        if value.fract().is_zero() {
            if let Some(i) = value.to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        serializer.serialize_f64(value.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts JSON numbers and strings, since bills created by older clients stored the amount as
/// text.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Amount::new(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Amount::new(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Decimal::from_f64(v)
            .map(Amount::new)
            .ok_or_else(|| E::custom(format!("{v} cannot be represented as an amount")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Amount::default())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        let amount = Amount::from_str("348").unwrap();
        assert_eq!(amount.value(), Decimal::from(348));
    }

    #[test]
    fn test_parse_with_euro_sign() {
        let amount = Amount::from_str("400 €").unwrap();
        assert_eq!(amount.value(), Decimal::from(400));
        let amount = Amount::from_str("400€").unwrap();
        assert_eq!(amount.value(), Decimal::from(400));
    }

    #[test]
    fn test_parse_comma_decimal() {
        let amount = Amount::from_str("12,75").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("12.75").unwrap());
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
        let amount = Amount::from_str("   ").unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from(400).to_string(), "400 €");
        assert_eq!(
            Amount::from_str("12.50").unwrap().to_string(),
            "12.5 €"
        );
    }

    #[test]
    fn test_serialize_whole_amount_as_integer() {
        let json = serde_json::to_string(&Amount::from(400)).unwrap();
        assert_eq!(json, "400");
    }

    #[test]
    fn test_serialize_fractional_amount() {
        let json = serde_json::to_string(&Amount::from_str("12.5").unwrap()).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Amount = serde_json::from_str("400").unwrap();
        let b: Amount = serde_json::from_str("\"400\"").unwrap();
        let c: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.value(), Decimal::from_str("12.5").unwrap());
    }

    #[test]
    fn test_deserialize_null_is_zero() {
        let a: Amount = serde_json::from_str("null").unwrap();
        assert!(a.is_zero());
    }
}
