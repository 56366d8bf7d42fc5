//! Amount type for representing transaction values
//!
//! Event values arrive as text. Parsing them yields either a known decimal
//! value or the explicit `Unavailable` marker, and arithmetic involving an
//! unavailable operand stays unavailable instead of panicking or silently
//! turning into a float NaN.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// A decimal amount that may be unavailable
///
/// Serializes as a JSON number, or `null` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    /// A parsed decimal value
    Known(Decimal),
    /// The value was missing, unparsable, or derived from such a value
    Unavailable,
}

impl Amount {
    /// Create a zero amount
    pub const fn zero() -> Self {
        Self::Known(Decimal::ZERO)
    }

    /// Create an amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self::Known(value)
    }

    /// Create an amount from an integer number of units
    pub fn from_units(units: i64) -> Self {
        Self::Known(Decimal::from(units))
    }

    /// Parse an amount, returning an error for unparsable text
    ///
    /// Accepts plain decimals ("10.50", "-10.50", "+3"), and scientific
    /// notation ("1.5e3").
    pub fn try_parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();
        let unsigned = s.strip_prefix('+').unwrap_or(s);

        if unsigned.is_empty() {
            return Err(AmountParseError::Empty);
        }

        Decimal::from_str(unsigned)
            .or_else(|_| Decimal::from_scientific(unsigned))
            .map(Self::Known)
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))
    }

    /// Parse an amount, mapping any failure to `Unavailable`
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Self::Unavailable)
    }

    /// Parse an optional raw value; a missing value is unavailable
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or(Self::Unavailable)
    }

    /// Get the decimal value if known
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Check if the amount is known
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Check if the amount is strictly positive
    ///
    /// An unavailable amount is never positive.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Known(v) if *v > Decimal::ZERO)
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Known(v) if *v < Decimal::ZERO)
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        match self {
            Self::Known(v) => Self::Known(v.abs()),
            Self::Unavailable => Self::Unavailable,
        }
    }

    /// Convert to a float for charting
    pub fn to_f64(&self) -> Option<f64> {
        self.value().and_then(|v| v.to_f64())
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{}", v.normalize()),
            Self::Unavailable => write!(f, "NaN"),
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a.checked_add(b).map_or(Self::Unavailable, Self::Known),
            _ => Self::Unavailable,
        }
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a.checked_sub(b).map_or(Self::Unavailable, Self::Known),
            _ => Self::Unavailable,
        }
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Known(v) => Self::Known(-v),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_f64() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw
            .and_then(Decimal::from_f64)
            .map_or(Self::Unavailable, Self::Known))
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Empty amount"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
