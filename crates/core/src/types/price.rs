//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic: the dashboard displays them with the
//! business's currency label, but the stored value is just an amount.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the currency's standard unit (e.g. shillings, not cents).
///
/// ```rust
/// use msme_core::Price;
///
/// let unit = Price::from_minor(4999);
/// assert_eq!(unit.times(2), Price::from_minor(9998));
/// assert_eq!(unit.to_string(), "49.99");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in minor units (two decimal places).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// This price scaled by a decimal factor, rounded to two places.
    #[must_use]
    pub fn scaled(self, factor: Decimal) -> Self {
        Self((self.0 * factor).round_dp(2))
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_keeps_cents() {
        assert_eq!(Price::from_minor(12345).amount(), Decimal::new(12345, 2));
        assert!(Price::from_minor(-50).is_negative());
    }

    #[test]
    fn test_sum_and_times() {
        let items = [Price::from_minor(39999), Price::from_minor(4999).times(2)];
        let total: Price = items.iter().sum();
        assert_eq!(total, Price::from_minor(49997));
    }

    #[test]
    fn test_scaled_rounds_to_cents() {
        let price = Price::from_minor(4999);
        assert_eq!(price.scaled(Decimal::new(108, 2)), Price::from_minor(5399));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("100").unwrap();
        let from_string: Price = serde_json::from_str("\"100\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, Price::from_minor(10000));
    }

    #[test]
    fn test_is_negative() {
        assert!(!Price::ZERO.is_negative());
        assert!((Price::ZERO - Price::from_minor(1)).is_negative());
    }
}
