//! Monetary amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Error returned when a price cannot be accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidPrice {
    #[error("invalid price string {0:?}")]
    Unparsable(String),

    #[error("price must be finite and non-negative, got {0}")]
    OutOfRange(f64),
}

/// Either JSON shape a price may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// A non-negative price in a single currency.
///
/// Source data carries prices either as JSON numbers or as numeric
/// strings; both deserialize to the same value.
///
/// ```
/// use flight_server::domain::Price;
///
/// let a: Price = serde_json::from_str("199.5").unwrap();
/// let b: Price = serde_json::from_str("\"199.5\"").unwrap();
/// assert_eq!(a, b);
/// assert!(serde_json::from_str::<Price>("true").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPrice", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Create a price, rejecting negative and non-finite amounts.
    pub fn new(amount: f64) -> Result<Self, InvalidPrice> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(InvalidPrice::OutOfRange(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the raw amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to cents, half-up.
    pub fn rounded(&self) -> f64 {
        round_half_up_cents(self.0)
    }
}

impl TryFrom<RawPrice> for Price {
    type Error = InvalidPrice;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        match raw {
            RawPrice::Number(n) => Price::new(n),
            RawPrice::Text(s) => {
                let n: f64 = s.parse().map_err(|_| InvalidPrice::Unparsable(s.clone()))?;
                Price::new(n)
            }
        }
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        price.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::default(), Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

/// Round to two decimal places, half-up.
///
/// The amount is first snapped to a millionth of a cent so that decimal
/// literals like `100.005`, whose nearest `f64` sits just below the
/// midpoint, still round up as they read.
///
/// ```
/// use flight_server::domain::round_half_up_cents;
///
/// assert_eq!(round_half_up_cents(100.005), 100.01);
/// assert_eq!(round_half_up_cents(2.675), 2.68);
/// assert_eq!(round_half_up_cents(0.125), 0.13);
/// assert_eq!(round_half_up_cents(19.994), 19.99);
/// ```
pub fn round_half_up_cents(amount: f64) -> f64 {
    let cents = (amount * 100.0 * 1e6).round() / 1e6;
    (cents + 0.5).floor() / 100.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rounded value is within half a cent of the input
        #[test]
        fn rounding_is_close(cents in 0u64..10_000_000, frac in 0.0f64..1.0) {
            let amount = (cents as f64 + frac) / 100.0;
            let rounded = round_half_up_cents(amount);
            prop_assert!((rounded - amount).abs() <= 0.005 + 1e-8);
        }

        /// Whole-cent amounts are unchanged
        #[test]
        fn whole_cents_fixed(cents in 0u64..10_000_000) {
            let amount = cents as f64 / 100.0;
            prop_assert_eq!(round_half_up_cents(amount), amount);
        }
    }
}
