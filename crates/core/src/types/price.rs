//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in the catalog's single display currency (US dollars).
///
/// Wraps a [`Decimal`] so quantity multiplication and discount math stay
/// exact instead of accumulating float error. Serialization is transparent:
/// the catalog API's JSON numbers deserialize straight into a `Price`.
///
/// The demo renders every amount as dollars; multi-currency is a concern for
/// a real backend, not this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Total for `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Price after a percentage discount, rounded to whole cents.
    ///
    /// `percentage` is the catalog's discount figure (`12.96` means 12.96%
    /// off). Midpoints round away from zero, so `$0.005` becomes `$0.01`.
    #[must_use]
    pub fn discounted(&self, percentage: Decimal) -> Self {
        let factor = (Decimal::ONE_HUNDRED - percentage) / Decimal::ONE_HUNDRED;
        Self((self.0 * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl fmt::Display for Price {
    /// Formats as `$19.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap())
    }

    #[test]
    fn test_times_multiplies_exactly() {
        assert_eq!(price("99.99").times(3), price("299.97"));
        assert_eq!(price("10").times(1), price("10"));
        assert_eq!(price("10").times(0), Price::ZERO);
    }

    #[test]
    fn test_discounted_rounds_to_cents() {
        // 549 * (1 - 0.1296) = 477.8496 -> 477.85
        assert_eq!(price("549").discounted("12.96".parse().unwrap()), price("477.85"));
        // Midpoint rounds away from zero: 10 * 0.9995 = 9.995 -> 10.00
        assert_eq!(price("10").discounted("0.05".parse().unwrap()), price("10.00"));
    }

    #[test]
    fn test_zero_discount_is_identity_to_the_cent() {
        assert_eq!(price("19.99").discounted(Decimal::ZERO), price("19.99"));
    }

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(price("19.99").to_string(), "$19.99");
        assert_eq!(price("5").to_string(), "$5.00");
        assert_eq!(price("0.5").to_string(), "$0.50");
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let p: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(p, price("9.99"));
    }
}
