//! # Amounts
//!
//! Source-asset amounts travel as decimal strings and are parsed with
//! `rust_decimal` wherever arithmetic or comparison is needed.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::ValidationError;

/// A validated, strictly positive decimal amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Wrap a decimal, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Apply a basis-point rate (1 bps = 0.01%).
    pub fn bps(&self, basis_points: u32) -> Decimal {
        self.0 * Decimal::from(basis_points) / Decimal::from(10_000u32)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Parse a decimal string amount; must be > 0.
pub fn parse_amount(raw: &str) -> Result<Amount, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    let value =
        Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    Amount::new(value).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(parse_amount("10").unwrap().to_string(), "10");
        assert_eq!(parse_amount("0.5").unwrap().to_string(), "0.5");
        assert_eq!(parse_amount(" 12.340 ").unwrap().to_string(), "12.34");
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("0.000").is_err());
        assert!(parse_amount("-1").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("+5").is_err());
    }

    #[test]
    fn test_bps() {
        let amount = parse_amount("100").unwrap();
        assert_eq!(amount.bps(30), Decimal::from_str("0.3").unwrap());
    }

    proptest! {
        #[test]
        fn prop_positive_integers_parse(n in 1u64..u64::MAX) {
            let amount = parse_amount(&n.to_string()).unwrap();
            prop_assert_eq!(amount.value(), Decimal::from(n));
        }

        #[test]
        fn prop_negative_integers_rejected(n in 1i64..i64::MAX) {
            let negative = format!("-{}", n);
            prop_assert!(parse_amount(&negative).is_err());
        }
    }
}
