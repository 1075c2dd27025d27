use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{QuoteError, QuoteResult};
use crate::token::TokenAmount;

/// A base-unit amount paired with its display scale.
///
/// All calculation happens on the raw integer; `Decimal` conversion exists
/// only for the presentation boundary (user input and display output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Scales a human-readable value (e.g. "100.5") into base units,
    /// truncating sub-unit dust.
    pub fn parse_units(value: Decimal, decimals: u8) -> QuoteResult<Self> {
        if value.is_sign_negative() {
            return Err(QuoteError::InvalidAmount);
        }
        let multiplier = Decimal::from(
            10u64
                .checked_pow(u32::from(decimals))
                .ok_or(QuoteError::Overflow)?,
        );
        let scaled = value.checked_mul(multiplier).ok_or(QuoteError::Overflow)?;
        let raw = scaled.trunc().to_u128().ok_or(QuoteError::Overflow)?;
        Ok(Self {
            raw: U256::from(raw),
            decimals,
        })
    }

    /// Renders base units back to a human-readable decimal.
    pub fn format_units(&self) -> QuoteResult<Decimal> {
        let value =
            Decimal::from_str(&self.raw.to_string()).map_err(|_| QuoteError::Overflow)?;
        let divisor = Decimal::from(
            10u64
                .checked_pow(u32::from(self.decimals))
                .ok_or(QuoteError::Overflow)?,
        );
        Ok(value / divisor)
    }

    pub fn as_token_amount(&self) -> TokenAmount {
        TokenAmount(self.raw)
    }
}

impl From<Amount> for TokenAmount {
    fn from(a: Amount) -> Self {
        TokenAmount(a.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_units() {
        let a = Amount::parse_units(dec!(100.5), 6).unwrap();
        assert_eq!(a.raw, U256::from(100_500_000u64));
    }

    #[test]
    fn test_parse_units_truncates_dust() {
        let a = Amount::parse_units(dec!(0.1234567), 6).unwrap();
        assert_eq!(a.raw, U256::from(123_456u64));
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert_eq!(
            Amount::parse_units(dec!(-1), 6),
            Err(QuoteError::InvalidAmount)
        );
    }

    #[test]
    fn test_format_units_round_trip() {
        let a = Amount::new(U256::from(1_000_000_000u64), 6);
        assert_eq!(a.format_units().unwrap(), dec!(1000));
    }
}
