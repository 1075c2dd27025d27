use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QuoteError, QuoteResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}

impl Token {
    pub fn new(symbol: impl Into<String>, decimals: u8, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            name: name.into(),
        }
    }
}

/// An amount in integer base units of some token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn new(amount: impl Into<U256>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> QuoteResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(QuoteError::Overflow)
    }

    pub fn checked_sub(self, other: Self) -> QuoteResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(QuoteError::Overflow)
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sub_underflow() {
        let a = TokenAmount::from(1u64);
        let b = TokenAmount::from(2u64);
        assert_eq!(a.checked_sub(b), Err(QuoteError::Overflow));
        assert_eq!(b.checked_sub(a).unwrap(), TokenAmount::from(1u64));
    }
}
