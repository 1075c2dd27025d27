use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{QuoteError, QuoteResult};
use crate::token::TokenAmount;

/// Which side of the pair is being supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    InToOut,
    OutToIn,
}

/// Immutable snapshot of a two-asset constant-product pool.
///
/// Constructed from a chain read or simulator-entered values, valid for the
/// duration of one quote, and superseded by a fresh snapshot after any
/// state-changing call. Quoting never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Reserve of the "in" asset, base units.
    pub reserve_in: TokenAmount,
    /// Reserve of the "out" asset, base units.
    pub reserve_out: TokenAmount,
    /// Outstanding liquidity-token supply.
    pub total_lp_supply: TokenAmount,
    /// Swap fee in basis points (100 = 1%).
    pub fee_bps: u32,
}

impl PoolState {
    pub fn new(
        reserve_in: TokenAmount,
        reserve_out: TokenAmount,
        total_lp_supply: TokenAmount,
        fee_bps: u32,
    ) -> Self {
        Self {
            reserve_in,
            reserve_out,
            total_lp_supply,
            fee_bps,
        }
    }

    /// The same pool viewed from the opposite trading direction.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            reserve_in: self.reserve_out,
            reserve_out: self.reserve_in,
            ..*self
        }
    }

    /// The snapshot oriented so `reserve_in` is the supplied asset.
    #[must_use]
    pub fn oriented(&self, direction: TradeDirection) -> Self {
        match direction {
            TradeDirection::InToOut => *self,
            TradeDirection::OutToIn => self.flipped(),
        }
    }

    /// Marginal price of the "in" asset denominated in the "out" asset,
    /// `reserve_out / reserve_in`.
    pub fn spot_price(&self) -> QuoteResult<Decimal> {
        if self.reserve_in.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        let r_in = Decimal::from_str(&self.reserve_in.0.to_string())
            .map_err(|_| QuoteError::Overflow)?;
        let r_out = Decimal::from_str(&self.reserve_out.0.to_string())
            .map_err(|_| QuoteError::Overflow)?;
        Ok(r_out / r_in)
    }

    /// The constant product `k = reserve_in * reserve_out`.
    pub fn constant_product(&self) -> QuoteResult<U256> {
        self.reserve_in
            .0
            .checked_mul(self.reserve_out.0)
            .ok_or(QuoteError::Overflow)
    }

    /// True when both reserves are funded and a quote is defined.
    #[must_use]
    pub fn has_liquidity(&self) -> bool {
        !self.reserve_in.is_zero() && !self.reserve_out.is_zero()
    }
}

/// A user-entered trade request, still in human-readable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub direction: TradeDirection,
    /// Human-readable amount of the supplied asset, e.g. "100.5".
    pub amount_in: Decimal,
    pub slippage_tolerance_bps: u32,
}

impl TradeIntent {
    pub fn new(direction: TradeDirection, amount_in: Decimal, slippage_tolerance_bps: u32) -> Self {
        Self {
            direction,
            amount_in,
            slippage_tolerance_bps,
        }
    }

    /// Scales the entered amount into base units of the supplied asset.
    pub fn amount_in_base(&self, decimals: u8) -> QuoteResult<TokenAmount> {
        if self.amount_in <= Decimal::ZERO {
            return Err(QuoteError::InvalidAmount);
        }
        Ok(crate::value_objects::Amount::parse_units(self.amount_in, decimals)?.into())
    }
}

/// A user's claim on a pool, as a liquidity-token balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    pub lp_tokens: TokenAmount,
}

impl LiquidityPosition {
    pub fn new(lp_tokens: TokenAmount) -> Self {
        Self { lp_tokens }
    }

    /// Share of the pool in basis points, recomputed on demand.
    pub fn pool_share_bps(&self, total_lp_supply: TokenAmount) -> QuoteResult<u32> {
        if total_lp_supply.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        let scaled = self
            .lp_tokens
            .0
            .checked_mul(U256::from(10_000u32))
            .ok_or(QuoteError::Overflow)?;
        let bps = scaled / total_lp_supply.0;
        if bps > U256::from(u32::MAX) {
            return Err(QuoteError::Overflow);
        }
        Ok(bps.as_u32())
    }
}
