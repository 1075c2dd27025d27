use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::pool::PoolState;
use crate::slippage;
use crate::token::TokenAmount;

const BPS_DENOMINATOR: u32 = 10_000;

/// Pure preview of a single swap against a pool snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Amount received, base units, net of fee.
    pub amount_out: TokenAmount,
    /// Fee withheld from the input before the invariant is applied.
    pub fee_amount: TokenAmount,
    /// Relative change of the marginal price caused by this trade,
    /// in signed basis points. Always negative for a non-trivial trade.
    pub price_impact_bps: i64,
    /// Input reserve after the trade (fee excluded from the pool).
    pub new_reserve_in: TokenAmount,
    /// Output reserve after the trade.
    pub new_reserve_out: TokenAmount,
}

impl SwapQuote {
    /// Hard floor on the received amount for the given slippage tolerance.
    pub fn minimum_out(&self, tolerance_bps: u32) -> QuoteResult<TokenAmount> {
        slippage::minimum_amount_out(self.amount_out, tolerance_bps)
    }
}

/// Quotes the output of swapping `amount_in` against `pool` under the
/// constant-product invariant `x * y = k`.
///
/// The fee is deducted from the input before the invariant is applied
/// (Uniswap-v2 style), uniformly for every caller:
///
/// `effective_in = amount_in * (10000 - fee_bps) / 10000`
/// `amount_out   = reserve_out * effective_in / (reserve_in + effective_in)`
///
/// The second line is the algebraic equivalent of
/// `reserve_out - k / (reserve_in + effective_in)` but truncates in the
/// pool's favor, so `new_in * new_out >= k` holds under integer division.
/// All arithmetic is checked U256; division truncates toward zero.
pub fn quote_swap(pool: &PoolState, amount_in: TokenAmount) -> QuoteResult<SwapQuote> {
    if amount_in.is_zero() {
        return Err(QuoteError::InvalidAmount);
    }
    if !pool.has_liquidity() {
        return Err(QuoteError::DivisionByZero);
    }
    if pool.fee_bps > BPS_DENOMINATOR {
        return Err(QuoteError::InvalidTolerance { bps: pool.fee_bps });
    }

    let reserve_in = pool.reserve_in.0;
    let reserve_out = pool.reserve_out.0;

    let effective_in = amount_in
        .0
        .checked_mul(U256::from(BPS_DENOMINATOR - pool.fee_bps))
        .ok_or(QuoteError::Overflow)?
        / U256::from(BPS_DENOMINATOR);
    let fee_amount = amount_in.0 - effective_in;

    let new_reserve_in = reserve_in
        .checked_add(effective_in)
        .ok_or(QuoteError::Overflow)?;
    let amount_out = reserve_out
        .checked_mul(effective_in)
        .ok_or(QuoteError::Overflow)?
        / new_reserve_in;

    if amount_out.is_zero() || amount_out >= reserve_out {
        return Err(QuoteError::InsufficientLiquidity);
    }
    let new_reserve_out = reserve_out - amount_out;

    let price_impact_bps = price_impact_bps(reserve_in, reserve_out, new_reserve_in, new_reserve_out)?;

    Ok(SwapQuote {
        amount_out: TokenAmount(amount_out),
        fee_amount: TokenAmount(fee_amount),
        price_impact_bps,
        new_reserve_in: TokenAmount(new_reserve_in),
        new_reserve_out: TokenAmount(new_reserve_out),
    })
}

/// Signed relative change of the marginal price `reserve_out / reserve_in`
/// in basis points, via cross-multiplication so no floats are involved:
///
/// `impact = (new_out * old_in) / (new_in * old_out) * 10000 - 10000`
fn price_impact_bps(
    old_in: U256,
    old_out: U256,
    new_in: U256,
    new_out: U256,
) -> QuoteResult<i64> {
    let numerator = new_out
        .checked_mul(old_in)
        .and_then(|v| v.checked_mul(U256::from(BPS_DENOMINATOR)))
        .ok_or(QuoteError::Overflow)?;
    let denominator = new_in.checked_mul(old_out).ok_or(QuoteError::Overflow)?;
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let scaled = numerator / denominator;
    let scaled = i64::try_from(scaled.as_u128()).map_err(|_| QuoteError::Overflow)?;
    Ok(scaled - i64::from(BPS_DENOMINATOR))
}
