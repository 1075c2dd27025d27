use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::pool::PoolState;
use crate::token::TokenAmount;

/// The side of the pair left partially unused by a ratio-bound deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnusedSide {
    A,
    B,
}

/// Preview of a two-sided liquidity deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    /// Liquidity tokens minted for this deposit.
    pub lp_tokens_out: TokenAmount,
    /// Excess of the larger-ratio asset that the deposit cannot absorb.
    /// Disposal (refund) is the transaction layer's concern, not ours.
    pub unused_remainder: Option<(UnusedSide, TokenAmount)>,
}

/// Preview of a liquidity-token redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemQuote {
    /// Underlying returned on the A side (`reserve_in`), base units.
    pub amount_a: TokenAmount,
    /// Underlying returned on the B side (`reserve_out`), base units.
    pub amount_b: TokenAmount,
}

/// Quotes the liquidity tokens minted for depositing `amount_a` and
/// `amount_b` into `pool`.
///
/// First deposit (no outstanding supply) mints the geometric mean
/// `isqrt(amount_a * amount_b)`; nothing constrains the opening ratio.
/// Later deposits must hold the reserve ratio, so the mint is bounded by
/// the smaller per-side share `min(a/reserve_a, b/reserve_b)` and the
/// larger side's excess comes back as `unused_remainder`.
pub fn quote_deposit(
    pool: &PoolState,
    amount_a: TokenAmount,
    amount_b: TokenAmount,
) -> QuoteResult<DepositQuote> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(QuoteError::InvalidAmount);
    }

    if pool.total_lp_supply.is_zero() {
        let product = amount_a
            .0
            .checked_mul(amount_b.0)
            .ok_or(QuoteError::Overflow)?;
        return Ok(DepositQuote {
            lp_tokens_out: TokenAmount(integer_sqrt(product)),
            unused_remainder: None,
        });
    }

    let reserve_a = pool.reserve_in.0;
    let reserve_b = pool.reserve_out.0;
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }

    let supply = pool.total_lp_supply.0;
    let lp_from_a = amount_a
        .0
        .checked_mul(supply)
        .ok_or(QuoteError::Overflow)?
        / reserve_a;
    let lp_from_b = amount_b
        .0
        .checked_mul(supply)
        .ok_or(QuoteError::Overflow)?
        / reserve_b;

    let (lp_tokens_out, unused_remainder) = if lp_from_a <= lp_from_b {
        // A binds; part of B is surplus: used_b = reserve_b * amount_a / reserve_a
        let used_b = reserve_b
            .checked_mul(amount_a.0)
            .ok_or(QuoteError::Overflow)?
            / reserve_a;
        let excess = amount_b.0.saturating_sub(used_b);
        (lp_from_a, remainder(UnusedSide::B, excess))
    } else {
        let used_a = reserve_a
            .checked_mul(amount_b.0)
            .ok_or(QuoteError::Overflow)?
            / reserve_b;
        let excess = amount_a.0.saturating_sub(used_a);
        (lp_from_b, remainder(UnusedSide::A, excess))
    };

    Ok(DepositQuote {
        lp_tokens_out: TokenAmount(lp_tokens_out),
        unused_remainder,
    })
}

/// Quotes the underlying assets returned for burning `lp_tokens_in`:
/// each side pays out `reserve * lp_tokens_in / total_supply`, truncating.
pub fn quote_redeem(pool: &PoolState, lp_tokens_in: TokenAmount) -> QuoteResult<RedeemQuote> {
    if pool.total_lp_supply.is_zero() {
        return Err(QuoteError::EmptyPool);
    }
    if lp_tokens_in.is_zero() || lp_tokens_in > pool.total_lp_supply {
        return Err(QuoteError::InvalidAmount);
    }

    let supply = pool.total_lp_supply.0;
    let amount_a = pool
        .reserve_in
        .0
        .checked_mul(lp_tokens_in.0)
        .ok_or(QuoteError::Overflow)?
        / supply;
    let amount_b = pool
        .reserve_out
        .0
        .checked_mul(lp_tokens_in.0)
        .ok_or(QuoteError::Overflow)?
        / supply;

    Ok(RedeemQuote {
        amount_a: TokenAmount(amount_a),
        amount_b: TokenAmount(amount_b),
    })
}

fn remainder(side: UnusedSide, excess: U256) -> Option<(UnusedSide, TokenAmount)> {
    (!excess.is_zero()).then_some((side, TokenAmount(excess)))
}

/// Integer square root (Babylonian method), rounding down.
fn integer_sqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let two = U256::from(2u64);
    let mut x = n;
    let mut y = (x + U256::one()) / two;
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(r_a: u128, r_b: u128, supply: u128) -> PoolState {
        PoolState::new(
            TokenAmount::from(r_a),
            TokenAmount::from(r_b),
            TokenAmount::from(supply),
            30,
        )
    }

    #[test]
    fn test_bootstrap_deposit_geometric_mean() {
        // 10M token units against 1000 USDT at 6 decimals (1e9 base units):
        // sqrt(1e7 * 1e9) = sqrt(1e16) = 1e8.
        let quote = quote_deposit(
            &pool(0, 0, 0),
            TokenAmount::from(10_000_000u64),
            TokenAmount::from(1_000_000_000u64),
        )
        .unwrap();
        assert_eq!(quote.lp_tokens_out, TokenAmount::from(100_000_000u64));
        assert!(quote.unused_remainder.is_none());
    }

    #[test]
    fn test_integer_sqrt_rounds_down() {
        assert_eq!(integer_sqrt(U256::from(0u64)), U256::zero());
        assert_eq!(integer_sqrt(U256::from(1u64)), U256::one());
        assert_eq!(integer_sqrt(U256::from(99u64)), U256::from(9u64));
        assert_eq!(integer_sqrt(U256::from(100u64)), U256::from(10u64));
    }

    #[test]
    fn test_proportional_deposit_balanced() {
        // Matching the 2:1 reserve ratio exactly mints a proportional share.
        let p = pool(2_000, 1_000, 600);
        let quote = quote_deposit(&p, TokenAmount::from(200u64), TokenAmount::from(100u64))
            .unwrap();
        assert_eq!(quote.lp_tokens_out, TokenAmount::from(60u64));
        assert!(quote.unused_remainder.is_none());
    }

    #[test]
    fn test_deposit_min_ratio_binds() {
        // B side over-supplied: mint follows A, excess B reported back.
        let p = pool(2_000, 1_000, 600);
        let quote = quote_deposit(&p, TokenAmount::from(200u64), TokenAmount::from(150u64))
            .unwrap();
        assert_eq!(quote.lp_tokens_out, TokenAmount::from(60u64));
        assert_eq!(
            quote.unused_remainder,
            Some((UnusedSide::B, TokenAmount::from(50u64)))
        );
    }

    #[test]
    fn test_deposit_zero_amount_rejected() {
        let p = pool(2_000, 1_000, 600);
        assert_eq!(
            quote_deposit(&p, TokenAmount::zero(), TokenAmount::from(100u64)),
            Err(QuoteError::InvalidAmount)
        );
    }

    #[test]
    fn test_redeem_proportional() {
        let p = pool(2_000, 1_000, 600);
        let quote = quote_redeem(&p, TokenAmount::from(60u64)).unwrap();
        assert_eq!(quote.amount_a, TokenAmount::from(200u64));
        assert_eq!(quote.amount_b, TokenAmount::from(100u64));
    }

    #[test]
    fn test_full_redemption_drains_exactly() {
        let p = pool(2_000, 1_000, 600);
        let quote = quote_redeem(&p, TokenAmount::from(600u64)).unwrap();
        assert_eq!(quote.amount_a, p.reserve_in);
        assert_eq!(quote.amount_b, p.reserve_out);
    }

    #[test]
    fn test_redeem_empty_pool() {
        assert_eq!(
            quote_redeem(&pool(0, 0, 0), TokenAmount::from(10u64)),
            Err(QuoteError::EmptyPool)
        );
    }

    #[test]
    fn test_redeem_over_supply_rejected() {
        let p = pool(2_000, 1_000, 600);
        assert_eq!(
            quote_redeem(&p, TokenAmount::from(601u64)),
            Err(QuoteError::InvalidAmount)
        );
    }

    #[test]
    fn test_deposit_then_full_redeem_round_trip() {
        // Depositing at the pool ratio then redeeming the minted tokens
        // returns the deposit within integer truncation.
        let p = pool(1_000_000, 500_000, 750_000);
        let amount_a = TokenAmount::from(10_000u64);
        let amount_b = TokenAmount::from(5_000u64);
        let deposit = quote_deposit(&p, amount_a, amount_b).unwrap();

        let after = PoolState::new(
            p.reserve_in.checked_add(amount_a).unwrap(),
            p.reserve_out.checked_add(amount_b).unwrap(),
            p.total_lp_supply.checked_add(deposit.lp_tokens_out).unwrap(),
            p.fee_bps,
        );
        let redeem = quote_redeem(&after, deposit.lp_tokens_out).unwrap();

        let diff = |a: U256, b: U256| if a > b { a - b } else { b - a };
        assert!(diff(amount_a.0, redeem.amount_a.0) <= U256::one());
        assert!(diff(amount_b.0, redeem.amount_b.0) <= U256::one());
    }
}
