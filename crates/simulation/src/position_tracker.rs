//! LP position tracking across simulated deposits and redemptions.
//!
//! Records a snapshot after every liquidity event so a caller can chart
//! how a holder's share of the pool evolves.

use dexquote_domain::prelude::*;

use crate::pool_sim::SimulatedPool;

/// What a liquidity event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityEvent {
    Deposit,
    Redeem,
}

/// State of the tracked position right after an event.
#[derive(Debug, Clone, Copy)]
pub struct PositionSnapshot {
    pub event: LiquidityEvent,
    /// Liquidity tokens minted or burned by the event.
    pub lp_delta: TokenAmount,
    /// Balance after the event.
    pub lp_tokens: TokenAmount,
    /// Share of the pool after the event, basis points.
    pub share_bps: u32,
}

/// Tracks one holder's liquidity-token balance against a simulated pool.
#[derive(Debug)]
pub struct PositionTracker {
    position: LiquidityPosition,
    pub snapshots: Vec<PositionSnapshot>,
}

impl PositionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: LiquidityPosition::new(TokenAmount::zero()),
            snapshots: Vec::new(),
        }
    }

    pub fn position(&self) -> &LiquidityPosition {
        &self.position
    }

    /// Deposits into the pool on behalf of the tracked holder.
    pub fn deposit(
        &mut self,
        pool: &mut SimulatedPool,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
    ) -> QuoteResult<DepositQuote> {
        let quote = pool.apply_deposit(amount_a, amount_b)?;
        self.position.lp_tokens = self.position.lp_tokens.checked_add(quote.lp_tokens_out)?;
        self.snapshot(LiquidityEvent::Deposit, quote.lp_tokens_out, pool)?;
        Ok(quote)
    }

    /// Redeems part of the tracked holder's balance.
    pub fn redeem(
        &mut self,
        pool: &mut SimulatedPool,
        lp_tokens: TokenAmount,
    ) -> QuoteResult<RedeemQuote> {
        if lp_tokens > self.position.lp_tokens {
            return Err(QuoteError::InvalidAmount);
        }
        let quote = pool.apply_redeem(lp_tokens)?;
        self.position.lp_tokens = self.position.lp_tokens.checked_sub(lp_tokens)?;
        self.snapshot(LiquidityEvent::Redeem, lp_tokens, pool)?;
        Ok(quote)
    }

    fn snapshot(
        &mut self,
        event: LiquidityEvent,
        lp_delta: TokenAmount,
        pool: &SimulatedPool,
    ) -> QuoteResult<()> {
        let share_bps = if pool.state().total_lp_supply.is_zero() {
            0
        } else {
            self.position.pool_share_bps(pool.state().total_lp_supply)?
        };
        self.snapshots.push(PositionSnapshot {
            event,
            lp_delta,
            lp_tokens: self.position.lp_tokens,
            share_bps,
        });
        Ok(())
    }
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> SimulatedPool {
        SimulatedPool::new(PoolState::new(
            TokenAmount::from(1_000_000u64),
            TokenAmount::from(500_000u64),
            TokenAmount::from(750_000u64),
            30,
        ))
    }

    #[test]
    fn test_share_grows_with_deposits() {
        let mut pool = pool();
        let mut tracker = PositionTracker::new();

        tracker
            .deposit(&mut pool, TokenAmount::from(100_000u64), TokenAmount::from(50_000u64))
            .unwrap();
        let first_share = tracker.snapshots[0].share_bps;

        tracker
            .deposit(&mut pool, TokenAmount::from(100_000u64), TokenAmount::from(50_000u64))
            .unwrap();
        let second_share = tracker.snapshots[1].share_bps;

        assert!(first_share > 0);
        assert!(second_share > first_share);
    }

    #[test]
    fn test_full_exit_returns_share_to_zero() {
        let mut pool = pool();
        let mut tracker = PositionTracker::new();
        tracker
            .deposit(&mut pool, TokenAmount::from(100_000u64), TokenAmount::from(50_000u64))
            .unwrap();

        let balance = tracker.position().lp_tokens;
        tracker.redeem(&mut pool, balance).unwrap();

        assert!(tracker.position().lp_tokens.is_zero());
        assert_eq!(tracker.snapshots.last().unwrap().share_bps, 0);
    }

    #[test]
    fn test_cannot_redeem_more_than_held() {
        let mut pool = pool();
        let mut tracker = PositionTracker::new();
        tracker
            .deposit(&mut pool, TokenAmount::from(100_000u64), TokenAmount::from(50_000u64))
            .unwrap();

        assert_eq!(
            tracker.redeem(&mut pool, TokenAmount::from(u128::MAX)),
            Err(QuoteError::InvalidAmount)
        );
    }
}
