use dexquote_domain::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

/// A mutable pool the simulators trade against.
///
/// Wraps an owned [`PoolState`] and advances it by applying domain quotes.
/// Every mutation goes through the same quote functions the preview paths
/// use, so simulated reserves and previews can never drift apart.
#[derive(Debug, Clone)]
pub struct SimulatedPool {
    state: PoolState,
    /// Fees withheld from trades supplying the "in" asset.
    pub fees_collected_in: TokenAmount,
    /// Fees withheld from trades supplying the "out" asset.
    pub fees_collected_out: TokenAmount,
}

impl SimulatedPool {
    pub fn new(state: PoolState) -> Self {
        Self {
            state,
            fees_collected_in: TokenAmount::zero(),
            fees_collected_out: TokenAmount::zero(),
        }
    }

    /// The current snapshot. Callers quote against this exactly as they
    /// would against a chain read.
    pub fn state(&self) -> &PoolState {
        &self.state
    }

    pub fn spot_price(&self) -> QuoteResult<Decimal> {
        self.state.spot_price()
    }

    /// Executes a swap, advancing the reserves to the quoted post-trade
    /// values. Returns the same quote a pure preview would have produced.
    pub fn apply_swap(
        &mut self,
        direction: TradeDirection,
        amount_in: TokenAmount,
    ) -> QuoteResult<SwapQuote> {
        let oriented = self.state.oriented(direction);
        let quote = quote_swap(&oriented, amount_in)?;

        match direction {
            TradeDirection::InToOut => {
                self.state.reserve_in = quote.new_reserve_in;
                self.state.reserve_out = quote.new_reserve_out;
                self.fees_collected_in = self.fees_collected_in.checked_add(quote.fee_amount)?;
            }
            TradeDirection::OutToIn => {
                self.state.reserve_out = quote.new_reserve_in;
                self.state.reserve_in = quote.new_reserve_out;
                self.fees_collected_out = self.fees_collected_out.checked_add(quote.fee_amount)?;
            }
        }

        debug!(
            ?direction,
            %amount_in,
            amount_out = %quote.amount_out,
            impact_bps = quote.price_impact_bps,
            "applied swap"
        );
        Ok(quote)
    }

    /// Deposits liquidity, growing reserves by the used amounts and the
    /// supply by the minted tokens.
    pub fn apply_deposit(
        &mut self,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
    ) -> QuoteResult<DepositQuote> {
        let quote = quote_deposit(&self.state, amount_a, amount_b)?;

        let (used_a, used_b) = match quote.unused_remainder {
            Some((UnusedSide::A, excess)) => (amount_a.checked_sub(excess)?, amount_b),
            Some((UnusedSide::B, excess)) => (amount_a, amount_b.checked_sub(excess)?),
            None => (amount_a, amount_b),
        };
        self.state.reserve_in = self.state.reserve_in.checked_add(used_a)?;
        self.state.reserve_out = self.state.reserve_out.checked_add(used_b)?;
        self.state.total_lp_supply = self.state.total_lp_supply.checked_add(quote.lp_tokens_out)?;

        debug!(%used_a, %used_b, minted = %quote.lp_tokens_out, "applied deposit");
        Ok(quote)
    }

    /// Redeems liquidity tokens, shrinking reserves and supply.
    pub fn apply_redeem(&mut self, lp_tokens_in: TokenAmount) -> QuoteResult<RedeemQuote> {
        let quote = quote_redeem(&self.state, lp_tokens_in)?;

        self.state.reserve_in = self.state.reserve_in.checked_sub(quote.amount_a)?;
        self.state.reserve_out = self.state.reserve_out.checked_sub(quote.amount_b)?;
        self.state.total_lp_supply = self.state.total_lp_supply.checked_sub(lp_tokens_in)?;

        debug!(
            burned = %lp_tokens_in,
            amount_a = %quote.amount_a,
            amount_b = %quote.amount_b,
            "applied redemption"
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    fn sim(r_in: u128, r_out: u128, supply: u128, fee_bps: u32) -> SimulatedPool {
        SimulatedPool::new(PoolState::new(
            TokenAmount::from(r_in),
            TokenAmount::from(r_out),
            TokenAmount::from(supply),
            fee_bps,
        ))
    }

    #[test]
    fn test_apply_swap_advances_reserves() {
        let mut pool = sim(1_000_000, 1_000_000, 1_000_000, 30);
        let k = pool.state().constant_product().unwrap();
        let quote = pool
            .apply_swap(TradeDirection::InToOut, TokenAmount::from(10_000u64))
            .unwrap();

        assert_eq!(pool.state().reserve_in, quote.new_reserve_in);
        assert_eq!(pool.state().reserve_out, quote.new_reserve_out);
        assert!(pool.state().constant_product().unwrap() >= k);
        assert_eq!(pool.fees_collected_in, quote.fee_amount);
    }

    #[test]
    fn test_apply_swap_reverse_direction() {
        let mut pool = sim(2_000_000, 1_000_000, 1_000_000, 30);
        pool.apply_swap(TradeDirection::OutToIn, TokenAmount::from(10_000u64))
            .unwrap();
        // Supplying the "out" asset grows reserve_out and drains reserve_in.
        assert!(pool.state().reserve_out.0 > U256::from(1_000_000u64));
        assert!(pool.state().reserve_in.0 < U256::from(2_000_000u64));
    }

    #[test]
    fn test_deposit_then_redeem_restores_pool() {
        let mut pool = sim(1_000_000, 500_000, 750_000, 30);
        let deposit = pool
            .apply_deposit(TokenAmount::from(10_000u64), TokenAmount::from(5_000u64))
            .unwrap();
        pool.apply_redeem(deposit.lp_tokens_out).unwrap();

        assert_eq!(pool.state().reserve_in, TokenAmount::from(1_000_000u64));
        assert_eq!(pool.state().reserve_out, TokenAmount::from(500_000u64));
        assert_eq!(pool.state().total_lp_supply, TokenAmount::from(750_000u64));
    }

    #[test]
    fn test_unbalanced_deposit_only_absorbs_ratio() {
        let mut pool = sim(2_000, 1_000, 600, 30);
        pool.apply_deposit(TokenAmount::from(200u64), TokenAmount::from(150u64))
            .unwrap();
        // Excess 50 on the B side never enters the reserves.
        assert_eq!(pool.state().reserve_in, TokenAmount::from(2_200u64));
        assert_eq!(pool.state().reserve_out, TokenAmount::from(1_100u64));
    }
}
