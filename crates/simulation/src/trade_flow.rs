use dexquote_domain::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};

/// One trade in a generated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTrade {
    pub direction: TradeDirection,
    pub amount_in: TokenAmount,
}

impl FlowTrade {
    pub fn new(direction: TradeDirection, amount_in: TokenAmount) -> Self {
        Self {
            direction,
            amount_in,
        }
    }
}

/// Produces the sequence of trades a price simulation replays.
pub trait TradeFlowGenerator {
    fn generate(&mut self, steps: usize) -> Vec<FlowTrade>;
}

/// Stochastic flow: log-normal trade sizes with a fixed buy probability.
///
/// Sizes are drawn in log space so the flow has the occasional large
/// trade against a bulk of small ones, which is what makes price-impact
/// curves in the simulator look like real order flow.
pub struct LogNormalTradeFlow {
    /// Location parameter of the size distribution, in ln(base units).
    pub mu: f64,
    /// Scale parameter of the size distribution.
    pub sigma: f64,
    /// Probability a trade supplies the "in" asset.
    pub buy_probability: f64,
}

impl LogNormalTradeFlow {
    pub fn new(mu: f64, sigma: f64, buy_probability: f64) -> Self {
        Self {
            mu,
            sigma,
            buy_probability,
        }
    }

    /// Balanced flow centered on a typical trade size in base units.
    pub fn balanced(typical_size: u64) -> Self {
        Self::new((typical_size.max(1) as f64).ln(), 0.8, 0.5)
    }
}

impl TradeFlowGenerator for LogNormalTradeFlow {
    fn generate(&mut self, steps: usize) -> Vec<FlowTrade> {
        let mut rng = rand::rng();
        // Degenerate sigma falls back to a constant-size flow.
        let dist = LogNormal::new(self.mu, self.sigma)
            .unwrap_or_else(|_| LogNormal::new(self.mu, f64::EPSILON).unwrap());

        (0..steps)
            .map(|_| {
                let size = dist.sample(&mut rng).max(1.0) as u128;
                let direction = if rng.random_bool(self.buy_probability.clamp(0.0, 1.0)) {
                    TradeDirection::InToOut
                } else {
                    TradeDirection::OutToIn
                };
                FlowTrade::new(direction, TokenAmount::from(size))
            })
            .collect()
    }
}

/// Fixed flow, replayed as given. Used by tests and the CLI's
/// deterministic mode.
pub struct DeterministicTradeFlow {
    pub trades: Vec<FlowTrade>,
}

impl DeterministicTradeFlow {
    pub fn new(trades: Vec<FlowTrade>) -> Self {
        Self { trades }
    }

    /// A flow of `steps` identical trades in one direction.
    pub fn uniform(direction: TradeDirection, amount_in: TokenAmount, steps: usize) -> Self {
        Self::new(vec![FlowTrade::new(direction, amount_in); steps])
    }
}

impl TradeFlowGenerator for DeterministicTradeFlow {
    fn generate(&mut self, _steps: usize) -> Vec<FlowTrade> {
        self.trades.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_normal_flow_sizes_positive() {
        let mut flow = LogNormalTradeFlow::balanced(10_000);
        let trades = flow.generate(200);
        assert_eq!(trades.len(), 200);
        assert!(trades.iter().all(|t| !t.amount_in.is_zero()));
    }

    #[test]
    fn test_one_sided_flow() {
        let mut flow = LogNormalTradeFlow::new(9.0, 0.5, 1.0);
        let trades = flow.generate(50);
        assert!(
            trades
                .iter()
                .all(|t| t.direction == TradeDirection::InToOut)
        );
    }

    #[test]
    fn test_deterministic_flow_replays() {
        let mut flow = DeterministicTradeFlow::uniform(
            TradeDirection::OutToIn,
            TokenAmount::from(500u64),
            3,
        );
        let trades = flow.generate(99);
        assert_eq!(trades.len(), 3);
        assert!(trades.iter().all(|t| t.amount_in == TokenAmount::from(500u64)));
    }
}
