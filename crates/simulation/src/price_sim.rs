use dexquote_domain::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::pool_sim::SimulatedPool;
use crate::trade_flow::TradeFlowGenerator;

/// One executed step of a price simulation.
#[derive(Debug, Clone)]
pub struct PriceSample {
    pub step: usize,
    pub direction: TradeDirection,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    /// Marginal price after the trade.
    pub price: Decimal,
    pub impact_bps: i64,
}

/// Aggregate of a completed price simulation.
#[derive(Debug, Clone)]
pub struct PriceSimSummary {
    pub start_price: Decimal,
    pub end_price: Decimal,
    /// Largest single-trade impact seen, in absolute basis points.
    pub peak_impact_bps: i64,
    pub trades_executed: usize,
    /// Trades the pool rejected (dust input, drained reserve).
    pub trades_rejected: usize,
}

/// Outcome of [`run_price_simulation`]: the per-step samples plus the
/// end state of the pool for inspection.
#[derive(Debug)]
pub struct PriceSimulation {
    pub samples: Vec<PriceSample>,
    pub summary: PriceSimSummary,
    pub pool: SimulatedPool,
}

/// Replays `steps` trades from `flow` against `pool`, sampling the
/// marginal price after each fill.
///
/// Rejected trades (quote errors) are counted but do not stop the run;
/// the pool is left exactly as the last successful fill left it.
pub fn run_price_simulation(
    mut pool: SimulatedPool,
    flow: &mut dyn TradeFlowGenerator,
    steps: usize,
) -> QuoteResult<PriceSimulation> {
    let start_price = pool.spot_price()?;
    let mut samples = Vec::with_capacity(steps);
    let mut rejected = 0usize;
    let mut peak_impact_bps = 0i64;

    for (step, trade) in flow.generate(steps).into_iter().enumerate() {
        match pool.apply_swap(trade.direction, trade.amount_in) {
            Ok(quote) => {
                let price = pool.spot_price()?;
                if quote.price_impact_bps.abs() > peak_impact_bps.abs() {
                    peak_impact_bps = quote.price_impact_bps;
                }
                samples.push(PriceSample {
                    step,
                    direction: trade.direction,
                    amount_in: trade.amount_in,
                    amount_out: quote.amount_out,
                    price,
                    impact_bps: quote.price_impact_bps,
                });
            }
            Err(err) => {
                debug!(step, %trade.amount_in, %err, "trade rejected");
                rejected += 1;
            }
        }
    }

    let end_price = pool.spot_price()?;
    let summary = PriceSimSummary {
        start_price,
        end_price,
        peak_impact_bps,
        trades_executed: samples.len(),
        trades_rejected: rejected,
    };
    info!(
        executed = summary.trades_executed,
        rejected = summary.trades_rejected,
        %summary.start_price,
        %summary.end_price,
        "price simulation finished"
    );

    Ok(PriceSimulation {
        samples,
        summary,
        pool,
    })
}
