//! Re-exports of the commonly used simulator types.
//!
//! ```rust
//! use dexquote_simulation::prelude::*;
//! ```

pub use crate::mev::{
    Actor, AttackReplay, AttackSummary, SimulatedTx, simulate_arbitrage, simulate_front_run,
    simulate_sandwich,
};
pub use crate::pool_sim::SimulatedPool;
pub use crate::position_tracker::{LiquidityEvent, PositionSnapshot, PositionTracker};
pub use crate::price_sim::{PriceSample, PriceSimSummary, PriceSimulation, run_price_simulation};
pub use crate::trade_flow::{
    DeterministicTradeFlow, FlowTrade, LogNormalTradeFlow, TradeFlowGenerator,
};
