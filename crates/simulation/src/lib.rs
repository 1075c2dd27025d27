//! Educational simulators built on the pure quoting core.
//!
//! The simulators own a mutable [`pool_sim::SimulatedPool`] and replay
//! trade sequences against it: stochastic or deterministic flow for the
//! price simulator, and scripted attacker/victim orderings for the MEV
//! demos. This crate is the only place pool reserves ever mutate; the
//! domain crate stays a pure projection.

pub mod mev;
pub mod pool_sim;
pub mod position_tracker;
pub mod price_sim;
pub mod trade_flow;

pub mod prelude;
