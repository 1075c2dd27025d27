//! Pure quoting core for a constant-product AMM.
//!
//! Everything in this crate is a deterministic, side-effect-free projection
//! over an immutable [`pool::PoolState`] snapshot: swap previews, liquidity
//! token accounting, slippage bounds and display scaling. Reserves and
//! amounts are kept in integer base units (`U256`) throughout; `Decimal`
//! appears only at the presentation boundary.
//!
//! Fetching snapshots from the chain and submitting transactions are the
//! caller's concern. No function here performs I/O, retries or logging.

pub mod error;
pub mod math;
pub mod pool;
pub mod slippage;
pub mod token;
pub mod value_objects;

pub mod prelude;
