//! Re-exports of the commonly used quoting types.
//!
//! ```rust
//! use dexquote_domain::prelude::*;
//! ```

pub use crate::error::{QuoteError, QuoteResult};
pub use crate::math::{
    DepositQuote, RedeemQuote, SwapQuote, UnusedSide, quote_deposit, quote_redeem, quote_swap,
};
pub use crate::pool::{LiquidityPosition, PoolState, TradeDirection, TradeIntent};
pub use crate::slippage::{HIGH_RISK_TOLERANCE_BPS, is_high_risk, minimum_amount_out};
pub use crate::token::{Token, TokenAmount};
pub use crate::value_objects::{Amount, Percentage};
