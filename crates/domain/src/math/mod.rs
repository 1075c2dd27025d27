pub mod constant_product;
pub mod liquidity;

pub use constant_product::{SwapQuote, quote_swap};
pub use liquidity::{DepositQuote, RedeemQuote, UnusedSide, quote_deposit, quote_redeem};
