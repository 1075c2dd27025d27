use primitive_types::U256;

use crate::error::{QuoteError, QuoteResult};
use crate::token::TokenAmount;

/// Tolerance above which callers should warn the user before submitting.
/// Advisory only; never turned into an error here.
pub const HIGH_RISK_TOLERANCE_BPS: u32 = 500;

/// Hard floor on the received amount used to guard a submitted swap
/// against price movement between quoting and execution:
/// `floor(amount_out * (10000 - tolerance_bps) / 10000)`.
pub fn minimum_amount_out(amount_out: TokenAmount, tolerance_bps: u32) -> QuoteResult<TokenAmount> {
    if tolerance_bps > 10_000 {
        return Err(QuoteError::InvalidTolerance { bps: tolerance_bps });
    }
    let floored = amount_out
        .0
        .checked_mul(U256::from(10_000 - tolerance_bps))
        .ok_or(QuoteError::Overflow)?
        / U256::from(10_000u32);
    Ok(TokenAmount(floored))
}

/// Whether a tolerance is beyond the warning threshold.
#[must_use]
pub fn is_high_risk(tolerance_bps: u32) -> bool {
    tolerance_bps > HIGH_RISK_TOLERANCE_BPS
}
