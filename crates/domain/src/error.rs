use thiserror::Error;

/// Failure modes of the quoting core.
///
/// Every quote function returns these as typed results; callers decide
/// whether to warn, block submission or prompt. `InsufficientLiquidity`
/// and `EmptyPool` must block any downstream transaction construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Zero or otherwise non-positive trade/deposit/redemption amount.
    #[error("Amount must be positive")]
    InvalidAmount,
    /// A reserve or total-supply denominator is zero.
    #[error("Division by zero: empty reserve or supply")]
    DivisionByZero,
    /// The quoted output would meet or exceed the available reserve,
    /// or truncates to nothing.
    #[error("Insufficient liquidity for requested trade")]
    InsufficientLiquidity,
    /// Redemption against a pool with no issued liquidity tokens.
    #[error("Pool has no liquidity tokens outstanding")]
    EmptyPool,
    /// A basis-point rate (slippage tolerance or fee) outside [0, 10000].
    #[error("Rate {bps} bps outside [0, 10000]")]
    InvalidTolerance { bps: u32 },
    /// Checked U256 arithmetic overflowed.
    #[error("Arithmetic overflow")]
    Overflow,
}

pub type QuoteResult<T> = Result<T, QuoteError>;
