use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fraction stored as a decimal (0.01 = 1%), convertible to basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10_000u32))
    }

    /// Signed variant for price-impact display.
    pub fn from_signed_bps(bps: i64) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10_000u32))
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10_000u32)).to_u32().unwrap_or(0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.0 * Decimal::from(100u32))
    }
}
