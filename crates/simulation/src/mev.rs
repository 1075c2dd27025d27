use dexquote_domain::prelude::*;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::pool_sim::SimulatedPool;

/// Who submitted a simulated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Victim,
    Attacker,
}

/// One ordered transaction in an attack replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedTx {
    pub id: Uuid,
    pub actor: Actor,
    pub direction: TradeDirection,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    /// Marginal price after this transaction landed.
    pub price_after: Decimal,
    pub impact_bps: i64,
}

/// Outcome of an attack demo.
#[derive(Debug, Clone)]
pub struct AttackReplay {
    pub transactions: Vec<SimulatedTx>,
    pub summary: AttackSummary,
}

#[derive(Debug, Clone)]
pub struct AttackSummary {
    /// What the victim actually received.
    pub victim_amount_out: TokenAmount,
    /// What the victim would have received with no attacker present.
    pub victim_clean_amount_out: TokenAmount,
    /// Output lost to the attacker's ordering, base units.
    pub victim_shortfall: TokenAmount,
    /// Attacker P&L in "in"-asset units (negative when the attack loses).
    pub attacker_profit: Decimal,
    /// Net pool price move across the whole replay, basis points.
    pub price_drift_bps: i64,
}

/// Sandwich demo: the attacker front-runs the victim with 80% of the
/// victim's size in the same direction, lets the victim fill at the
/// worsened price, then back-runs by selling everything acquired.
pub fn simulate_sandwich(
    mut pool: SimulatedPool,
    victim_amount_in: TokenAmount,
    victim_direction: TradeDirection,
) -> QuoteResult<AttackReplay> {
    let clean_quote = quote_swap(&pool.state().oriented(victim_direction), victim_amount_in)?;
    let start_price = pool.spot_price()?;
    let mut txs = Vec::with_capacity(3);

    let front_run_in = TokenAmount(victim_amount_in.0 * U256::from(8u64) / U256::from(10u64));
    let front = record_tx(&mut pool, Actor::Attacker, victim_direction, front_run_in)?;
    let victim = record_tx(&mut pool, Actor::Victim, victim_direction, victim_amount_in)?;

    // Back-run: unwind in the opposite direction with everything the
    // front-run bought.
    let back_direction = match victim_direction {
        TradeDirection::InToOut => TradeDirection::OutToIn,
        TradeDirection::OutToIn => TradeDirection::InToOut,
    };
    let back = record_tx(&mut pool, Actor::Attacker, back_direction, front.amount_out)?;

    let attacker_profit = to_decimal(back.amount_out.0)? - to_decimal(front.amount_in.0)?;
    let victim_amount_out = victim.amount_out;
    let summary = AttackSummary {
        victim_amount_out,
        victim_clean_amount_out: clean_quote.amount_out,
        victim_shortfall: TokenAmount(
            clean_quote.amount_out.0.saturating_sub(victim_amount_out.0),
        ),
        attacker_profit,
        price_drift_bps: drift_bps(start_price, pool.spot_price()?)?,
    };
    info!(
        shortfall = %summary.victim_shortfall,
        profit = %summary.attacker_profit,
        "sandwich replay complete"
    );

    txs.extend([front, victim, back]);
    Ok(AttackReplay {
        transactions: txs,
        summary,
    })
}

/// Front-run demo: the attacker lands 120% of the victim's size ahead of
/// the victim and keeps the position (no back-run).
pub fn simulate_front_run(
    mut pool: SimulatedPool,
    victim_amount_in: TokenAmount,
    victim_direction: TradeDirection,
) -> QuoteResult<AttackReplay> {
    let clean_quote = quote_swap(&pool.state().oriented(victim_direction), victim_amount_in)?;
    let start_price = pool.spot_price()?;

    let attacker_in = TokenAmount(victim_amount_in.0 * U256::from(12u64) / U256::from(10u64));
    let front = record_tx(&mut pool, Actor::Attacker, victim_direction, attacker_in)?;
    let victim = record_tx(&mut pool, Actor::Victim, victim_direction, victim_amount_in)?;

    // The attacker's gain here is unrealized; report the victim's loss and
    // value the attacker position at the clean pre-attack quote rate.
    let clean_rate =
        to_decimal(clean_quote.amount_out.0)? / to_decimal(victim_amount_in.0)?;
    let attacker_profit =
        to_decimal(front.amount_out.0)? - to_decimal(front.amount_in.0)? * clean_rate;

    let summary = AttackSummary {
        victim_amount_out: victim.amount_out,
        victim_clean_amount_out: clean_quote.amount_out,
        victim_shortfall: TokenAmount(
            clean_quote.amount_out.0.saturating_sub(victim.amount_out.0),
        ),
        attacker_profit,
        price_drift_bps: drift_bps(start_price, pool.spot_price()?)?,
    };

    Ok(AttackReplay {
        transactions: vec![front, victim],
        summary,
    })
}

/// Arbitrage demo: an external venue quotes the "out" asset at a premium
/// over the pool, so the attacker buys from the pool and (notionally)
/// sells outside. Only the pool leg is simulated.
pub fn simulate_arbitrage(
    mut pool: SimulatedPool,
    trade_amount_in: TokenAmount,
    external_premium_bps: u32,
) -> QuoteResult<AttackReplay> {
    let start_price = pool.spot_price()?;
    let tx = record_tx(&mut pool, Actor::Attacker, TradeDirection::InToOut, trade_amount_in)?;

    // Pool spot is out-per-in; the external venue pays a premium on the
    // out asset, i.e. more in-units per out-unit than 1/spot.
    let premium = Decimal::ONE + Decimal::from(external_premium_bps) / Decimal::from(10_000u32);
    let external_in_per_out = (Decimal::ONE / start_price) * premium;
    let attacker_profit =
        to_decimal(tx.amount_out.0)? * external_in_per_out - to_decimal(tx.amount_in.0)?;

    let amount_out = tx.amount_out;
    let summary = AttackSummary {
        victim_amount_out: TokenAmount::zero(),
        victim_clean_amount_out: TokenAmount::zero(),
        victim_shortfall: TokenAmount::zero(),
        attacker_profit,
        price_drift_bps: drift_bps(start_price, pool.spot_price()?)?,
    };
    info!(%amount_out, profit = %summary.attacker_profit, "arbitrage replay complete");

    Ok(AttackReplay {
        transactions: vec![tx],
        summary,
    })
}

fn record_tx(
    pool: &mut SimulatedPool,
    actor: Actor,
    direction: TradeDirection,
    amount_in: TokenAmount,
) -> QuoteResult<SimulatedTx> {
    let quote = pool.apply_swap(direction, amount_in)?;
    Ok(SimulatedTx {
        id: Uuid::new_v4(),
        actor,
        direction,
        amount_in,
        amount_out: quote.amount_out,
        price_after: pool.spot_price()?,
        impact_bps: quote.price_impact_bps,
    })
}

fn to_decimal(v: U256) -> QuoteResult<Decimal> {
    Decimal::from_str(&v.to_string()).map_err(|_| QuoteError::Overflow)
}

fn drift_bps(start: Decimal, end: Decimal) -> QuoteResult<i64> {
    use rust_decimal::prelude::ToPrimitive;
    if start.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    ((end - start) / start * Decimal::from(10_000u32))
        .round()
        .to_i64()
        .ok_or(QuoteError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> SimulatedPool {
        SimulatedPool::new(PoolState::new(
            TokenAmount::from(10_000_000u64),
            TokenAmount::from(10_000_000u64),
            TokenAmount::from(10_000_000u64),
            30,
        ))
    }

    #[test]
    fn test_sandwich_victim_worse_than_clean() {
        let replay =
            simulate_sandwich(pool(), TokenAmount::from(500_000u64), TradeDirection::InToOut)
                .unwrap();

        assert_eq!(replay.transactions.len(), 3);
        assert_eq!(replay.transactions[0].actor, Actor::Attacker);
        assert_eq!(replay.transactions[1].actor, Actor::Victim);
        assert_eq!(replay.transactions[2].actor, Actor::Attacker);
        assert!(replay.summary.victim_amount_out < replay.summary.victim_clean_amount_out);
        assert!(!replay.summary.victim_shortfall.is_zero());
        // With a 30 bps fee and this size the sandwich clears its costs.
        assert!(replay.summary.attacker_profit > Decimal::ZERO);
    }

    #[test]
    fn test_front_run_ordering_and_shortfall() {
        let replay =
            simulate_front_run(pool(), TokenAmount::from(500_000u64), TradeDirection::InToOut)
                .unwrap();

        assert_eq!(replay.transactions.len(), 2);
        assert_eq!(replay.transactions[0].actor, Actor::Attacker);
        assert!(!replay.summary.victim_shortfall.is_zero());
        assert!(replay.summary.price_drift_bps < 0);
    }

    #[test]
    fn test_arbitrage_profit_at_premium() {
        // A 5% external premium on a small trade beats the 0.3% fee
        // plus impact comfortably.
        let replay = simulate_arbitrage(pool(), TokenAmount::from(100_000u64), 500).unwrap();
        assert_eq!(replay.transactions.len(), 1);
        assert!(replay.summary.attacker_profit > Decimal::ZERO);
    }

    #[test]
    fn test_arbitrage_no_premium_loses_fee() {
        let replay = simulate_arbitrage(pool(), TokenAmount::from(100_000u64), 0).unwrap();
        assert!(replay.summary.attacker_profit < Decimal::ZERO);
    }
}
