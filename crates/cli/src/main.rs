//! Command line front end for the AMM quote engine and simulators.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dexquote_domain::prelude::*;
use dexquote_simulation::prelude::*;
use prettytable::{Table, row};
use serde_json::json;

#[derive(Parser)]
#[command(name = "dexquote")]
#[command(about = "Constant-product AMM quote engine and trade simulators", long_about = None)]
struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview a swap against a pool snapshot
    Swap {
        /// Reserve of the supplied asset, base units
        #[arg(long)]
        reserve_in: u128,

        /// Reserve of the received asset, base units
        #[arg(long)]
        reserve_out: u128,

        /// Swap fee in basis points (100 = 1%)
        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Amount supplied, base units
        #[arg(long)]
        amount_in: u128,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u32,
    },
    /// Preview the liquidity tokens minted for a two-sided deposit
    Deposit {
        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        /// Outstanding liquidity-token supply (0 for a new pool)
        #[arg(long)]
        lp_supply: u128,

        #[arg(long)]
        amount_a: u128,

        #[arg(long)]
        amount_b: u128,
    },
    /// Preview the assets returned for burning liquidity tokens
    Redeem {
        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        #[arg(long)]
        lp_supply: u128,

        /// Liquidity tokens to burn
        #[arg(long)]
        lp_tokens: u128,
    },
    /// Replay a stochastic trade flow and chart the price
    Trades {
        #[arg(long)]
        reserve_in: u128,

        #[arg(long)]
        reserve_out: u128,

        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Number of trades to replay
        #[arg(long, default_value_t = 50)]
        steps: usize,

        /// Typical trade size, base units
        #[arg(long, default_value_t = 10_000)]
        typical_size: u64,
    },
    /// Replay a sandwich attack around a victim trade
    Sandwich {
        #[arg(long)]
        reserve_in: u128,

        #[arg(long)]
        reserve_out: u128,

        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Victim trade size, base units
        #[arg(long)]
        victim_amount: u128,
    },
    /// Replay a front-running attack ahead of a victim trade
    Frontrun {
        #[arg(long)]
        reserve_in: u128,

        #[arg(long)]
        reserve_out: u128,

        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        #[arg(long)]
        victim_amount: u128,
    },
    /// Replay an arbitrage trade against an external price premium
    Arbitrage {
        #[arg(long)]
        reserve_in: u128,

        #[arg(long)]
        reserve_out: u128,

        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Arbitrage trade size, base units
        #[arg(long)]
        amount: u128,

        /// External venue premium over the pool price, basis points
        #[arg(long, default_value_t = 500)]
        premium_bps: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Swap {
            reserve_in,
            reserve_out,
            fee_bps,
            amount_in,
            slippage_bps,
        } => {
            let pool = PoolState::new(
                TokenAmount::from(reserve_in),
                TokenAmount::from(reserve_out),
                TokenAmount::zero(),
                fee_bps,
            );
            let quote = quote_swap(&pool, TokenAmount::from(amount_in))?;
            let min_out = quote.minimum_out(slippage_bps)?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "amount_out": quote.amount_out.to_string(),
                        "fee_amount": quote.fee_amount.to_string(),
                        "price_impact_bps": quote.price_impact_bps,
                        "minimum_amount_out": min_out.to_string(),
                        "high_risk_tolerance": is_high_risk(slippage_bps),
                    }))?
                );
            } else {
                let mut table = Table::new();
                table.add_row(row!["Amount out", quote.amount_out]);
                table.add_row(row!["Fee", quote.fee_amount]);
                table.add_row(row![
                    "Price impact",
                    Percentage::from_signed_bps(quote.price_impact_bps)
                ]);
                table.add_row(row!["Minimum out", min_out]);
                table.printstd();
                if is_high_risk(slippage_bps) {
                    println!(
                        "⚠️  Slippage tolerance {slippage_bps} bps exceeds the {HIGH_RISK_TOLERANCE_BPS} bps warning threshold"
                    );
                }
            }
        }
        Commands::Deposit {
            reserve_a,
            reserve_b,
            lp_supply,
            amount_a,
            amount_b,
        } => {
            let pool = PoolState::new(
                TokenAmount::from(reserve_a),
                TokenAmount::from(reserve_b),
                TokenAmount::from(lp_supply),
                0,
            );
            let quote = quote_deposit(
                &pool,
                TokenAmount::from(amount_a),
                TokenAmount::from(amount_b),
            )?;

            if cli.json {
                let unused = quote.unused_remainder.map(|(side, amount)| {
                    json!({ "side": format!("{side:?}"), "amount": amount.to_string() })
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "lp_tokens_out": quote.lp_tokens_out.to_string(),
                        "unused_remainder": unused,
                    }))?
                );
            } else {
                println!("LP tokens minted: {}", quote.lp_tokens_out);
                match quote.unused_remainder {
                    Some((side, amount)) => {
                        println!("Unused remainder on side {side:?}: {amount}")
                    }
                    None => println!("Deposit fully absorbed at the pool ratio"),
                }
            }
        }
        Commands::Redeem {
            reserve_a,
            reserve_b,
            lp_supply,
            lp_tokens,
        } => {
            let pool = PoolState::new(
                TokenAmount::from(reserve_a),
                TokenAmount::from(reserve_b),
                TokenAmount::from(lp_supply),
                0,
            );
            let quote = quote_redeem(&pool, TokenAmount::from(lp_tokens))?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "amount_a": quote.amount_a.to_string(),
                        "amount_b": quote.amount_b.to_string(),
                    }))?
                );
            } else {
                println!("Returned A: {}", quote.amount_a);
                println!("Returned B: {}", quote.amount_b);
            }
        }
        Commands::Trades {
            reserve_in,
            reserve_out,
            fee_bps,
            steps,
            typical_size,
        } => {
            let pool = SimulatedPool::new(PoolState::new(
                TokenAmount::from(reserve_in),
                TokenAmount::from(reserve_out),
                TokenAmount::zero(),
                fee_bps,
            ));
            let mut flow = LogNormalTradeFlow::balanced(typical_size);
            let result = run_price_simulation(pool, &mut flow, steps)?;

            if cli.json {
                let samples: Vec<_> = result
                    .samples
                    .iter()
                    .map(|s| {
                        json!({
                            "step": s.step,
                            "amount_in": s.amount_in.to_string(),
                            "amount_out": s.amount_out.to_string(),
                            "price": s.price,
                            "impact_bps": s.impact_bps,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "start_price": result.summary.start_price,
                        "end_price": result.summary.end_price,
                        "peak_impact_bps": result.summary.peak_impact_bps,
                        "trades_executed": result.summary.trades_executed,
                        "trades_rejected": result.summary.trades_rejected,
                        "samples": samples,
                    }))?
                );
            } else {
                let mut table = Table::new();
                table.add_row(row!["Step", "Direction", "In", "Out", "Price", "Impact"]);
                for s in &result.samples {
                    table.add_row(row![
                        s.step,
                        format!("{:?}", s.direction),
                        s.amount_in,
                        s.amount_out,
                        s.price,
                        Percentage::from_signed_bps(s.impact_bps),
                    ]);
                }
                table.printstd();
                println!(
                    "Price {} -> {} over {} trades ({} rejected), peak impact {}",
                    result.summary.start_price,
                    result.summary.end_price,
                    result.summary.trades_executed,
                    result.summary.trades_rejected,
                    Percentage::from_signed_bps(result.summary.peak_impact_bps),
                );
            }
        }
        Commands::Sandwich {
            reserve_in,
            reserve_out,
            fee_bps,
            victim_amount,
        } => {
            let pool = simulated_pool(reserve_in, reserve_out, fee_bps);
            let replay = simulate_sandwich(
                pool,
                TokenAmount::from(victim_amount),
                TradeDirection::InToOut,
            )?;
            print_attack(&replay, cli.json)?;
        }
        Commands::Frontrun {
            reserve_in,
            reserve_out,
            fee_bps,
            victim_amount,
        } => {
            let pool = simulated_pool(reserve_in, reserve_out, fee_bps);
            let replay = simulate_front_run(
                pool,
                TokenAmount::from(victim_amount),
                TradeDirection::InToOut,
            )?;
            print_attack(&replay, cli.json)?;
        }
        Commands::Arbitrage {
            reserve_in,
            reserve_out,
            fee_bps,
            amount,
            premium_bps,
        } => {
            let pool = simulated_pool(reserve_in, reserve_out, fee_bps);
            let replay = simulate_arbitrage(pool, TokenAmount::from(amount), premium_bps)?;
            print_attack(&replay, cli.json)?;
        }
    }

    Ok(())
}

fn simulated_pool(reserve_in: u128, reserve_out: u128, fee_bps: u32) -> SimulatedPool {
    SimulatedPool::new(PoolState::new(
        TokenAmount::from(reserve_in),
        TokenAmount::from(reserve_out),
        TokenAmount::zero(),
        fee_bps,
    ))
}

fn print_attack(replay: &AttackReplay, as_json: bool) -> Result<()> {
    if as_json {
        let txs: Vec<_> = replay
            .transactions
            .iter()
            .map(|tx| {
                json!({
                    "id": tx.id,
                    "actor": format!("{:?}", tx.actor),
                    "direction": format!("{:?}", tx.direction),
                    "amount_in": tx.amount_in.to_string(),
                    "amount_out": tx.amount_out.to_string(),
                    "price_after": tx.price_after,
                    "impact_bps": tx.impact_bps,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "transactions": txs,
                "victim_amount_out": replay.summary.victim_amount_out.to_string(),
                "victim_clean_amount_out": replay.summary.victim_clean_amount_out.to_string(),
                "victim_shortfall": replay.summary.victim_shortfall.to_string(),
                "attacker_profit": replay.summary.attacker_profit,
                "price_drift_bps": replay.summary.price_drift_bps,
            }))?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Actor", "Direction", "In", "Out", "Price after", "Impact"]);
    for tx in &replay.transactions {
        table.add_row(row![
            format!("{:?}", tx.actor),
            format!("{:?}", tx.direction),
            tx.amount_in,
            tx.amount_out,
            tx.price_after,
            Percentage::from_signed_bps(tx.impact_bps),
        ]);
    }
    table.printstd();

    println!(
        "Victim received {} (clean execution would pay {}, shortfall {})",
        replay.summary.victim_amount_out,
        replay.summary.victim_clean_amount_out,
        replay.summary.victim_shortfall,
    );
    println!(
        "Attacker P&L: {} | pool price drift: {}",
        replay.summary.attacker_profit,
        Percentage::from_signed_bps(replay.summary.price_drift_bps),
    );
    Ok(())
}
