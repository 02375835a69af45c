//! Display and printing utilities

use std::time::Instant;
use tracing::{info, warn};
use crate::{
    bot::SessionStats,
    types::{OpportunityVerdict, Plan, SettlementInstruction},
    utils::format_units,
};

pub fn print_opportunity(verdict: &OpportunityVerdict) {
    warn!("\n🎯 ARBITRAGE OPPORTUNITY");
    warn!("📋 Strategy: buy on {} → sell on {}", verdict.buy_venue, verdict.sell_venue);
    warn!("💰 Profit Analysis:");
    warn!("   Estimated profit: {} USDC", format_units(verdict.profit_magnitude(), 6));
    warn!("   Buy leg output:   {} USDC", format_units(verdict.buy_leg_out, 6));
}

pub fn print_plan(plan: &Plan) {
    info!("🧾 Settlement plan ({} instructions):", plan.len());
    for (i, instruction) in plan.instructions().iter().enumerate() {
        match instruction {
            SettlementInstruction::FlashLoanDraw { token, amount, .. } => {
                info!("   {}. flash-loan draw {} of {}", i + 1, amount, token);
            }
            SettlementInstruction::Swap { token_in, token_out, amount_in, route } => {
                info!(
                    "   {}. swap {} of {} into {} via {}",
                    i + 1, amount_in, token_in, token_out, route.venue()
                );
            }
            SettlementInstruction::SupplyCollateral { token, amount, .. } => {
                info!("   {}. supply {} of {} as collateral", i + 1, amount, token);
            }
            SettlementInstruction::Borrow { token, amount, .. } => {
                info!("   {}. borrow {} of {}", i + 1, amount, token);
            }
            SettlementInstruction::FlashLoanRepay { token, amount, .. } => {
                info!("   {}. flash-loan repay {} of {}", i + 1, amount, token);
            }
        }
    }
}

pub fn print_session_stats(
    start_time: Instant,
    stats: &SessionStats,
    last_trade_at: Option<Instant>,
) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("\n📊 Session Statistics ({} minutes)", runtime);
    info!("   Cycles run: {}", stats.cycles);
    info!("   Profitable opportunities: {}", stats.profitable_opportunities);
    info!("   Plans submitted: {}", stats.submitted);
    if let Some(at) = last_trade_at {
        info!("   Last trade: {}s ago", at.elapsed().as_secs());
    }

    if !stats.failures.is_empty() {
        info!("   Failure summary:");
        for (stage, count) in stats.failures.iter() {
            info!("     {}: {}", stage, count);
        }
    }

    info!("");
}

pub fn print_final_stats(
    start_time: Instant,
    stats: &SessionStats,
    last_trade_at: Option<Instant>,
) {
    info!("\n🛑 Shutting down gracefully...");
    info!("Final statistics:");
    info!("   Total runtime: {:?}", start_time.elapsed());
    info!("   Cycles run: {}", stats.cycles);
    info!("   Profitable opportunities: {}", stats.profitable_opportunities);
    info!("   Plans submitted: {}", stats.submitted);
    if let Some(at) = last_trade_at {
        info!("   Last trade: {:?} ago", at.elapsed());
    }
    info!("   Failures by stage: {:?}", stats.failures);
}
