//! Arbitrage verdict types

use alloy::primitives::{I256, U256};
use serde::Serialize;
use super::Venue;

/// Outcome of comparing two venue quotes for the same input.
///
/// Direction is fixed: the bot only evaluates buying on venue A (Uniswap) and
/// selling on venue B (Balancer). The symmetric direction is a known
/// limitation, kept deliberately so behavior stays comparable run to run.
///
/// When `profitable` is false the remaining fields are diagnostic only.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityVerdict {
    pub profitable: bool,
    /// Signed spread in the output token's smallest unit; negative when the
    /// sell venue quotes below the buy venue.
    pub profit: I256,
    pub buy_venue: Venue,
    pub sell_venue: Venue,
    /// The buy venue's quoted output, carried so plan construction can size
    /// the sell leg against the full expected output instead of the profit
    /// estimate.
    pub buy_leg_out: U256,
}

impl OpportunityVerdict {
    /// Verdict for a cycle where quoting failed or the spread was absent.
    pub fn none() -> Self {
        Self {
            profitable: false,
            profit: I256::ZERO,
            buy_venue: Venue::UniswapV2,
            sell_venue: Venue::BalancerV2,
            buy_leg_out: U256::ZERO,
        }
    }

    /// Profit as an unsigned magnitude. Zero when the spread is negative.
    pub fn profit_magnitude(&self) -> U256 {
        if self.profit.is_negative() {
            U256::ZERO
        } else {
            self.profit.unsigned_abs()
        }
    }
}
