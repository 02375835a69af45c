//! Opportunity evaluation
//!
//! Turns two venue quotes for the same input into a profitability verdict.
//! Direction is fixed (buy on Uniswap, sell on Balancer); see
//! [`OpportunityVerdict`] for why the symmetric case is not considered.

use alloy::primitives::{I256, U256};
use tracing::{debug, warn};
use crate::{
    errors::BotResult,
    types::{OpportunityVerdict, Quote, Venue},
};

/// Compare the two quotes against the profit threshold.
///
/// A failed fetch on either side never escapes this boundary: the cycle gets
/// a not-profitable verdict and the underlying error is logged as a
/// diagnostic, so the loop keeps polling.
pub fn evaluate_quotes(
    quote_a: BotResult<Quote>,
    quote_b: BotResult<Quote>,
    min_profit: U256,
) -> OpportunityVerdict {
    let (buy, sell) = match (quote_a, quote_b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Arbitrage check failed: {}", e);
            return OpportunityVerdict::none();
        }
    };

    debug!(
        "Quotes for {} -> {}: {}={} {}={}",
        buy.token_in, buy.token_out, buy.venue, buy.amount_out, sell.venue, sell.amount_out
    );

    let sell_out = I256::try_from(sell.amount_out).unwrap_or(I256::MAX);
    let buy_out = I256::try_from(buy.amount_out).unwrap_or(I256::MAX);
    let profit = sell_out - buy_out;

    let threshold = I256::try_from(min_profit).unwrap_or(I256::MAX);

    OpportunityVerdict {
        // Strict: a spread exactly at the threshold is not worth the gas.
        profitable: profit > threshold,
        profit,
        buy_venue: Venue::UniswapV2,
        sell_venue: Venue::BalancerV2,
        buy_leg_out: buy.amount_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use crate::errors::BotError;

    fn quote(venue: Venue, amount_out: u64) -> BotResult<Quote> {
        Ok(Quote {
            venue,
            token_in: Address::ZERO,
            token_out: Address::ZERO,
            amount_in: U256::from(100_000_000_000_000_000u128),
            amount_out: U256::from(amount_out),
        })
    }

    fn fetch_error(venue: Venue) -> BotResult<Quote> {
        Err(BotError::QuoteFetch {
            venue,
            message: "router quote failed".to_string(),
            source: anyhow::anyhow!("connection refused"),
        })
    }

    #[test]
    fn spread_above_threshold_is_profitable() {
        // 2000 USDC vs 2100 USDC at 6 decimals, threshold 50 USDC
        let verdict = evaluate_quotes(
            quote(Venue::UniswapV2, 2_000_000_000),
            quote(Venue::BalancerV2, 2_100_000_000),
            U256::from(50_000_000u64),
        );

        assert!(verdict.profitable);
        assert_eq!(verdict.profit, I256::try_from(100_000_000u64).unwrap());
        assert_eq!(verdict.buy_venue, Venue::UniswapV2);
        assert_eq!(verdict.sell_venue, Venue::BalancerV2);
        assert_eq!(verdict.buy_leg_out, U256::from(2_000_000_000u64));
    }

    #[test]
    fn spread_equal_to_threshold_is_not_profitable() {
        let verdict = evaluate_quotes(
            quote(Venue::UniswapV2, 2_000_000_000),
            quote(Venue::BalancerV2, 2_050_000_000),
            U256::from(50_000_000u64),
        );

        assert!(!verdict.profitable);
        assert_eq!(verdict.profit, I256::try_from(50_000_000u64).unwrap());
    }

    #[test]
    fn negative_spread_is_not_profitable() {
        let verdict = evaluate_quotes(
            quote(Venue::UniswapV2, 2_100_000_000),
            quote(Venue::BalancerV2, 2_000_000_000),
            U256::ZERO,
        );

        assert!(!verdict.profitable);
        assert!(verdict.profit.is_negative());
        assert_eq!(verdict.profit_magnitude(), U256::ZERO);
    }

    #[test]
    fn buy_side_fetch_error_yields_not_profitable() {
        let verdict = evaluate_quotes(
            fetch_error(Venue::UniswapV2),
            quote(Venue::BalancerV2, 2_100_000_000),
            U256::from(50_000_000u64),
        );

        assert!(!verdict.profitable);
        assert_eq!(verdict.profit, I256::ZERO);
    }

    #[test]
    fn sell_side_fetch_error_yields_not_profitable() {
        let verdict = evaluate_quotes(
            quote(Venue::UniswapV2, 2_000_000_000),
            fetch_error(Venue::BalancerV2),
            U256::from(50_000_000u64),
        );

        assert!(!verdict.profitable);
    }
}
