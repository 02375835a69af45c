//! Market-side value types: venues, quotes, lending rates

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use std::fmt;

use super::addresses;

/// A liquidity source the bot can quote against. Closed set: adding a venue
/// means adding a variant, not a string tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Venue {
    UniswapV2,
    BalancerV2,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::UniswapV2 => write!(f, "uniswap-v2"),
            Venue::BalancerV2 => write!(f, "balancer-v2"),
        }
    }
}

/// Routing parameters for the configured venues. A `None` where a venue needs
/// a value is a configuration gap; quoting and plan construction both refuse
/// to guess around it.
#[derive(Debug, Clone)]
pub struct VenueRouting {
    pub uniswap_router: Option<Address>,
    pub balancer_vault: Option<Address>,
    pub balancer_pool_id: Option<B256>,
    pub aave_pool: Option<Address>,
}

impl VenueRouting {
    pub fn mainnet() -> Self {
        Self {
            uniswap_router: Some(addresses::UNISWAP_V2_ROUTER),
            balancer_vault: Some(addresses::BALANCER_V2_VAULT),
            balancer_pool_id: Some(addresses::BALANCER_WETH_USDC_POOL_ID),
            aave_pool: Some(addresses::AAVE_V3_POOL),
        }
    }
}

/// A single venue's answer for "how much `token_out` does `amount_in` of
/// `token_in` buy right now". Immutable, lives for one evaluation cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub venue: Venue,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// Current supply/borrow rates for one reserve, in Aave's ray unit (1e27).
/// Fetched fresh each cycle; rates move, so these are never cached.
#[derive(Debug, Clone, Serialize)]
pub struct LendingRates {
    pub token: Address,
    pub supply_rate: U256,
    pub borrow_rate: U256,
}

impl LendingRates {
    /// Leverage is only worth opening while supplying earns more than
    /// borrowing costs.
    pub fn leverage_is_positive(&self) -> bool {
        self.supply_rate > self.borrow_rate
    }
}
