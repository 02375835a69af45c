//! Venue quote providers
//!
//! Each supported venue answers the same question through its own query
//! mechanism: Uniswap V2 via the router's `getAmountsOut`, Balancer V2 via
//! the vault's `queryBatchSwap` simulation.

pub mod uniswap;
pub mod balancer;

use alloy::primitives::{Address, U256};

use crate::{
    errors::{BotError, BotResult},
    types::{Quote, Venue, VenueRouting},
    ConcreteProvider,
};

impl Venue {
    /// Fetch this venue's quote for `amount_in` of `token_in` into
    /// `token_out`. Dispatch is over the closed venue set; a venue without
    /// its routing parameters configured fails here rather than mid-plan.
    pub async fn fetch_quote(
        self,
        provider: &ConcreteProvider,
        routing: &VenueRouting,
        account: Address,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> BotResult<Quote> {
        let amount_out = match self {
            Venue::UniswapV2 => {
                let router = routing.uniswap_router.ok_or_else(|| missing(self, "router"))?;
                uniswap::amounts_out_with_retry(provider, router, token_in, token_out, amount_in)
                    .await?
            }
            Venue::BalancerV2 => {
                let vault = routing.balancer_vault.ok_or_else(|| missing(self, "vault"))?;
                let pool_id = routing
                    .balancer_pool_id
                    .ok_or_else(|| missing(self, "pool id"))?;
                balancer::query_batch_swap_with_retry(
                    provider, vault, pool_id, account, token_in, token_out, amount_in,
                )
                .await?
            }
        };

        Ok(Quote {
            venue: self,
            token_in,
            token_out,
            amount_in,
            amount_out,
        })
    }
}

fn missing(venue: Venue, what: &str) -> BotError {
    BotError::QuoteFetch {
        venue,
        message: format!("no {} configured", what),
        source: anyhow::anyhow!("missing routing parameter"),
    }
}
