//! Operating loop and its collaborator seams

pub mod clock;
pub mod runner;

pub use clock::*;
pub use runner::*;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Arc;
use crate::{
    errors::{BotError, BotResult},
    lending,
    types::{LendingRates, Plan, Quote, SubmissionReceipt, Venue, VenueRouting},
    ConcreteProvider,
};

/// Read side of one cycle: venue quotes and lending rates.
#[async_trait]
pub trait MarketView: Send + Sync {
    async fn venue_quote(
        &self,
        venue: Venue,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> BotResult<Quote>;

    async fn lending_rates(&self, token: Address) -> BotResult<LendingRates>;
}

/// Write side: hand a finished plan to the chain and wait for one
/// confirmation receipt.
#[async_trait]
pub trait PlanExecutor: Send + Sync {
    async fn execute(&self, plan: &Plan) -> BotResult<SubmissionReceipt>;
}

/// Production [`MarketView`] over the shared RPC provider.
pub struct OnChainMarket {
    provider: Arc<ConcreteProvider>,
    routing: VenueRouting,
    account: Address,
}

impl OnChainMarket {
    pub fn new(provider: Arc<ConcreteProvider>, routing: VenueRouting, account: Address) -> Self {
        Self {
            provider,
            routing,
            account,
        }
    }
}

#[async_trait]
impl MarketView for OnChainMarket {
    async fn venue_quote(
        &self,
        venue: Venue,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> BotResult<Quote> {
        venue
            .fetch_quote(
                &self.provider,
                &self.routing,
                self.account,
                token_in,
                token_out,
                amount_in,
            )
            .await
    }

    async fn lending_rates(&self, token: Address) -> BotResult<LendingRates> {
        let pool = self.routing.aave_pool.ok_or_else(|| BotError::RateFetch {
            token,
            message: "no lending pool configured".to_string(),
            source: anyhow::anyhow!("missing routing parameter"),
        })?;
        lending::get_reserve_rates(&self.provider, pool, token).await
    }
}
