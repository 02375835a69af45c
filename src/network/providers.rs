//! RPC provider setup

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use crate::{
    config::Config,
    network::retry::{RetryConfig, retry_with_backoff},
    ConcreteProvider,
};

/// Build the mainnet provider and probe the connection before the loop
/// starts. A node that cannot answer `eth_blockNumber` is a startup failure,
/// not a cycle failure.
pub async fn setup_mainnet_provider(config: &Config) -> Result<Arc<ConcreteProvider>> {
    let provider: Arc<ConcreteProvider> = Arc::new(
        ProviderBuilder::new()
            .on_http(config.rpc_url.parse()?)
            .boxed()
    );

    info!("🔗 Testing connection to Ethereum mainnet...");
    let block = retry_with_backoff(
        || async {
            provider.get_block_number().await
                .context("Failed to get block number")
        },
        &RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10000,
            exponential_base: 2.0,
        },
        "mainnet connection",
    ).await
    .map_err(|e| {
        warn!("⚠️ Network connection attempt failed: {}", e);
        anyhow::anyhow!("Network connection failed: {}", e)
    })?;

    info!("✅ Connected to mainnet at block {}", block);
    Ok(provider)
}
