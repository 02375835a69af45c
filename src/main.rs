//! Flash-Loan Arbitrage Bot - Main Entry Point
//!
//! Monitors Uniswap V2 against Balancer V2 on Ethereum mainnet and settles
//! profitable spreads through an Aave V3 flash loan.

use flashloan_arb_bot::*;
use alloy::primitives::U256;
use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("⚡ Flash-Loan Arbitrage Bot v0.3.0");
    info!("📋 Configuration:");
    info!("   Chain id: {}", config.chain_id);
    info!("   Trade size: {} ETH", utils::format_units(config.trade_size_wei, 18));
    info!("   Min profit: {} USDC", utils::format_units(config.min_profit_threshold, 6));
    info!("   Sell leg sizing: {:?}", config.sell_leg_sizing);
    info!(
        "   Intervals: poll={}s, cooldown={}s, backoff={}s",
        config.poll_interval_secs, config.cooldown_secs, config.error_backoff_secs
    );
    info!("   Flash loan fee: {} bps", config::FLASH_LOAN_FEE_BPS);

    // Validate configuration
    if config.trade_size_wei < U256::from(config::MIN_TRADE_SIZE_WEI)
        || config.trade_size_wei > U256::from(config::MAX_TRADE_SIZE_WEI)
    {
        return Err(anyhow::anyhow!(
            "Trade size out of bounds: {} wei",
            config.trade_size_wei
        ));
    }

    // Setup network provider and engines
    let provider = network::setup_mainnet_provider(&config).await?;
    let engine = execution::ExecutionEngine::new(provider.clone(), &config)?;
    let account = engine.account();
    info!("🤖 Bot initialized for account {}", account);

    let routing = VenueRouting::mainnet();
    let market = bot::OnChainMarket::new(provider.clone(), routing.clone(), account);

    // Setup shutdown handler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
        let _ = shutdown_tx.send(true);
    });

    let mut trade_loop = bot::TradeLoop::new(
        market,
        engine,
        bot::SystemClock,
        &config,
        routing,
        shutdown_rx,
    );

    trade_loop.run().await;

    Ok(())
}
