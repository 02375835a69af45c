//! Bot configuration settings and environment variable handling

use alloy::primitives::U256;
use std::env;
use std::str::FromStr;

use crate::types::SellLegSizing;

// Configuration constants
pub const MIN_TRADE_SIZE_WEI: u128 = 10_000_000_000_000_000; // 0.01 ETH
pub const MAX_TRADE_SIZE_WEI: u128 = 10_000_000_000_000_000_000; // 10 ETH
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const QUOTE_STALENESS_SECONDS: u64 = 30;

// Aave V3 flash loan premium, in basis points
pub const FLASH_LOAN_FEE_BPS: u64 = 9; // 0.09%

// Transaction confirmation
pub const CONFIRMATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_GAS_LIMIT: u128 = 1_200_000;
pub const DEFAULT_MAX_FEE_GWEI: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: Option<String>,
    pub router_api_url: String,
    // Trading configuration
    pub trade_size_wei: U256,
    pub min_profit_threshold: U256,
    pub sell_leg_sizing: SellLegSizing,
    // Loop intervals
    pub poll_interval_secs: u64,
    pub cooldown_secs: u64,
    pub error_backoff_secs: u64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| {
                let infura_key = env::var("INFURA_KEY").unwrap_or_default();
                format!("https://mainnet.infura.io/v3/{}", infura_key)
            }),
            chain_id: env::var("CHAIN_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            private_key: env::var("PRIVATE_KEY").ok(),
            router_api_url: env::var("ROUTER_API_URL")
                .unwrap_or_else(|_| "https://api.protocolink.com".to_string()),
            trade_size_wei: env::var("TRADE_SIZE_WEI")
                .ok()
                .and_then(|s| U256::from_str(&s).ok())
                .unwrap_or(U256::from(100_000_000_000_000_000u128)) // 0.1 ETH
                .clamp(
                    U256::from(MIN_TRADE_SIZE_WEI),
                    U256::from(MAX_TRADE_SIZE_WEI),
                ),
            // Expressed in the output token's smallest unit (USDC, 6 decimals)
            min_profit_threshold: env::var("MIN_PROFIT_THRESHOLD")
                .ok()
                .and_then(|s| U256::from_str(&s).ok())
                .unwrap_or(U256::from(50_000_000u64)), // 50 USDC
            sell_leg_sizing: env::var("SELL_LEG_SIZING")
                .ok()
                .and_then(|s| SellLegSizing::from_str(&s).ok())
                .unwrap_or_default(),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10)
                .max(MIN_POLL_INTERVAL_SECS),
            cooldown_secs: env::var("COOLDOWN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            error_backoff_secs: env::var("ERROR_BACKOFF_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
