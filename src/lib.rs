//! Flash-Loan Arbitrage Bot - Ethereum mainnet arbitrage service
//!
//! This bot monitors a Uniswap V2 router and a Balancer V2 vault for a price
//! discrepancy on a token pair. When the spread clears the configured
//! threshold it assembles a single atomic transaction plan (flash-loan draw,
//! cross-venue swaps, optional leverage legs, flash-loan repay) through a
//! route-builder API and submits it on-chain.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod venues;
pub mod lending;
pub mod arbitrage;
pub mod plan;
pub mod execution;
pub mod bot;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{BotError, BotResult};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
