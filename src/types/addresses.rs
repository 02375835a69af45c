//! Mainnet token and protocol addresses

use alloy::primitives::{Address, B256, address, b256};

// Tokens
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC_MAINNET: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const DAI_MAINNET: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

// Protocols
pub const UNISWAP_V2_ROUTER: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
pub const AAVE_V3_POOL: Address = address!("87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2");
pub const BALANCER_V2_VAULT: Address = address!("BA12222222228d8Ba445958a75a0704d566BF2C8");

// Balancer WETH-USDC 50/50 pool
pub const BALANCER_WETH_USDC_POOL_ID: B256 =
    b256!("96646936b91d6b9d7d0c47c496afbf3d6ec7b6f8000200000000000000000019");
