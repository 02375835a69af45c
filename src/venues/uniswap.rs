//! Uniswap V2 router quoting

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol,
    sol_types::SolCall,
};
use anyhow::{Context, Result};
use crate::{
    errors::{BotError, BotResult},
    network::retry::{RetryConfig, retry_with_backoff},
    types::Venue,
    ConcreteProvider,
};

sol! {
    function getAmountsOut(uint256 amountIn, address[] path)
        external view returns (uint256[] amounts);
}

/// `getAmountsOut(amount, [token_in, token_out])` on the router. The quoted
/// output is the last element of the returned amounts array.
pub async fn get_amounts_out(
    provider: &ConcreteProvider,
    router: Address,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> Result<U256> {
    let call = getAmountsOutCall {
        amountIn: amount_in,
        path: vec![token_in, token_out],
    };
    let tx = TransactionRequest::default()
        .to(router)
        .input(call.abi_encode().into());

    let result = provider.call(&tx).await
        .context("Failed to call getAmountsOut")?;
    let decoded = getAmountsOutCall::abi_decode_returns(&result, true)
        .context("Failed to decode getAmountsOut return")?;

    decoded.amounts.last().copied()
        .ok_or_else(|| anyhow::anyhow!("getAmountsOut returned an empty amounts array"))
}

pub async fn amounts_out_with_retry(
    provider: &ConcreteProvider,
    router: Address,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> BotResult<U256> {
    let operation = || async {
        get_amounts_out(provider, router, token_in, token_out, amount_in).await
    };

    retry_with_backoff(
        operation,
        &RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 200,
            ..Default::default()
        },
        "uniswap getAmountsOut",
    ).await
    .map_err(|e| BotError::QuoteFetch {
        venue: Venue::UniswapV2,
        message: "router quote failed".to_string(),
        source: anyhow::anyhow!("{}", e),
    })
}
