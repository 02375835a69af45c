//! Balancer V2 vault quoting

use alloy::{
    primitives::{Address, B256, Bytes, U256},
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
    struct BatchSwapStep {
        bytes32 poolId;
        uint256 assetInIndex;
        uint256 assetOutIndex;
        uint256 amount;
        bytes userData;
    }

    struct FundManagement {
        address sender;
        bool fromInternalBalance;
        address recipient;
        bool toInternalBalance;
    }

    function queryBatchSwap(
        uint8 kind,
        BatchSwapStep[] swaps,
        address[] assets,
        FundManagement funds
    ) external returns (int256[] assetDeltas);
}

// SwapKind.GIVEN_IN
const GIVEN_IN: u8 = 0;

/// Simulate a single-step batch swap through the vault. Asset deltas are from
/// the vault's point of view: a negative delta on the output asset index is
/// tokens leaving the vault, i.e. owed to the caller, so its magnitude is the
/// quote. A non-negative delta quotes zero.
pub async fn query_batch_swap(
    provider: &ConcreteProvider,
    vault: Address,
    pool_id: B256,
    account: Address,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> Result<U256> {
    let step = BatchSwapStep {
        poolId: pool_id,
        assetInIndex: U256::ZERO,
        assetOutIndex: U256::from(1),
        amount: amount_in,
        userData: Bytes::new(),
    };
    let funds = FundManagement {
        sender: account,
        fromInternalBalance: false,
        recipient: account,
        toInternalBalance: false,
    };
    let call = queryBatchSwapCall {
        kind: GIVEN_IN,
        swaps: vec![step],
        assets: vec![token_in, token_out],
        funds,
    };
    let tx = TransactionRequest::default()
        .to(vault)
        .input(call.abi_encode().into());

    let result = provider.call(&tx).await
        .context("Failed to call queryBatchSwap")?;
    let decoded = queryBatchSwapCall::abi_decode_returns(&result, true)
        .context("Failed to decode queryBatchSwap return")?;

    let delta = decoded.assetDeltas.get(1).copied()
        .ok_or_else(|| anyhow::anyhow!("queryBatchSwap returned no delta for the output asset"))?;

    Ok(if delta.is_negative() {
        delta.unsigned_abs()
    } else {
        U256::ZERO
    })
}

pub async fn query_batch_swap_with_retry(
    provider: &ConcreteProvider,
    vault: Address,
    pool_id: B256,
    account: Address,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> BotResult<U256> {
    let operation = || async {
        query_batch_swap(provider, vault, pool_id, account, token_in, token_out, amount_in).await
    };

    retry_with_backoff(
        operation,
        &RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 200,
            ..Default::default()
        },
        "balancer queryBatchSwap",
    ).await
    .map_err(|e| BotError::QuoteFetch {
        venue: Venue::BalancerV2,
        message: "vault batch-swap simulation failed".to_string(),
        source: anyhow::anyhow!("{}", e),
    })
}
