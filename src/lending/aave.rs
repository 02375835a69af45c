//! Aave V3 reserve rate reads

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol,
    sol_types::SolCall,
};
use anyhow::Context;
use tracing::debug;
use crate::{
    errors::{BotError, BotResult},
    types::LendingRates,
    ConcreteProvider,
};

sol! {
    struct ReserveData {
        uint256 configuration;
        uint128 liquidityIndex;
        uint128 currentLiquidityRate;
        uint128 variableBorrowIndex;
        uint128 currentVariableBorrowRate;
        uint128 currentStableBorrowRate;
        uint40 lastUpdateTimestamp;
        uint16 id;
        address aTokenAddress;
        address stableDebtTokenAddress;
        address variableDebtTokenAddress;
        address interestRateStrategyAddress;
        uint128 accruedToTreasury;
        uint128 unbacked;
        uint128 isolationModeTotalDebt;
    }

    function getReserveData(address asset) external view returns (ReserveData data);
}

/// One `getReserveData` read against the pool. Deliberately no retry here:
/// rates feed an optional leverage decision, and a transient failure should
/// surface to the caller rather than stall the cycle.
pub async fn get_reserve_rates(
    provider: &ConcreteProvider,
    pool: Address,
    token: Address,
) -> BotResult<LendingRates> {
    let call = getReserveDataCall { asset: token };
    let tx = TransactionRequest::default()
        .to(pool)
        .input(call.abi_encode().into());

    let fetch = async {
        let result = provider.call(&tx).await
            .context("Failed to call getReserveData")?;
        getReserveDataCall::abi_decode_returns(&result, true)
            .context("Failed to decode getReserveData return")
    };

    let decoded = fetch.await.map_err(|e| BotError::RateFetch {
        token,
        message: "reserve data read failed".to_string(),
        source: e,
    })?;

    let rates = LendingRates {
        token,
        supply_rate: U256::from(decoded.data.currentLiquidityRate),
        borrow_rate: U256::from(decoded.data.currentVariableBorrowRate),
    };

    debug!(
        "Lending rates for {}: supply={} borrow={}",
        token, rates.supply_rate, rates.borrow_rate
    );

    Ok(rates)
}
