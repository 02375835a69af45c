//! Route-builder API client
//!
//! Turns a settlement plan into a signable transaction request by handing the
//! instruction list to the route-builder service. The assembler owns the last
//! line of plan validation: a sequence that does not open with the flash-loan
//! draw and close with the repay is refused before it ever reaches the wire.

use alloy::{
    primitives::{Address, Bytes, U256},
    rpc::types::eth::TransactionRequest,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use crate::{
    errors::{BotError, BotResult},
    types::{Plan, SettlementInstruction},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildRequest<'a> {
    chain_id: u64,
    account: Address,
    logics: &'a [SettlementInstruction],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildResponse {
    to: Address,
    data: Bytes,
    #[serde(default)]
    value: Option<U256>,
}

pub struct TransactionAssembler {
    client: reqwest::Client,
    api_url: String,
    chain_id: u64,
    account: Address,
}

impl TransactionAssembler {
    pub fn new(api_url: String, chain_id: u64, account: Address) -> BotResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BotError::Submission {
                message: "Failed to build HTTP client".to_string(),
                source: Some(e.into()),
            })?;

        Ok(Self {
            client,
            api_url,
            chain_id,
            account,
        })
    }

    /// Assemble the plan into one signable transaction request.
    pub async fn assemble(&self, plan: &Plan) -> BotResult<TransactionRequest> {
        if plan.is_empty() {
            return Err(BotError::Submission {
                message: "Refusing to assemble an empty plan".to_string(),
                source: None,
            });
        }
        if !plan.is_well_ordered() {
            return Err(BotError::Submission {
                message: "Refusing to assemble an out-of-order plan (draw must be first, repay last)"
                    .to_string(),
                source: None,
            });
        }

        let request = BuildRequest {
            chain_id: self.chain_id,
            account: self.account,
            logics: plan.instructions(),
        };

        let response = self
            .client
            .post(format!("{}/v1/transactions/build", self.api_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Submission {
                message: "Route-builder request failed".to_string(),
                source: Some(e.into()),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ Route-builder returned error status {}: {}", status, body);
            return Err(BotError::Submission {
                message: format!("Route-builder error: {} - {}", status, body),
                source: None,
            });
        }

        let build: BuildResponse = response.json().await.map_err(|e| BotError::Submission {
            message: "Failed to parse route-builder response".to_string(),
            source: Some(e.into()),
        })?;

        info!(
            "🧩 Assembled {} instructions into transaction to {}",
            plan.len(),
            build.to
        );

        Ok(TransactionRequest::default()
            .from(self.account)
            .to(build.to)
            .input(build.data.into())
            .value(build.value.unwrap_or(U256::ZERO)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use crate::types::{AAVE_V3_POOL, WETH_MAINNET};

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

    fn draw(amount: u64) -> SettlementInstruction {
        SettlementInstruction::FlashLoanDraw {
            pool: AAVE_V3_POOL,
            token: WETH_MAINNET,
            amount: U256::from(amount),
        }
    }

    fn repay(amount: u64) -> SettlementInstruction {
        SettlementInstruction::FlashLoanRepay {
            pool: AAVE_V3_POOL,
            token: WETH_MAINNET,
            amount: U256::from(amount),
        }
    }

    #[tokio::test]
    async fn assembles_plan_into_transaction_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/transactions/build")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"to":"0x00000000000000000000000000000000000000bb","data":"0xdeadbeef","value":"0x0"}"#,
            )
            .create_async()
            .await;

        let assembler = TransactionAssembler::new(server.url(), 1, ACCOUNT).unwrap();
        let plan = Plan::new(vec![draw(1000), repay(1001)]);

        let tx = assembler.assemble(&plan).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            tx.to,
            Some(address!("00000000000000000000000000000000000000bb").into())
        );
        assert_eq!(tx.from, Some(ACCOUNT));
        assert_eq!(
            tx.input.input.as_ref().map(|b| b.to_vec()),
            Some(vec![0xde, 0xad, 0xbe, 0xef])
        );
    }

    #[tokio::test]
    async fn rejects_out_of_order_plan_without_calling_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/transactions/build")
            .expect(0)
            .create_async()
            .await;

        let assembler = TransactionAssembler::new(server.url(), 1, ACCOUNT).unwrap();
        // Repay before draw: invalid replay order
        let plan = Plan::new(vec![repay(1001), draw(1000)]);

        let result = assembler.assemble(&plan).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(BotError::Submission { .. })));
    }

    #[tokio::test]
    async fn rejects_empty_plan() {
        let assembler =
            TransactionAssembler::new("http://127.0.0.1:0".to_string(), 1, ACCOUNT).unwrap();
        let result = assembler.assemble(&Plan::new(vec![])).await;
        assert!(matches!(result, Err(BotError::Submission { .. })));
    }

    #[tokio::test]
    async fn surfaces_api_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/transactions/build")
            .with_status(500)
            .with_body("route simulation reverted")
            .create_async()
            .await;

        let assembler = TransactionAssembler::new(server.url(), 1, ACCOUNT).unwrap();
        let plan = Plan::new(vec![draw(1000), repay(1001)]);

        let result = assembler.assemble(&plan).await;
        match result {
            Err(BotError::Submission { message, .. }) => {
                assert!(message.contains("500"));
            }
            other => panic!("expected submission error, got {:?}", other.map(|_| ())),
        }
    }
}
