//! Plan execution engine

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::Provider,
    signers::local::PrivateKeySigner,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use crate::{
    bot::PlanExecutor,
    config::{CONFIRMATION_TIMEOUT_SECS, Config, DEFAULT_GAS_LIMIT, DEFAULT_MAX_FEE_GWEI},
    errors::{BotError, BotResult},
    execution::assembler::TransactionAssembler,
    types::{Plan, SubmissionReceipt},
    ConcreteProvider,
};

pub struct ExecutionEngine {
    provider: Arc<ConcreteProvider>,
    assembler: TransactionAssembler,
    wallet: Option<EthereumWallet>,
    account: Address,
}

impl ExecutionEngine {
    pub fn new(provider: Arc<ConcreteProvider>, config: &Config) -> Result<Self> {
        let (wallet, account) = match &config.private_key {
            Some(pk) => {
                let signer = PrivateKeySigner::from_str(pk)
                    .context("Failed to parse private key")?;
                let account = signer.address();
                (Some(EthereumWallet::from(signer)), account)
            }
            None => {
                warn!("⚠️ No PRIVATE_KEY configured - quoting only, submission disabled");
                (None, Address::ZERO)
            }
        };

        let assembler = TransactionAssembler::new(
            config.router_api_url.clone(),
            config.chain_id,
            account,
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(Self {
            provider,
            assembler,
            wallet,
            account,
        })
    }

    pub fn account(&self) -> Address {
        self.account
    }

    async fn submit_and_confirm(&self, plan: &Plan) -> BotResult<SubmissionReceipt> {
        if self.wallet.is_none() {
            return Err(BotError::Submission {
                message: "No signing key configured".to_string(),
                source: None,
            });
        }

        let tx = self
            .assembler
            .assemble(plan)
            .await?
            .gas_limit(DEFAULT_GAS_LIMIT as u64)
            .max_fee_per_gas(DEFAULT_MAX_FEE_GWEI as u128 * 1_000_000_000)
            .max_priority_fee_per_gas(1_000_000_000); // 1 gwei

        info!("📤 Submitting settlement plan ({} instructions)...", plan.len());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BotError::Submission {
                message: "Failed to broadcast transaction".to_string(),
                source: Some(e.into()),
            })?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        info!("📡 Transaction sent: {}", tx_hash);

        // One confirmation receipt is enough; finality is not our problem.
        tokio::select! {
            result = pending.get_receipt() => {
                match result {
                    Ok(receipt) => {
                        info!("✅ Transaction confirmed: {:?}", receipt.transaction_hash);
                        Ok(SubmissionReceipt {
                            tx_hash: tx_hash.clone(),
                            block_number: receipt.block_number,
                            confirmed_at: Utc::now(),
                        })
                    }
                    Err(e) => Err(BotError::Confirmation {
                        tx_hash: tx_hash.clone(),
                        message: format!("receipt error: {}", e),
                    }),
                }
            }
            _ = tokio::time::sleep(Duration::from_secs(CONFIRMATION_TIMEOUT_SECS)) => {
                Err(BotError::Confirmation {
                    tx_hash: tx_hash.clone(),
                    message: format!("no confirmation after {} seconds", CONFIRMATION_TIMEOUT_SECS),
                })
            }
        }
    }
}

#[async_trait]
impl PlanExecutor for ExecutionEngine {
    async fn execute(&self, plan: &Plan) -> BotResult<SubmissionReceipt> {
        self.submit_and_confirm(plan).await
    }
}
