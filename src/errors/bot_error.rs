//! Custom error types for the bot

use alloy::primitives::Address;
use thiserror::Error;

use crate::types::Venue;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("Quote fetch failed on {venue}: {message}")]
    QuoteFetch {
        venue: Venue,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Rate fetch failed for reserve {token}: {message}")]
    RateFetch {
        token: Address,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Plan construction failed: {reason}")]
    PlanConstruction {
        reason: String,
    },

    #[error("Submission failed: {message}")]
    Submission {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Confirmation failed for {tx_hash}: {message}")]
    Confirmation {
        tx_hash: String,
        message: String,
    },
}

pub type BotResult<T> = Result<T, BotError>;
