//! Cycle outcome types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Stage of the cycle a failure was raised in, for diagnostics and backoff
/// accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleStage {
    Checking,
    Building,
    Submitting,
    Confirming,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStage::Checking => write!(f, "checking"),
            CycleStage::Building => write!(f, "building"),
            CycleStage::Submitting => write!(f, "submitting"),
            CycleStage::Confirming => write!(f, "confirming"),
        }
    }
}

/// Network acknowledgement for a submitted plan. One confirmation receipt is
/// enough; the bot does not wait for finality.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub confirmed_at: DateTime<Utc>,
}

/// What one pass of the loop produced. Only consulted to pick the next wait
/// interval; not persisted across restarts (the JSONL trail is diagnostics,
/// not state).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum CycleOutcome {
    NotProfitable,
    Submitted { tx_hash: String },
    Failed { stage: CycleStage, error: String },
}

impl CycleOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, CycleOutcome::Submitted { .. })
    }
}
