//! Cycle outcome persistence

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::info;
use crate::types::CycleOutcome;

#[derive(Serialize)]
struct CycleRecord<'a> {
    id: &'a str,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    outcome: &'a CycleOutcome,
}

pub fn save_cycle_outcome(id: &str, outcome: &CycleOutcome) -> Result<()> {
    let filename = format!("output/cycles/cycles_{}.jsonl",
        Utc::now().format("%Y-%m-%d"));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    let record = CycleRecord {
        id,
        timestamp: Utc::now(),
        outcome,
    };
    writeln!(file, "{}", serde_json::to_string(&record)?)?;

    info!(
        cycle_id = %id,
        submitted = outcome.succeeded(),
        "Saved cycle outcome"
    );

    Ok(())
}
