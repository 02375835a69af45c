//! Health monitoring utilities

use std::time::Instant;
use crate::{
    config::QUOTE_STALENESS_SECONDS,
    types::HealthStatus,
};

pub fn run_health_check(
    last_quote_update: &Option<Instant>,
    consecutive_cycle_failures: u32,
    start_time: Instant,
) -> HealthStatus {
    HealthStatus {
        quotes_fresh: last_quote_update
            .map(|t| t.elapsed().as_secs() < QUOTE_STALENESS_SECONDS)
            .unwrap_or(false),
        last_quote_update: *last_quote_update,
        consecutive_cycle_failures,
        uptime_seconds: start_time.elapsed().as_secs(),
    }
}
