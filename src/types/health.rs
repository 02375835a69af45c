//! Health monitoring types

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub quotes_fresh: bool,
    #[allow(dead_code)]
    pub last_quote_update: Option<Instant>,
    pub consecutive_cycle_failures: u32,
    pub uptime_seconds: u64,
}
