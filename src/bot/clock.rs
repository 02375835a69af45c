//! Clock abstraction for the loop's waits
//!
//! The loop never calls timers directly; waits go through this trait so
//! tests can drive the state machine with a manual clock instead of real
//! time.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed clock used in production.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
