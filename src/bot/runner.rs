//! The operating loop
//!
//! One logical worker: check the spread, build and submit a plan when it
//! clears the threshold, then wait. The loop is the top-level failure
//! boundary; every stage error is converted into a backoff wait instead of
//! propagating, so a bad cycle can never take the service down. Stop
//! requests are observed at the idle boundary and during waits, never
//! mid-cycle.

use alloy::primitives::{Address, U256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, info};
use crate::{
    arbitrage::evaluate_quotes,
    bot::{Clock, MarketView, PlanExecutor},
    config::Config,
    errors::BotError,
    plan::build_plan,
    storage,
    types::{
        CycleOutcome, CycleStage, SellLegSizing, Venue, VenueRouting,
        USDC_MAINNET, WETH_MAINNET,
    },
    utils::display,
};

/// Named waits between cycles. All three come from configuration; none are
/// literal timer calls inside the machine.
#[derive(Debug, Clone)]
pub struct LoopIntervals {
    /// Idle wait between ordinary cycles, bounding quote request rate.
    pub poll: Duration,
    /// Extra wait after a confirmed trade, so the bot does not re-enter the
    /// market on a stale price.
    pub cooldown: Duration,
    /// Wait after any cycle-level error.
    pub error_backoff: Duration,
}

impl LoopIntervals {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll: Duration::from_secs(config.poll_interval_secs),
            cooldown: Duration::from_secs(config.cooldown_secs),
            error_backoff: Duration::from_secs(config.error_backoff_secs),
        }
    }
}

/// Session counters, printed periodically and on shutdown.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub cycles: u64,
    pub profitable_opportunities: u64,
    pub submitted: u64,
    pub failures: HashMap<String, u32>,
}

pub struct TradeLoop<M, X, C> {
    market: M,
    executor: X,
    clock: C,
    routing: VenueRouting,
    token_in: Address,
    token_out: Address,
    trade_size: U256,
    min_profit_threshold: U256,
    sell_leg_sizing: SellLegSizing,
    intervals: LoopIntervals,
    shutdown: watch::Receiver<bool>,
    /// Set on the submission-confirmed transition; read only for reporting.
    pub last_trade_at: Option<Instant>,
    pub stats: SessionStats,
    started_at: Instant,
    last_quote_update: Option<Instant>,
    consecutive_failures: u32,
}

impl<M, X, C> TradeLoop<M, X, C>
where
    M: MarketView,
    X: PlanExecutor,
    C: Clock,
{
    pub fn new(
        market: M,
        executor: X,
        clock: C,
        config: &Config,
        routing: VenueRouting,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            market,
            executor,
            clock,
            routing,
            token_in: WETH_MAINNET,
            token_out: USDC_MAINNET,
            trade_size: config.trade_size_wei,
            min_profit_threshold: config.min_profit_threshold,
            sell_leg_sizing: config.sell_leg_sizing,
            intervals: LoopIntervals::from_config(config),
            shutdown,
            last_trade_at: None,
            stats: SessionStats::default(),
            started_at: Instant::now(),
            last_quote_update: None,
            consecutive_failures: 0,
        }
    }

    /// Run until the stop flag is raised. Stop takes effect at the next idle
    /// boundary; a cycle in flight always finishes.
    pub async fn run(&mut self) {
        info!(
            "🚀 Starting arbitrage loop (poll={:?}, cooldown={:?}, backoff={:?})",
            self.intervals.poll, self.intervals.cooldown, self.intervals.error_backoff
        );

        loop {
            if *self.shutdown.borrow() {
                info!("📛 Stop requested, exiting at idle boundary");
                break;
            }

            let outcome = self.run_cycle().await;
            self.record(&outcome);

            let wait = self.wait_after(&outcome);
            debug!("Next cycle in {:?}", wait);

            let sleep = self.clock.sleep(wait);
            tokio::select! {
                _ = sleep => {}
                _ = self.shutdown.changed() => {}
            }
        }

        display::print_final_stats(self.started_at, &self.stats, self.last_trade_at);
    }

    /// One full pass: Checking, then when profitable Building, Submitting and
    /// Confirming. Never returns an error; failures become an outcome.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        info!(
            "🔍 Checking arbitrage opportunity for {} -> {}",
            self.token_in, self.token_out
        );

        // Checking: both venue quotes in flight together, evaluated once
        // both have answered.
        let (quote_a, quote_b) = tokio::join!(
            self.market.venue_quote(
                Venue::UniswapV2,
                self.token_in,
                self.token_out,
                self.trade_size,
            ),
            self.market.venue_quote(
                Venue::BalancerV2,
                self.token_in,
                self.token_out,
                self.trade_size,
            ),
        );

        if quote_a.is_ok() && quote_b.is_ok() {
            self.last_quote_update = Some(Instant::now());
        }

        let verdict = evaluate_quotes(quote_a, quote_b, self.min_profit_threshold);
        if !verdict.profitable {
            debug!("No profitable opportunity found");
            return CycleOutcome::NotProfitable;
        }

        self.stats.profitable_opportunities += 1;
        display::print_opportunity(&verdict);

        // Building: rates are fetched fresh; a stale rate could flip the
        // leverage decision the wrong way.
        let rates = match self.market.lending_rates(self.token_out).await {
            Ok(rates) => rates,
            Err(e) => return self.fail(CycleStage::Building, e),
        };

        let plan = match build_plan(
            self.trade_size,
            self.token_in,
            self.token_out,
            &verdict,
            &rates,
            &self.routing,
            self.sell_leg_sizing,
        ) {
            Ok(plan) => plan,
            Err(e) => return self.fail(CycleStage::Building, e),
        };

        display::print_plan(&plan);

        // Submitting + Confirming: once broadcast, the transaction is never
        // rescinded; a stop request waits this out.
        match self.executor.execute(&plan).await {
            Ok(receipt) => {
                self.last_trade_at = Some(Instant::now());
                info!("✅ Transaction executed: {}", receipt.tx_hash);
                CycleOutcome::Submitted {
                    tx_hash: receipt.tx_hash,
                }
            }
            Err(e @ BotError::Confirmation { .. }) => self.fail(CycleStage::Confirming, e),
            Err(e) => self.fail(CycleStage::Submitting, e),
        }
    }

    fn fail(&self, stage: CycleStage, error: BotError) -> CycleOutcome {
        error!(
            "Cycle failed while {} ({} -> {}, size {}): {}",
            stage, self.token_in, self.token_out, self.trade_size, error
        );
        CycleOutcome::Failed {
            stage,
            error: error.to_string(),
        }
    }

    fn wait_after(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            // The cooldown stacks on the ordinary poll wait, matching the
            // reference cadence after a confirmed trade.
            CycleOutcome::Submitted { .. } => self.intervals.cooldown + self.intervals.poll,
            CycleOutcome::Failed { .. } => self.intervals.error_backoff,
            CycleOutcome::NotProfitable => self.intervals.poll,
        }
    }

    fn record(&mut self, outcome: &CycleOutcome) {
        self.stats.cycles += 1;
        match outcome {
            CycleOutcome::NotProfitable => {
                self.consecutive_failures = 0;
            }
            CycleOutcome::Submitted { .. } => {
                self.stats.submitted += 1;
                self.consecutive_failures = 0;
            }
            CycleOutcome::Failed { stage, .. } => {
                *self.stats.failures.entry(stage.to_string()).or_insert(0) += 1;
                self.consecutive_failures += 1;
            }
        }

        if !matches!(outcome, CycleOutcome::NotProfitable) {
            let id = uuid::Uuid::new_v4().to_string();
            if let Err(e) = storage::save_cycle_outcome(&id, outcome) {
                error!("Failed to save cycle outcome: {}", e);
            }
        }

        if self.stats.cycles % 30 == 0 {
            let health = crate::utils::run_health_check(
                &self.last_quote_update,
                self.consecutive_failures,
                self.started_at,
            );
            info!(
                "🏥 Health Check: quotes={}, uptime={}s, consecutive failures={}",
                if health.quotes_fresh { "OK" } else { "STALE" },
                health.uptime_seconds,
                health.consecutive_cycle_failures
            );
        }

        if self.stats.cycles % 50 == 0 {
            display::print_session_stats(self.started_at, &self.stats, self.last_trade_at);
        }
    }
}
