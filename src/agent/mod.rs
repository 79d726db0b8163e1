//! Sampling and delivery agent
//!
//! Two independent loops share a local [`MemStorage`]: the collector samples
//! into it every poll interval, and the report loop takes a snapshot every
//! report interval and hands it to the bounded [`WorkerPool`]. Counter deltas
//! are moved out of the local store when a batch is built and put back if
//! the batch is abandoned, so a delta is never in two batches at once.

pub mod collector;
pub mod delivery;
pub mod pool;
pub mod system;


pub use collector::Collector;
pub use delivery::{DeliveryClient, EncodedBatch};
pub use pool::WorkerPool;
pub use system::{Sampler, SystemSampler};

use crate::config::AgentConfig;
use crate::storage::MemStorage;
use crate::utils::error::{BackoffSchedule, Result, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Agent runtime
pub struct Agent {
    config: AgentConfig,
    store: Arc<MemStorage>,
    client: Arc<DeliveryClient>,
    sampler: Box<dyn Sampler>,
    shutdown: CancellationToken,
}

impl Agent {
    /// Agent sampling the host and retrying with the configured schedule
    pub fn new(config: AgentConfig) -> Result<Self> {
        let schedule = config.retry.clone();
        Self::with_parts(config, Box::new(SystemSampler::new()), schedule)
    }

    /// Agent with an explicit sampler and backoff schedule
    pub fn with_parts(
        config: AgentConfig,
        sampler: Box<dyn Sampler>,
        schedule: BackoffSchedule,
    ) -> Result<Self> {
        let shutdown = CancellationToken::new();
        let retry = RetryPolicy::new(schedule).with_cancellation(shutdown.clone());
        let client = Arc::new(DeliveryClient::new(&config, retry)?);

        Ok(Self {
            config,
            store: Arc::new(MemStorage::new()),
            client,
            sampler,
            shutdown,
        })
    }

    /// Token that stops the agent when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Local store shared by both loops
    pub fn store(&self) -> Arc<MemStorage> {
        Arc::clone(&self.store)
    }

    /// Run both loops until the shutdown token fires, then drain the pool
    pub async fn run(self) -> Result<()> {
        info!(
            "Agent reporting to {} (poll {:?}, report {:?}, {} workers)",
            self.client.url(),
            self.config.poll_interval(),
            self.config.report_interval(),
            self.config.rate_limit
        );

        let collector = Collector::new(Arc::clone(&self.store), self.sampler);
        let collector = tokio::spawn(collector.run(self.config.poll_interval(), self.shutdown.clone()));

        let pool = WorkerPool::new(
            self.config.rate_limit,
            Arc::clone(&self.client),
            Arc::clone(&self.store),
        );

        Self::report_loop(
            &self.store,
            &pool,
            self.config.report_interval(),
            &self.shutdown,
        )
        .await;

        if let Err(e) = collector.await {
            warn!("Collector task failed: {}", e);
        }
        pool.shutdown().await;
        info!("Agent stopped");
        Ok(())
    }

    async fn report_loop(
        store: &MemStorage,
        pool: &WorkerPool,
        period: Duration,
        shutdown: &CancellationToken,
    ) {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => Self::report_once(store, pool),
            }
        }
    }

    /// Hand one batch to the pool; a batch the pool refuses gives its counters back
    fn report_once(store: &MemStorage, pool: &WorkerPool) {
        let batch = store.take_for_delivery();
        if batch.is_empty() {
            return;
        }
        debug!("Queueing batch of {} metrics", batch.len());
        if let Err(batch) = pool.submit(batch) {
            warn!("All delivery workers busy, skipping this report cycle");
            store.restore_counters(&batch.counter);
        }
    }
}

/// Run an agent until SIGINT or SIGTERM
pub async fn run_agent(config: AgentConfig) -> Result<()> {
    let agent = Agent::new(config)?;
    let shutdown = agent.shutdown_token();

    tokio::spawn(async move {
        crate::utils::shutdown_signal().await;
        info!("Shutdown signal received, stopping agent");
        shutdown.cancel();
    });

    agent.run().await
}
