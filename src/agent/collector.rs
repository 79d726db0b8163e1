//! Collector loop
//!
//! Samples the host into the agent's local store every poll interval and
//! bumps `PollCount`. Never touches the network.

use super::system::Sampler;
use crate::core::models::MetricRecord;
use crate::storage::MemStorage;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Counter incremented once per poll
pub const POLL_COUNT: &str = "PollCount";
/// Gauge holding a fresh random number each poll
pub const RANDOM_VALUE: &str = "RandomValue";

/// Periodic sampler feeding the local store
pub struct Collector {
    store: Arc<MemStorage>,
    sampler: Box<dyn Sampler>,
}

impl Collector {
    pub fn new(store: Arc<MemStorage>, sampler: Box<dyn Sampler>) -> Self {
        Self { store, sampler }
    }

    /// One sampling cycle
    pub fn poll(&mut self) -> Result<()> {
        for (name, value) in self.sampler.sample() {
            match MetricRecord::gauge(name, value) {
                Ok(record) => {
                    self.store.apply(&record)?;
                }
                Err(e) => debug!("Skipping reading: {}", e),
            }
        }

        self.store
            .apply(&MetricRecord::gauge(RANDOM_VALUE, rand::random::<f64>())?)?;
        self.store.apply(&MetricRecord::counter(POLL_COUNT, 1)?)?;
        Ok(())
    }

    /// Poll every `period` until `cancel` fires
    pub async fn run(mut self, period: Duration, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = self.poll() {
                        warn!("Poll cycle failed: {}", e);
                    }
                }
            }
        }
        debug!("Collector stopped");
    }
}
