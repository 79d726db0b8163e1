//! Periodic flushing of the active store
//!
//! With a non-zero interval a background task calls [`MetricStore::flush`]
//! on every tick. Shutdown stops the task and performs one final flush
//! through [`MetricStore::close`], so a clean stop never loses accepted
//! writes.

use super::MetricStore;
use crate::utils::error::{MetricsError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owner of the background flush task
#[derive(Debug)]
pub struct PersistenceManager {
    store: Arc<dyn MetricStore>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PersistenceManager {
    /// Start flushing every `interval`; a zero interval starts no task
    pub fn start(store: Arc<dyn MetricStore>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();

        let handle = if interval.is_zero() {
            debug!("Periodic flush disabled for {} backend", store.backend());
            None
        } else {
            info!(
                "Flushing {} backend every {:?}",
                store.backend(),
                interval
            );
            Some(tokio::spawn(Self::flush_loop(
                Arc::clone(&store),
                interval,
                cancel.clone(),
            )))
        };

        Self {
            store,
            cancel,
            handle,
        }
    }

    async fn flush_loop(store: Arc<dyn MetricStore>, period: Duration, cancel: CancellationToken) {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = store.flush().await {
                        warn!("Periodic flush failed: {}", e);
                    }
                }
            }
        }
        debug!("Flush task stopped");
    }

    /// Whether a periodic task is running
    pub fn is_periodic(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the task and flush one last time
    pub async fn shutdown(mut self) -> Result<()> {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| MetricsError::internal(format!("flush task panicked: {}", e)))?;
        }
        self.store.close().await?;
        info!("Final flush of {} backend complete", self.store.backend());
        Ok(())
    }
}
