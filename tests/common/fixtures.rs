//! Test fixtures

use metrics_relay::StoreSnapshot;
use metrics_relay::agent::Sampler;
use metrics_relay::utils::error::BackoffSchedule;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Millisecond backoff so retry paths finish quickly
pub fn fast_schedule() -> BackoffSchedule {
    BackoffSchedule::new(
        vec![Duration::from_millis(10), Duration::from_millis(30)],
        Duration::from_millis(20),
        3,
    )
}

/// One gauge and one counter
pub fn sample_batch() -> StoreSnapshot {
    let mut batch = StoreSnapshot::default();
    batch.gauge.insert("HeapAlloc".to_string(), 2048.5);
    batch.counter.insert("PollCount".to_string(), 3);
    batch
}

/// Sampler reporting a constant gauge and counting its invocations
#[derive(Clone, Default)]
pub struct CountingSampler {
    pub calls: Arc<AtomicUsize>,
}

impl CountingSampler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Sampler for CountingSampler {
    fn sample(&mut self) -> Vec<(String, f64)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        vec![("HeapAlloc".to_string(), 4096.0)]
    }
}
