//! In-memory storage backend
//!
//! Both maps sit behind one mutex so a read never observes half of a write.
//! The agent uses the same type for its local buffer, which is why the
//! synchronous helpers below are public.

use super::{MetricStore, StoreSnapshot};
use crate::core::models::{MetricKind, MetricRecord, MetricValue};
use crate::utils::error::{MetricsError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Mutex-guarded gauge and counter maps
#[derive(Debug, Default)]
pub struct MemStorage {
    inner: Mutex<StoreSnapshot>,
}

impl MemStorage {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
        }
    }

    /// Apply one write under the merge law
    pub fn apply(&self, record: &MetricRecord) -> Result<MetricValue> {
        self.apply_tracked(record).map(|(value, _)| value)
    }

    /// Apply one write and also return the value it replaced
    pub(crate) fn apply_tracked(
        &self,
        record: &MetricRecord,
    ) -> Result<(MetricValue, Option<MetricValue>)> {
        let mut inner = self.inner.lock();
        let id = record.id.as_str();

        let taken_by_other = match record.kind() {
            MetricKind::Gauge => inner.counter.contains_key(id),
            MetricKind::Counter => inner.gauge.contains_key(id),
        };
        if taken_by_other {
            return Err(MetricsError::kind_mismatch(format!(
                "'{}' is already stored as {}",
                id,
                record.kind().other()
            )));
        }

        match record.value {
            MetricValue::Gauge(v) => {
                let previous = inner.gauge.insert(record.id.clone(), v);
                Ok((MetricValue::Gauge(v), previous.map(MetricValue::Gauge)))
            }
            MetricValue::Counter(delta) => {
                let previous = inner.counter.get(id).copied().map(MetricValue::Counter);
                let merged = MetricValue::merge_into(previous, MetricValue::Counter(delta))?;
                if let MetricValue::Counter(total) = merged {
                    inner.counter.insert(record.id.clone(), total);
                }
                Ok((merged, previous))
            }
        }
    }

    /// Put back the value a write replaced; `None` removes the metric
    pub(crate) fn revert(&self, kind: MetricKind, id: &str, previous: Option<MetricValue>) {
        let mut inner = self.inner.lock();
        match (kind, previous) {
            (MetricKind::Gauge, Some(MetricValue::Gauge(v))) => {
                inner.gauge.insert(id.to_string(), v);
            }
            (MetricKind::Counter, Some(MetricValue::Counter(v))) => {
                inner.counter.insert(id.to_string(), v);
            }
            (MetricKind::Gauge, _) => {
                inner.gauge.remove(id);
            }
            (MetricKind::Counter, _) => {
                inner.counter.remove(id);
            }
        }
    }

    /// Current value, if present
    pub fn lookup(&self, kind: MetricKind, id: &str) -> Option<MetricValue> {
        let inner = self.inner.lock();
        match kind {
            MetricKind::Gauge => inner.gauge.get(id).copied().map(MetricValue::Gauge),
            MetricKind::Counter => inner.counter.get(id).copied().map(MetricValue::Counter),
        }
    }

    /// Copy of both maps
    pub fn snapshot_now(&self) -> StoreSnapshot {
        self.inner.lock().clone()
    }

    /// Copy the gauges and move the counters out, leaving zeroed counters behind
    ///
    /// Used by the agent to build a batch: counter deltas belong to exactly
    /// one batch at a time.
    pub fn take_for_delivery(&self) -> StoreSnapshot {
        let mut inner = self.inner.lock();
        let counter: BTreeMap<String, i64> = inner
            .counter
            .iter_mut()
            .map(|(id, v)| (id.clone(), std::mem::take(v)))
            .collect();
        StoreSnapshot {
            gauge: inner.gauge.clone(),
            counter,
        }
    }

    /// Add undelivered counter deltas back
    pub fn restore_counters(&self, counters: &BTreeMap<String, i64>) {
        let mut inner = self.inner.lock();
        for (id, delta) in counters {
            let entry = inner.counter.entry(id.clone()).or_insert(0);
            *entry = entry.saturating_add(*delta);
        }
    }
}

#[async_trait]
impl MetricStore for MemStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, record: MetricRecord) -> Result<MetricValue> {
        self.apply(&record)
    }

    async fn get(&self, kind: MetricKind, id: &str) -> Result<MetricValue> {
        self.lookup(kind, id)
            .ok_or_else(|| MetricsError::not_found(format!("{} '{}'", kind, id)))
    }

    async fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.snapshot_now())
    }
}
