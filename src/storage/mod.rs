//! Storage layer for the metrics server
//!
//! Every backend implements [`MetricStore`]. The backend is chosen once at
//! startup by [`build_store`]: a database DSN selects the SQL backend, a file
//! path selects the file-snapshotting backend, otherwise metrics live in
//! memory only.

/// SQL storage module
pub mod database;
/// File-snapshotting storage module
pub mod file;
/// In-memory storage module
pub mod memory;
/// Background flushing
pub mod persistence;

pub use database::DbStorage;
pub use file::FileStorage;
pub use memory::MemStorage;
pub use persistence::PersistenceManager;

use crate::config::ServerConfig;
use crate::core::models::{MetricKind, MetricRecord, MetricValue};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

/// Point-in-time copy of both metric maps
///
/// Also the on-disk document of the file backend: `{"gauge":{..},"counter":{..}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Gauges by name
    #[serde(default)]
    pub gauge: BTreeMap<String, f64>,
    /// Counters by name
    #[serde(default)]
    pub counter: BTreeMap<String, i64>,
}

impl StoreSnapshot {
    /// Total number of metrics
    pub fn len(&self) -> usize {
        self.gauge.len() + self.counter.len()
    }

    /// Whether both maps are empty
    pub fn is_empty(&self) -> bool {
        self.gauge.is_empty() && self.counter.is_empty()
    }

    /// Records in name order, gauges first
    pub fn records(&self) -> Vec<MetricRecord> {
        let gauges = self.gauge.iter().map(|(id, v)| MetricRecord {
            id: id.clone(),
            value: MetricValue::Gauge(*v),
        });
        let counters = self.counter.iter().map(|(id, v)| MetricRecord {
            id: id.clone(),
            value: MetricValue::Counter(*v),
        });
        gauges.chain(counters).collect()
    }

    /// Simple HTML listing of every metric
    pub fn render_html(&self) -> String {
        let mut out = String::from("<html><body>");
        out.push_str("<h3>Gauge:</h3>");
        for (id, v) in &self.gauge {
            let _ = write!(out, "{}:{}<br>", id, MetricValue::Gauge(*v));
        }
        out.push_str("<h3>Counter:</h3>");
        for (id, v) in &self.counter {
            let _ = write!(out, "{}:{}<br>", id, v);
        }
        out.push_str("</body></html>");
        out
    }
}

/// Storage backend contract shared by the memory, file and SQL stores
#[async_trait]
pub trait MetricStore: Send + Sync + std::fmt::Debug {
    /// Short backend name used in logs
    fn backend(&self) -> &'static str;

    /// Apply one write under the merge law and return the stored value
    async fn save(&self, record: MetricRecord) -> Result<MetricValue>;

    /// Current value of `(kind, id)`, `NotFound` if absent
    async fn get(&self, kind: MetricKind, id: &str) -> Result<MetricValue>;

    /// Copy of every metric
    async fn snapshot(&self) -> Result<StoreSnapshot>;

    /// Liveness of the backing store
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Persist current state, where the backend persists anything
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Final flush and release of resources
    async fn close(&self) -> Result<()> {
        self.flush().await
    }

    /// Parse and apply the path-encoded form of a write
    async fn save_metric(&self, kind: &str, id: &str, raw: &str) -> Result<MetricValue> {
        let record = MetricRecord::parse(kind, id, raw)?;
        self.save(record).await
    }

    /// Formatted value of a metric
    async fn get_metric(&self, kind: &str, id: &str) -> Result<String> {
        let kind: MetricKind = kind.parse()?;
        Ok(self.get(kind, id).await?.to_string())
    }

    /// Rendered listing of every metric
    async fn get_all_metrics(&self) -> Result<String> {
        Ok(self.snapshot().await?.render_html())
    }
}

/// Select and open the backend described by `config`
pub async fn build_store(config: &ServerConfig) -> Result<Arc<dyn MetricStore>> {
    if let Some(dsn) = config.database_dsn() {
        info!("Using SQL storage backend");
        let store = DbStorage::connect(dsn).await?;
        return Ok(Arc::new(store));
    }

    if let Some(path) = config.file_storage_path() {
        info!("Using file storage backend at {}", path.display());
        let store = FileStorage::open(path, config.restore, config.store_interval == 0).await?;
        return Ok(Arc::new(store));
    }

    info!("Using in-memory storage backend");
    Ok(Arc::new(MemStorage::new()))
}
