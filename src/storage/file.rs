//! File-snapshotting storage backend
//!
//! Metrics live in a [`MemStorage`]; the whole state is written to a single
//! JSON document on flush. Writes go to a sibling temporary file which is then
//! renamed over the target, so a crash never leaves a torn document behind.

use super::{MemStorage, MetricStore, StoreSnapshot};
use crate::core::models::{MetricKind, MetricRecord, MetricValue};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Memory store backed by a JSON snapshot file
#[derive(Debug)]
pub struct FileStorage {
    memory: MemStorage,
    path: PathBuf,
    /// Flush after every successful write instead of periodically
    sync: bool,
    /// Serializes writers of the snapshot file
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open the backend, restoring prior state when `restore` is set
    pub async fn open(path: impl AsRef<Path>, restore: bool, sync: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let snapshot = if restore {
            Self::restore(&path).await?
        } else {
            StoreSnapshot::default()
        };

        Ok(Self {
            memory: MemStorage::from_snapshot(snapshot),
            path,
            sync,
            write_lock: Mutex::new(()),
        })
    }

    async fn restore(path: &Path) -> Result<StoreSnapshot> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No snapshot at {}, starting empty", path.display());
                tokio::fs::File::create(path).await?;
                return Ok(StoreSnapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("Snapshot at {} is empty", path.display());
            return Ok(StoreSnapshot::default());
        }

        match serde_json::from_slice::<StoreSnapshot>(&bytes) {
            Ok(snapshot) => {
                info!(
                    "Restored {} metrics from {}",
                    snapshot.len(),
                    path.display()
                );
                Ok(snapshot)
            }
            Err(e) => {
                warn!(
                    "Snapshot at {} is unreadable, starting empty: {}",
                    path.display(),
                    e
                );
                Ok(StoreSnapshot::default())
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("metrics"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_snapshot(&self) -> Result<()> {
        let guard = self.write_lock.lock().await;
        self.persist(&guard).await
    }

    /// Write the document; the caller holds `write_lock`
    async fn persist(&self, _held: &MutexGuard<'_, ()>) -> Result<()> {
        let snapshot = self.memory.snapshot_now();
        let bytes = serde_json::to_vec(&snapshot)?;

        let temp = self.temp_path();
        let mut file = tokio::fs::File::create(&temp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&temp, &self.path).await?;

        debug!("Flushed {} metrics to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl MetricStore for FileStorage {
    fn backend(&self) -> &'static str {
        "file"
    }

    /// In sync mode a write that cannot be persisted is rolled back, so a
    /// failed request leaves nothing behind for the client's retry to double.
    async fn save(&self, record: MetricRecord) -> Result<MetricValue> {
        if !self.sync {
            return self.memory.apply(&record);
        }

        let guard = self.write_lock.lock().await;
        let (value, previous) = self.memory.apply_tracked(&record)?;
        if let Err(e) = self.persist(&guard).await {
            warn!(
                "Snapshot write failed, reverting {} '{}': {}",
                record.kind(),
                record.id,
                e
            );
            self.memory.revert(record.kind(), &record.id, previous);
            return Err(e);
        }
        Ok(value)
    }

    async fn get(&self, kind: MetricKind, id: &str) -> Result<MetricValue> {
        self.memory.get(kind, id).await
    }

    async fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.memory.snapshot_now())
    }

    async fn flush(&self) -> Result<()> {
        self.write_snapshot().await
    }
}
