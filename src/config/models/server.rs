//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (`host:port`)
    #[serde(default = "default_address")]
    pub address: String,
    /// Seconds between snapshots; 0 flushes after every write
    #[serde(default = "default_store_interval")]
    pub store_interval: u64,
    /// Snapshot file; empty disables the file backend
    #[serde(default = "default_file_storage_path")]
    pub file_storage_path: String,
    /// Load the snapshot file on startup
    #[serde(default = "default_true")]
    pub restore: bool,
    /// SQL connection string; empty disables the SQL backend
    #[serde(default)]
    pub database_dsn: String,
    /// Shared signing key; empty disables signatures
    #[serde(default)]
    pub key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            store_interval: default_store_interval(),
            file_storage_path: default_file_storage_path(),
            restore: true,
            database_dsn: String::new(),
            key: String::new(),
        }
    }
}

impl ServerConfig {
    /// SQL connection string, if configured
    pub fn database_dsn(&self) -> Option<&str> {
        non_empty(&self.database_dsn)
    }

    /// Snapshot file, if configured
    pub fn file_storage_path(&self) -> Option<&Path> {
        non_empty(&self.file_storage_path).map(Path::new)
    }

    /// Signing key, if configured
    pub fn key(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    /// Snapshot interval
    pub fn store_interval(&self) -> Duration {
        Duration::from_secs(self.store_interval)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("Address cannot be empty".to_string());
        }
        Ok(())
    }
}
