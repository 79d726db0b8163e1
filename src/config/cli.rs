//! Command line and environment overrides
//!
//! Each flag also reads its environment variable; clap gives the flag
//! priority over the variable. Anything left unset keeps the value coming
//! from the YAML file or the built-in default.

use super::models::{AgentConfig, ServerConfig};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Collecting server
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "server", version, about = "Metrics collecting server")]
pub struct ServerArgs {
    /// Listen address
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Seconds between snapshots, 0 for synchronous writes
    #[arg(short = 'i', long, env = "STORE_INTERVAL")]
    pub store_interval: Option<u64>,

    /// Snapshot file
    #[arg(short = 'f', long, env = "FILE_STORAGE_PATH")]
    pub file_storage_path: Option<String>,

    /// Load the snapshot on startup
    #[arg(short = 'r', long, env = "RESTORE", action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    pub restore: Option<bool>,

    /// SQL connection string
    #[arg(short = 'd', long, env = "DATABASE_DSN")]
    pub database_dsn: Option<String>,

    /// Signing key
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// YAML configuration file
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl ServerArgs {
    /// Overlay the values that were given
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(interval) = self.store_interval {
            config.store_interval = interval;
        }
        if let Some(path) = &self.file_storage_path {
            config.file_storage_path = path.clone();
        }
        if let Some(restore) = self.restore {
            config.restore = restore;
        }
        if let Some(dsn) = &self.database_dsn {
            config.database_dsn = dsn.clone();
        }
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
    }
}

/// Sampling agent
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "agent", version, about = "Metrics sampling agent")]
pub struct AgentArgs {
    /// Server address
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Seconds between samples
    #[arg(short = 'p', long, env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Seconds between deliveries
    #[arg(short = 'r', long, env = "REPORT_INTERVAL")]
    pub report_interval: Option<u64>,

    /// Signing key
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Maximum concurrent sends
    #[arg(short = 'l', long, env = "RATE_LIMIT")]
    pub rate_limit: Option<usize>,

    /// Gzip request bodies
    #[arg(long, env = "COMPRESS", action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    pub compress: Option<bool>,

    /// YAML configuration file
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl AgentArgs {
    /// Overlay the values that were given
    pub fn apply(&self, config: &mut AgentConfig) {
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(interval) = self.poll_interval {
            config.poll_interval = interval;
        }
        if let Some(interval) = self.report_interval {
            config.report_interval = interval;
        }
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        if let Some(limit) = self.rate_limit {
            config.rate_limit = limit;
        }
        if let Some(compress) = self.compress {
            config.compress = compress;
        }
    }
}
