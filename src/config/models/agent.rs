//! Agent configuration

use super::*;
use crate::utils::error::BackoffSchedule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Server address (`host:port`, scheme optional)
    #[serde(default = "default_address")]
    pub address: String,
    /// Seconds between samples
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// Seconds between deliveries
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Shared signing key; empty disables signatures
    #[serde(default)]
    pub key: String,
    /// Maximum concurrent sends, also the queue depth
    #[serde(default = "default_rate_limit")]
    pub rate_limit: usize,
    /// Gzip request bodies
    #[serde(default = "default_true")]
    pub compress: bool,
    /// Waits between delivery attempts, in milliseconds in YAML
    #[serde(default)]
    pub retry: BackoffSchedule,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            poll_interval: default_poll_interval(),
            report_interval: default_report_interval(),
            key: String::new(),
            rate_limit: default_rate_limit(),
            compress: true,
            retry: BackoffSchedule::default(),
        }
    }
}

impl AgentConfig {
    /// Poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Report interval
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    /// Signing key, if configured
    pub fn key(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    /// Batch endpoint URL
    pub fn updates_url(&self) -> String {
        let address = self.address.trim().trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            format!("{}/updates/", address)
        } else {
            format!("http://{}/updates/", address)
        }
    }

    /// Validate agent configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("Address cannot be empty".to_string());
        }
        if self.poll_interval == 0 {
            return Err("Poll interval cannot be 0".to_string());
        }
        if self.report_interval == 0 {
            return Err("Report interval cannot be 0".to_string());
        }
        if self.rate_limit == 0 {
            return Err("Rate limit cannot be 0".to_string());
        }
        Ok(())
    }
}
