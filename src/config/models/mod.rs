//! Configuration data models
//!
//! Both binaries share the default helpers below so the YAML file, the
//! command line and `Default` agree on every value.

pub mod agent;
pub mod server;

// Re-export all configuration types
pub use agent::*;
pub use server::*;

/// Default listen / target address
pub fn default_address() -> String {
    "localhost:8080".to_string()
}

/// Default snapshot interval in seconds
pub fn default_store_interval() -> u64 {
    300
}

/// Default snapshot file
pub fn default_file_storage_path() -> String {
    "/tmp/metrics-db.json".to_string()
}

/// Default poll interval in seconds
pub fn default_poll_interval() -> u64 {
    2
}

/// Default report interval in seconds
pub fn default_report_interval() -> u64 {
    10
}

/// Default number of concurrent senders
pub fn default_rate_limit() -> usize {
    1
}

pub(crate) fn default_true() -> bool {
    true
}

/// `None` for an empty or blank string
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}
