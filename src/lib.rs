//! # metrics-relay
//!
//! A push-based metrics pipeline: an agent samples its host, batches the
//! readings and ships them over HTTP to a collecting server, which merges
//! them into a pluggable store.
//!
//! ## Features
//!
//! - **Two metric kinds**: gauges keep the latest value, counters accumulate
//! - **Pluggable storage**: in-memory, JSON file snapshots or SQL (PostgreSQL / SQLite)
//! - **Reliable delivery**: bounded worker pool with fixed backoff retries
//! - **Integrity**: optional HMAC-SHA256 signatures in both directions
//! - **Compression**: gzip request and response bodies
//!
//! ## Running a server in-process
//!
//! ```rust,no_run
//! use metrics_relay::{ServerConfig, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         address: "127.0.0.1:8080".to_string(),
//!         ..Default::default()
//!     };
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod agent;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{AgentConfig, ServerConfig};
pub use core::models::{MetricKind, MetricRecord, MetricValue, Metrics};
pub use storage::{MetricStore, StoreSnapshot};
pub use utils::error::{MetricsError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
