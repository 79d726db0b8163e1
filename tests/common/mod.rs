//! Common test utilities for metrics-relay

pub mod fixtures;
pub mod server;

// Re-export commonly used items
pub use fixtures::{CountingSampler, fast_schedule, sample_batch};
pub use server::TestServer;
