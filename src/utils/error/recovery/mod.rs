//! Error recovery utilities
//!
//! This module provides the declarative backoff schedule and the generic
//! retry-with-backoff helper used by the agent's delivery pipeline.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::BackoffSchedule;

#[cfg(test)]
mod tests;
