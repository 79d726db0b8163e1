//! Core data models
//!
//! This module defines the metric record and its wire format.

pub mod metric;
pub mod wire;

// Re-export commonly used types
pub use metric::{MetricKind, MetricRecord, MetricValue};
pub use wire::{Metrics, MetricsQuery};
