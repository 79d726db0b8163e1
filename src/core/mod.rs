//! Core domain types
//!
//! Metric kinds, the tagged metric value with its merge rule, and the JSON
//! wire representation shared by the agent and the server.

pub mod models;

pub use models::{MetricKind, MetricRecord, MetricValue, Metrics, MetricsQuery};
