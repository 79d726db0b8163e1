//! JSON wire format
//!
//! `{"id": "...", "type": "gauge"|"counter", "value"?: float, "delta"?: int}`.
//! Gauges carry `value`, counters carry `delta`; the other field is omitted.

use super::metric::{MetricKind, MetricRecord, MetricValue};
use crate::utils::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};

/// A single metric as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Metric name
    pub id: String,
    /// Kind name; kept as a string so an unknown kind surfaces as its own error
    #[serde(rename = "type")]
    pub mtype: String,
    /// Counter delta (or total in responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    /// Gauge value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Metrics {
    /// Wire form of a stored or pending value
    pub fn new(id: impl Into<String>, value: MetricValue) -> Self {
        let (delta, gauge) = match value {
            MetricValue::Gauge(v) => (None, Some(v)),
            MetricValue::Counter(d) => (Some(d), None),
        };
        Self {
            id: id.into(),
            mtype: value.kind().as_str().to_string(),
            delta,
            value: gauge,
        }
    }

    /// Validate into a typed record
    pub fn into_record(self) -> Result<MetricRecord> {
        let kind: MetricKind = self.mtype.parse()?;
        let value = match kind {
            MetricKind::Gauge => {
                let v = self.value.ok_or_else(|| {
                    MetricsError::invalid_value(format!("gauge '{}' has no value", self.id))
                })?;
                MetricValue::gauge(v)?
            }
            MetricKind::Counter => {
                let d = self.delta.ok_or_else(|| {
                    MetricsError::invalid_value(format!("counter '{}' has no delta", self.id))
                })?;
                MetricValue::Counter(d)
            }
        };
        MetricRecord::new(self.id, value)
    }
}

impl From<&MetricRecord> for Metrics {
    fn from(record: &MetricRecord) -> Self {
        Metrics::new(record.id.clone(), record.value)
    }
}

impl From<MetricRecord> for Metrics {
    fn from(record: MetricRecord) -> Self {
        Metrics::new(record.id, record.value)
    }
}

/// Lookup body for `POST /value/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsQuery {
    /// Metric name
    pub id: String,
    /// Kind name
    #[serde(rename = "type")]
    pub mtype: String,
}

impl MetricsQuery {
    /// Parsed kind
    pub fn kind(&self) -> Result<MetricKind> {
        self.mtype.parse()
    }
}
