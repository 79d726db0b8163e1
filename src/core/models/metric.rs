//! Metric kinds, values and the merge rule
//!
//! A gauge write replaces the stored value, a counter write adds its delta to
//! the stored total. Raw strings are parsed into a typed [`MetricValue`] at
//! the boundary so nothing downstream branches on untyped values.

use crate::utils::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Latest write wins
    Gauge,
    /// Writes accumulate
    Counter,
}

impl MetricKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }

    /// The other kind
    pub fn other(&self) -> MetricKind {
        match self {
            MetricKind::Gauge => MetricKind::Counter,
            MetricKind::Counter => MetricKind::Gauge,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            other => Err(MetricsError::unknown_kind(other)),
        }
    }
}

/// Typed metric payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Gauge reading
    Gauge(f64),
    /// Counter delta, or accumulated total once stored
    Counter(i64),
}

impl MetricValue {
    /// Parse a raw decimal string as the numeric type of `kind`
    ///
    /// The string is taken as is; surrounding whitespace is an invalid value.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        match kind {
            MetricKind::Gauge => {
                let value: f64 = raw.parse().map_err(|_| {
                    MetricsError::invalid_value(format!("'{}' is not a gauge value", raw))
                })?;
                Self::gauge(value)
            }
            MetricKind::Counter => raw.parse::<i64>().map(MetricValue::Counter).map_err(|_| {
                MetricsError::invalid_value(format!("'{}' is not a counter delta", raw))
            }),
        }
    }

    /// Gauge value, rejecting NaN and infinities which have no JSON form
    pub fn gauge(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(MetricValue::Gauge(value))
        } else {
            Err(MetricsError::invalid_value(format!(
                "gauge value must be finite, got {}",
                value
            )))
        }
    }

    /// Kind of this value
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }

    /// Apply `update` on top of `self` (the stored value)
    pub fn merge(self, update: MetricValue) -> Result<MetricValue> {
        match (self, update) {
            (MetricValue::Gauge(_), MetricValue::Gauge(new)) => Ok(MetricValue::Gauge(new)),
            (MetricValue::Counter(total), MetricValue::Counter(delta)) => total
                .checked_add(delta)
                .map(MetricValue::Counter)
                .ok_or_else(|| {
                    MetricsError::invalid_value(format!(
                        "counter overflow adding {} to {}",
                        delta, total
                    ))
                }),
            (stored, update) => Err(MetricsError::kind_mismatch(format!(
                "stored as {}, written as {}",
                stored.kind(),
                update.kind()
            ))),
        }
    }

    /// Merge `update` into an optional stored value; an absent counter starts at 0
    pub fn merge_into(stored: Option<MetricValue>, update: MetricValue) -> Result<MetricValue> {
        match stored {
            Some(stored) => stored.merge(update),
            None => Ok(update),
        }
    }
}

impl fmt::Display for MetricValue {
    /// Gauges print with the fewest digits that round-trip and never use an
    /// exponent; counters print exactly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Gauge(v) => write!(f, "{}", v),
            MetricValue::Counter(v) => write!(f, "{}", v),
        }
    }
}

/// A named metric write
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    /// Metric name, unique within its kind
    pub id: String,
    /// Typed payload
    pub value: MetricValue,
}

impl MetricRecord {
    /// Create a record, rejecting an empty id
    pub fn new(id: impl Into<String>, value: MetricValue) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(MetricsError::bad_request("metric id must not be empty"));
        }
        Ok(Self { id, value })
    }

    /// Parse the path-encoded form `(type, name, value)`
    pub fn parse(kind: &str, id: &str, raw: &str) -> Result<Self> {
        let kind: MetricKind = kind.parse()?;
        Self::new(id, MetricValue::parse(kind, raw)?)
    }

    /// Gauge record
    pub fn gauge(id: impl Into<String>, value: f64) -> Result<Self> {
        Self::new(id, MetricValue::gauge(value)?)
    }

    /// Counter record
    pub fn counter(id: impl Into<String>, delta: i64) -> Result<Self> {
        Self::new(id, MetricValue::Counter(delta))
    }

    /// Kind of the record
    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }
}
