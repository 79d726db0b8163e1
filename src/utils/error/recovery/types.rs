//! Types and configurations for error recovery patterns

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordered list of waits between retry attempts with a bounded retry count.
///
/// Retry `n` (zero based) waits `delays[n]`; retries past the end of the list
/// wait `fallback`. After `max_retries` retries the failure is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffSchedule {
    /// Waits for the first retries, in order
    #[serde(with = "duration_millis_vec")]
    pub delays: Vec<Duration>,
    /// Wait used once `delays` is exhausted
    #[serde(with = "duration_millis")]
    pub fallback: Duration,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(3),
                Duration::from_secs(5),
            ],
            fallback: Duration::from_secs(3),
            max_retries: 3,
        }
    }
}

impl BackoffSchedule {
    /// Create a schedule from explicit waits
    pub fn new(delays: Vec<Duration>, fallback: Duration, max_retries: u32) -> Self {
        Self {
            delays,
            fallback,
            max_retries,
        }
    }

    /// A schedule that never retries
    pub fn none() -> Self {
        Self::new(Vec::new(), Duration::ZERO, 0)
    }

    /// Wait before retry number `retry` (zero based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.delays
            .get(retry as usize)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Total number of attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

mod duration_millis_vec {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(values: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|d| d.as_millis() as u64))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Duration>, D::Error> {
        let millis = Vec::<u64>::deserialize(deserializer)?;
        Ok(millis.into_iter().map(Duration::from_millis).collect())
    }
}
