//! The elementary `(timestamp, value)` observation

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single point in a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Instant the value was observed
    pub timestamp: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Create a sample from whole seconds since the Unix epoch
    ///
    /// Returns `None` when `secs` is outside chrono's representable range.
    pub fn from_unix(secs: i64, value: f64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(|timestamp| Self { timestamp, value })
    }
}

/// Whether `samples` is sorted ascending by timestamp (ties allowed)
pub fn is_sorted_by_timestamp(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}
