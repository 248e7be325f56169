//! Fixed-grid window driver shared by the aggregating reducers
//!
//! Windows are half-open intervals `[start, start + width)` anchored at the
//! first sample's timestamp. Every emitted window starts at
//! `anchor + k * width` for some `k >= 0`; a sample exactly on a boundary
//! belongs to the later window.

use crate::duration::parse_interval;
use crate::error::{Error, Result};
use crate::point::Sample;
use chrono::{DateTime, TimeDelta, Utc};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Running fold over the values of one window
pub(crate) trait Aggregator: Default {
    /// Add a value to the window
    fn fold(&mut self, value: f64);

    /// Value emitted for the window
    fn finish(&self) -> f64;
}

/// Validated, strictly positive window width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowWidth {
    nanos: i64,
}

impl WindowWidth {
    /// Validate a width given as a duration
    pub fn new(width: TimeDelta) -> Result<Self> {
        Self::checked(width, || width.to_string())
    }

    /// Parse and validate a width given as an interval string such as `"1m"`
    pub fn parse(raw: &str) -> Result<Self> {
        Self::checked(parse_interval(raw)?, || raw.to_string())
    }

    fn checked(width: TimeDelta, label: impl Fn() -> String) -> Result<Self> {
        let nanos = width
            .num_nanoseconds()
            .ok_or_else(|| Error::invalid_interval(label(), "interval overflows"))?;
        if nanos <= 0 {
            return Err(Error::invalid_interval(
                label(),
                format!("interval must be positive, got {}ns", nanos),
            ));
        }
        Ok(Self { nanos })
    }

    /// The width as a duration
    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::nanoseconds(self.nanos)
    }

    /// The width in nanoseconds
    pub fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Start of the window `steps` widths after `start`
    fn advance(&self, start: DateTime<Utc>, steps: i128) -> Result<DateTime<Utc>> {
        let nanos = steps
            .checked_mul(i128::from(self.nanos))
            .ok_or(Error::TimestampOverflow)?;
        let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC))
            .map_err(|_| Error::TimestampOverflow)?;
        let subsec = nanos.rem_euclid(NANOS_PER_SEC) as i64;
        TimeDelta::try_seconds(secs)
            .and_then(|offset| offset.checked_add(&TimeDelta::nanoseconds(subsec)))
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or(Error::TimestampOverflow)
    }

    /// Exclusive end of the window opened at `start`, `None` past the timestamp range
    fn end_of(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.advance(start, 1).ok()
    }

    /// Number of whole widths between `start` and `at`
    fn steps_between(&self, start: DateTime<Utc>, at: DateTime<Utc>) -> i128 {
        let offset = at.signed_duration_since(start);
        let nanos = i128::from(offset.num_seconds()) * NANOS_PER_SEC
            + i128::from(offset.subsec_nanos());
        nanos.div_euclid(i128::from(self.nanos))
    }
}

/// Behavioural switches of the window driver
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WindowMode {
    /// Reject input whose timestamps ever decrease
    pub require_sorted: bool,
    /// Emit this value for every empty window between two occupied ones
    pub fill_empty: Option<f64>,
}

/// Fail with [`Error::DataUnordered`] at the first timestamp regression
pub(crate) fn check_sorted(samples: &[Sample]) -> Result<()> {
    for (index, pair) in samples.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(Error::DataUnordered {
                index: index + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }
    }
    Ok(())
}

/// Fold `samples` into one output sample per occupied grid window
pub(crate) fn reduce_windows<A: Aggregator>(
    samples: &[Sample],
    width: WindowWidth,
    mode: WindowMode,
) -> Result<Vec<Sample>> {
    let first = samples.first().ok_or(Error::EmptyInput)?;
    if mode.require_sorted {
        check_sorted(samples)?;
    }

    let mut start = first.timestamp;
    // a window whose end is past the timestamp range takes every remaining sample
    let mut end = width.end_of(start);
    let mut aggregate = A::default();
    let mut reduced = Vec::new();

    for sample in samples {
        if end.map_or(true, |end| sample.timestamp < end) {
            aggregate.fold(sample.value);
            continue;
        }

        reduced.push(Sample::new(start, aggregate.finish()));

        // jump to the grid window holding the sample, which may be several widths on
        let steps = width.steps_between(start, sample.timestamp);
        if let Some(fill) = mode.fill_empty {
            for k in 1..steps {
                reduced.push(Sample::new(width.advance(start, k)?, fill));
            }
        }

        start = width.advance(start, steps)?;
        end = width.end_of(start);
        aggregate = A::default();
        aggregate.fold(sample.value);
    }

    // the last window always holds at least the sample that opened it
    reduced.push(Sample::new(start, aggregate.finish()));

    tracing::trace!(
        input = samples.len(),
        output = reduced.len(),
        width_ns = width.as_nanos(),
        "reduced series into windows"
    );
    Ok(reduced)
}
