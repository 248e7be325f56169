//! Total of each fixed-width window with zero-filled gaps

use crate::error::Result;
use crate::point::{is_sorted_by_timestamp, Sample};
use crate::reducer::traits::{Policy, Reducer};
use crate::reducer::window::{reduce_windows, Aggregator, WindowMode, WindowWidth};
use std::borrow::Cow;

/// Reduces data by summing values over fixed intervals
///
/// Unlike the other windowed reducers the output is a contiguous grid: every
/// empty window between the first and last occupied one is emitted with a
/// value of `0.0`. Unordered input is accepted and sorted first.
///
/// A final window whose total is exactly `0.0` is not emitted, so a trailing
/// window of values that cancel out is indistinguishable from no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum {
    width: WindowWidth,
}

#[derive(Debug, Default)]
struct Total(f64);

impl Aggregator for Total {
    fn fold(&mut self, value: f64) {
        self.0 += value;
    }

    fn finish(&self) -> f64 {
        self.0
    }
}

impl Sum {
    /// Create a sum reducer from a validated window width
    pub fn new(width: WindowWidth) -> Self {
        Self { width }
    }

    /// Create a sum reducer from an interval string such as `"1m"`
    pub fn from_interval(interval: &str) -> Result<Self> {
        WindowWidth::parse(interval).map(Self::new)
    }

    /// Window width
    pub fn width(&self) -> WindowWidth {
        self.width
    }

    /// Sort `samples` in place by timestamp, then reduce them
    ///
    /// The caller's sequence is left reordered.
    pub fn reduce_in_place(&self, samples: &mut [Sample]) -> Result<Vec<Sample>> {
        samples.sort_by_key(|s| s.timestamp);
        self.reduce_sorted(samples)
    }

    fn reduce_sorted(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        let mode = WindowMode {
            fill_empty: Some(0.0),
            ..Default::default()
        };
        let mut reduced = reduce_windows::<Total>(samples, self.width, mode)?;
        if reduced.last().is_some_and(|last| last.value == 0.0) {
            reduced.pop();
        }
        Ok(reduced)
    }
}

impl Reducer for Sum {
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        let sorted = if is_sorted_by_timestamp(samples) {
            Cow::Borrowed(samples)
        } else {
            let mut owned = samples.to_vec();
            owned.sort_by_key(|s| s.timestamp);
            Cow::Owned(owned)
        };
        self.reduce_sorted(&sorted)
    }

    fn policy(&self) -> Policy {
        Policy::Sum
    }
}
