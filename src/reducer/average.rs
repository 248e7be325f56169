//! Mean of each fixed-width window

use crate::error::Result;
use crate::point::Sample;
use crate::reducer::traits::{Policy, Reducer};
use crate::reducer::window::{reduce_windows, Aggregator, WindowMode, WindowWidth};

/// Reduces data by averaging values over fixed intervals
///
/// Input is assumed to be sorted by timestamp but is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Average {
    width: WindowWidth,
}

impl Average {
    /// Create an average reducer from a validated window width
    pub fn new(width: WindowWidth) -> Self {
        Self { width }
    }

    /// Create an average reducer from an interval string such as `"1m"`
    pub fn from_interval(interval: &str) -> Result<Self> {
        WindowWidth::parse(interval).map(Self::new)
    }

    /// Window width
    pub fn width(&self) -> WindowWidth {
        self.width
    }
}

#[derive(Debug, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Aggregator for Mean {
    fn fold(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl Reducer for Average {
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        reduce_windows::<Mean>(samples, self.width, WindowMode::default())
    }

    fn policy(&self) -> Policy {
        Policy::Average
    }
}
