//! Stride-based decimation

use crate::error::{Error, Result};
use crate::point::Sample;
use crate::reducer::traits::{Policy, Reducer};

/// Reduces data by selecting every n-th sample
///
/// The first and last samples are always kept. Timestamps are ignored;
/// selection is purely positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downsample {
    step: usize,
}

impl Downsample {
    /// Create a downsample reducer keeping every `step`-th sample
    pub fn new(step: i64) -> Result<Self> {
        if step <= 0 {
            return Err(Error::InvalidStep(step));
        }
        let step = usize::try_from(step).map_err(|_| Error::InvalidStep(step))?;
        Ok(Self { step })
    }

    /// Selection stride
    pub fn step(&self) -> usize {
        self.step
    }

    /// Output size for `len` input samples, `None` if it cannot be computed
    fn capacity(&self, len: usize) -> Option<usize> {
        // ceil(len / step), plus the trailing endpoint
        len.checked_add(self.step - 1)
            .map(|n| n / self.step)
            .and_then(|n| n.checked_add(1))
    }
}

impl Reducer for Downsample {
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        let (first, last) = match samples {
            [] => return Err(Error::EmptyInput),
            [first, .., last] => (first, Some(last)),
            [first] => (first, None),
        };

        let mut reduced = match self.capacity(samples.len()) {
            Some(capacity) => Vec::with_capacity(capacity),
            None => Vec::new(),
        };

        reduced.push(*first);
        reduced.extend(samples.iter().step_by(self.step).skip(1).copied());

        let last_index = samples.len() - 1;
        if let Some(last) = last {
            if last_index % self.step != 0 {
                reduced.push(*last);
            }
        }

        tracing::trace!(
            input = samples.len(),
            output = reduced.len(),
            step = self.step,
            "downsampled series"
        );
        Ok(reduced)
    }

    fn policy(&self) -> Policy {
        Policy::Downsample
    }
}
