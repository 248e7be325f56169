//! Largest and smallest value of each fixed-width window
//!
//! Both reducers use plain floating-point comparison. A NaN that opens a
//! window stays the window's extreme, while a NaN arriving later never
//! replaces a number.

use crate::error::{Error, Result};
use crate::point::Sample;
use crate::reducer::traits::{Policy, Reducer};
use crate::reducer::window::{reduce_windows, Aggregator, WindowMode, WindowWidth};

#[derive(Debug, Default)]
struct Maximum(Option<f64>);

impl Aggregator for Maximum {
    fn fold(&mut self, value: f64) {
        match self.0 {
            Some(current) if value > current => self.0 = Some(value),
            Some(_) => {}
            None => self.0 = Some(value),
        }
    }

    fn finish(&self) -> f64 {
        self.0.unwrap_or(f64::NAN)
    }
}

#[derive(Debug, Default)]
struct Minimum(Option<f64>);

impl Aggregator for Minimum {
    fn fold(&mut self, value: f64) {
        match self.0 {
            Some(current) if value < current => self.0 = Some(value),
            Some(_) => {}
            None => self.0 = Some(value),
        }
    }

    fn finish(&self) -> f64 {
        self.0.unwrap_or(f64::NAN)
    }
}

/// Reduces data by keeping the maximum value over fixed intervals
///
/// Input must be sorted by timestamp; a regression fails the whole call
/// with [`Error::DataUnordered`](crate::Error::DataUnordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Max {
    width: WindowWidth,
}

impl Max {
    /// Create a max reducer from a validated window width
    pub fn new(width: WindowWidth) -> Self {
        Self { width }
    }

    /// Create a max reducer from an interval string such as `"1m"`
    pub fn from_interval(interval: &str) -> Result<Self> {
        WindowWidth::parse(interval).map(Self::new)
    }

    /// Window width
    pub fn width(&self) -> WindowWidth {
        self.width
    }
}

impl Reducer for Max {
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        let mode = WindowMode {
            require_sorted: true,
            ..Default::default()
        };
        reduce_windows::<Maximum>(samples, self.width, mode).map_err(|err| {
            if let Error::DataUnordered { index, .. } = &err {
                tracing::warn!(index = *index, "max reducer rejected unordered input");
            }
            err
        })
    }

    fn policy(&self) -> Policy {
        Policy::Max
    }
}

/// Reduces data by keeping the minimum value over fixed intervals
///
/// Input is assumed to be sorted by timestamp but is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min {
    width: WindowWidth,
}

impl Min {
    /// Create a min reducer from a validated window width
    pub fn new(width: WindowWidth) -> Self {
        Self { width }
    }

    /// Create a min reducer from an interval string such as `"1m"`
    pub fn from_interval(interval: &str) -> Result<Self> {
        WindowWidth::parse(interval).map(Self::new)
    }

    /// Window width
    pub fn width(&self) -> WindowWidth {
        self.width
    }
}

impl Reducer for Min {
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        reduce_windows::<Minimum>(samples, self.width, WindowMode::default())
    }

    fn policy(&self) -> Policy {
        Policy::Min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn at(secs: i64, value: f64) -> Sample {
        Sample::from_unix(secs, value).unwrap()
    }

    #[test]
    fn test_max_windows() {
        let reducer = Max::from_interval("60s").unwrap();
        let input = [at(0, 10.0), at(30, 20.0), at(60, 15.0), at(90, 25.0)];
        let reduced = reducer.reduce(&input).unwrap();
        assert_eq!(reduced, vec![at(0, 20.0), at(60, 25.0)]);
    }

    #[test]
    fn test_min_windows() {
        let reducer = Min::from_interval("1m").unwrap();
        let input = [at(0, 10.0), at(30, 20.0), at(60, 15.0), at(90, 25.0)];
        let reduced = reducer.reduce(&input).unwrap();
        assert_eq!(reduced, vec![at(0, 10.0), at(60, 15.0)]);
    }

    #[test]
    fn test_extremes_of_negative_values() {
        let input = [at(0, -f64::MAX), at(10, -5.0), at(60, -f64::MAX)];
        let max = Max::from_interval("1m").unwrap().reduce(&input).unwrap();
        assert_eq!(max, vec![at(0, -5.0), at(60, -f64::MAX)]);

        let min = Min::from_interval("1m").unwrap().reduce(&input).unwrap();
        assert_eq!(min, vec![at(0, -f64::MAX), at(60, -f64::MAX)]);
    }

    #[test]
    fn test_max_rejects_unordered_input() {
        let reducer = Max::from_interval("1m").unwrap();
        let err = reducer.reduce(&[at(30, 1.0), at(0, 2.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnordered);
    }

    #[test]
    fn test_max_rejects_regression_after_closed_window() {
        let reducer = Max::from_interval("1m").unwrap();
        let err = reducer
            .reduce(&[at(0, 1.0), at(30, 2.0), at(70, 3.0), at(65, 4.0)])
            .unwrap_err();
        assert_eq!(
            err,
            Error::DataUnordered {
                index: 3,
                previous: at(70, 0.0).timestamp,
                current: at(65, 0.0).timestamp,
            }
        );
    }

    #[test]
    fn test_min_accepts_unordered_input() {
        let reducer = Min::from_interval("1m").unwrap();
        let reduced = reducer.reduce(&[at(30, 1.0), at(0, 2.0)]).unwrap();
        assert_eq!(reduced, vec![at(30, 1.0)]);
    }

    #[test]
    fn test_nan_handling() {
        let later_nan = [at(0, 1.0), at(10, f64::NAN), at(20, 3.0)];
        let max = Max::from_interval("1m").unwrap().reduce(&later_nan).unwrap();
        assert_eq!(max, vec![at(0, 3.0)]);

        let leading_nan = [at(0, f64::NAN), at(10, 1.0)];
        let min = Min::from_interval("1m").unwrap().reduce(&leading_nan).unwrap();
        assert_eq!(min.len(), 1);
        assert!(min[0].value.is_nan());
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        assert_eq!(Max::from_interval("0s").unwrap_err().kind(), ErrorKind::InvalidInterval);
        assert_eq!(Min::from_interval("-1h").unwrap_err().kind(), ErrorKind::InvalidInterval);
    }

    #[test]
    fn test_empty_input() {
        let max = Max::from_interval("1m").unwrap();
        let min = Min::from_interval("1m").unwrap();
        assert_eq!(max.reduce(&[]), Err(Error::EmptyInput));
        assert_eq!(min.reduce(&[]), Err(Error::EmptyInput));
        assert_eq!(max.policy(), Policy::Max);
        assert_eq!(min.policy(), Policy::Min);
    }
}
