//! Reduction of timestamped numeric series
//!
//! This library shrinks a chronologically ordered series of `(timestamp, value)`
//! samples by one of five policies: fixed-window `average`, `sum`, `max` and
//! `min`, or stride-based `downsample`. Reducers are built directly or through
//! a factory that takes a policy identifier and an untyped configuration.
//!
//! # Example
//!
//! ```
//! use series_reducer::{reducer, Reducer, Sample};
//! use serde_json::json;
//!
//! # fn example() -> series_reducer::Result<()> {
//! let reducer = reducer::build("average", &json!({ "interval": "1m" }))?;
//!
//! let samples = [
//!     Sample::from_unix(0, 1.0).unwrap(),
//!     Sample::from_unix(30, 2.0).unwrap(),
//!     Sample::from_unix(60, 3.0).unwrap(),
//! ];
//! let reduced = reducer.reduce(&samples)?;
//! assert_eq!(reduced.len(), 2);
//! assert_eq!(reduced[0].value, 1.5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Building without the factory
//!
//! ```
//! use series_reducer::reducer::{Downsample, Reducer};
//! use series_reducer::Sample;
//!
//! # fn example() -> series_reducer::Result<()> {
//! let reducer = Downsample::new(2)?;
//! let samples: Vec<_> = (0..4).map(|i| Sample::from_unix(i, i as f64).unwrap()).collect();
//! assert_eq!(reducer.reduce(&samples)?.len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use error::{Error, ErrorKind, Result};
pub use point::Sample;
pub use reducer::{build, Policy, Reducer, ReducerConfig};

/// Error types
pub mod error;

/// Sample type
pub mod point;

/// Interval string parsing
pub mod duration;

/// Reduction policies, configuration and factory
pub mod reducer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
///
/// Intended for binaries and tests embedding the library; the library itself
/// never installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
