//! Reduction policies and the factory that builds them

pub mod average;
pub mod config;
pub mod downsample;
pub mod extrema;
pub mod factory;
pub mod sum;
pub mod traits;
pub mod window;

pub use average::Average;
pub use config::{DownsampleConfig, IntervalConfig, ReducerConfig};
pub use downsample::Downsample;
pub use extrema::{Max, Min};
pub use factory::{build, build_config, lookup, registered_policies, RegistryEntry};
pub use sum::Sum;
pub use traits::{Policy, Reducer};
pub use window::WindowWidth;
