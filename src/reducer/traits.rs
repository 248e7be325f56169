//! Core traits for series reduction

use crate::error::{Error, Result};
use crate::point::Sample;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Trait implemented by every reduction policy
///
/// Implementations hold only their validated parameters, so a single
/// instance can be shared across threads and reused for any number of
/// independent sequences.
pub trait Reducer: Debug + Send + Sync {
    /// Reduce a chronologically ordered sequence into its summary sequence
    ///
    /// Fails with [`Error::EmptyInput`] when `samples` is empty.
    fn reduce(&self, samples: &[Sample]) -> Result<Vec<Sample>>;

    /// The policy this reducer implements
    fn policy(&self) -> Policy;
}

/// Identifier of a reduction policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Mean of each window
    Average,
    /// Total of each window, gaps filled with zero
    Sum,
    /// Largest value of each window
    Max,
    /// Smallest value of each window
    Min,
    /// Every n-th sample plus both endpoints
    Downsample,
}

impl Policy {
    /// All policies, in registry order
    pub const ALL: [Policy; 5] = [
        Policy::Average,
        Policy::Sum,
        Policy::Max,
        Policy::Min,
        Policy::Downsample,
    ];

    /// Identifier used in configuration payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Average => "average",
            Policy::Sum => "sum",
            Policy::Max => "max",
            Policy::Min => "min",
            Policy::Downsample => "downsample",
        }
    }

    /// Whether the policy groups samples into fixed-width time windows
    pub fn is_windowed(&self) -> bool {
        !matches!(self, Policy::Downsample)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Policy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownPolicy(s.to_string()))
    }
}
