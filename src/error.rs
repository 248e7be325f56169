//! Error types for series reduction

use crate::reducer::Policy;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Main error type for reducer construction and reduction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// `reduce` was called with zero samples
    #[error("no data to reduce")]
    EmptyInput,

    /// A timestamp went backwards in input that must be sorted
    #[error("data points must be sorted by timestamp: sample {index} at {current} precedes {previous}")]
    DataUnordered {
        /// Position of the offending sample
        index: usize,
        /// Timestamp of the sample before it
        previous: DateTime<Utc>,
        /// Timestamp of the offending sample
        current: DateTime<Utc>,
    },

    /// Window arithmetic left the representable timestamp range
    #[error("window boundary overflows the timestamp range")]
    TimestampOverflow,

    /// Downsample stride is not positive
    #[error("step must be greater than zero, got {0}")]
    InvalidStep(i64),

    /// Window interval failed to parse or is not positive
    #[error("invalid interval '{interval}': {reason}")]
    InvalidInterval {
        /// The interval string as supplied
        interval: String,
        /// What was wrong with it
        reason: String,
    },

    /// Factory was asked for a policy it does not know
    #[error("unknown reducer id: {0}")]
    UnknownPolicy(String),

    /// Raw configuration could not be mapped onto the policy's shape
    #[error("failed to decode {policy} configuration: {reason}")]
    ConfigDecode {
        /// Policy whose configuration was being decoded
        policy: Policy,
        /// Description of the mismatch
        reason: String,
    },

    /// Decoded configuration was rejected by the policy constructor
    #[error("invalid {policy} configuration: {source}")]
    InvalidConfiguration {
        /// Policy being constructed
        policy: Policy,
        /// Underlying validation failure
        #[source]
        source: Box<Error>,
    },
}

/// Result type for reducer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] for callers that only branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::EmptyInput`]
    EmptyInput,
    /// See [`Error::DataUnordered`]
    DataUnordered,
    /// See [`Error::TimestampOverflow`]
    TimestampOverflow,
    /// See [`Error::InvalidStep`]
    InvalidStep,
    /// See [`Error::InvalidInterval`]
    InvalidInterval,
    /// See [`Error::UnknownPolicy`]
    UnknownPolicy,
    /// See [`Error::ConfigDecode`]
    ConfigDecode,
    /// See [`Error::InvalidConfiguration`]
    InvalidConfiguration,
}

impl Error {
    /// Create an invalid interval error
    pub fn invalid_interval(interval: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            interval: interval.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration decode error
    pub fn config_decode(policy: Policy, reason: impl Into<String>) -> Self {
        Self::ConfigDecode {
            policy,
            reason: reason.into(),
        }
    }

    /// Wrap a constructor failure for the given policy
    pub fn invalid_configuration(policy: Policy, source: Error) -> Self {
        Self::InvalidConfiguration {
            policy,
            source: Box::new(source),
        }
    }

    /// Kind of this error, ignoring payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::DataUnordered { .. } => ErrorKind::DataUnordered,
            Self::TimestampOverflow => ErrorKind::TimestampOverflow,
            Self::InvalidStep(_) => ErrorKind::InvalidStep,
            Self::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            Self::UnknownPolicy(_) => ErrorKind::UnknownPolicy,
            Self::ConfigDecode { .. } => ErrorKind::ConfigDecode,
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
        }
    }

    /// The innermost cause, unwrapping `InvalidConfiguration` layers
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::InvalidConfiguration { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
