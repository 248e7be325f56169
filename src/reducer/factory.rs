//! Factory functions for creating reducers from an identifier and raw config

use crate::error::{Error, Result};
use crate::reducer::config::ReducerConfig;
use crate::reducer::traits::{Policy, Reducer};
use serde_json::Value;
use std::fmt;

/// A registered policy: how to decode its configuration and build it
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    /// Identifier accepted by [`build`]
    pub id: &'static str,
    /// Policy built by this entry
    pub policy: Policy,
    decode: fn(&Value) -> Result<ReducerConfig>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RegistryEntry {
    /// Decode a raw payload into this policy's configuration
    pub fn decode(&self, raw: &Value) -> Result<ReducerConfig> {
        (self.decode)(raw)
    }

    /// Decode, validate and construct
    pub fn build(&self, raw: &Value) -> Result<Box<dyn Reducer>> {
        self.decode(raw)?.into_reducer()
    }
}

fn decode_average(raw: &Value) -> Result<ReducerConfig> {
    ReducerConfig::decode(Policy::Average, raw)
}

fn decode_sum(raw: &Value) -> Result<ReducerConfig> {
    ReducerConfig::decode(Policy::Sum, raw)
}

fn decode_max(raw: &Value) -> Result<ReducerConfig> {
    ReducerConfig::decode(Policy::Max, raw)
}

fn decode_min(raw: &Value) -> Result<ReducerConfig> {
    ReducerConfig::decode(Policy::Min, raw)
}

fn decode_downsample(raw: &Value) -> Result<ReducerConfig> {
    ReducerConfig::decode(Policy::Downsample, raw)
}

static REGISTRY: [RegistryEntry; 5] = [
    RegistryEntry {
        id: "average",
        policy: Policy::Average,
        decode: decode_average,
    },
    RegistryEntry {
        id: "sum",
        policy: Policy::Sum,
        decode: decode_sum,
    },
    RegistryEntry {
        id: "max",
        policy: Policy::Max,
        decode: decode_max,
    },
    RegistryEntry {
        id: "min",
        policy: Policy::Min,
        decode: decode_min,
    },
    RegistryEntry {
        id: "downsample",
        policy: Policy::Downsample,
        decode: decode_downsample,
    },
];

/// All registered policies, in registration order
pub fn registered_policies() -> &'static [RegistryEntry] {
    &REGISTRY
}

/// Find the registry entry for `id`
pub fn lookup(id: &str) -> Result<&'static RegistryEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| Error::UnknownPolicy(id.to_string()))
}

/// Create a new reducer from a policy identifier and an untyped configuration
///
/// Fails with [`Error::UnknownPolicy`] for unregistered identifiers,
/// [`Error::ConfigDecode`] when `raw` does not fit the policy's shape and
/// [`Error::InvalidConfiguration`] when the decoded values are rejected.
pub fn build(id: &str, raw: &Value) -> Result<Box<dyn Reducer>> {
    let entry = lookup(id)?;
    let reducer = entry.build(raw)?;
    tracing::debug!(policy = entry.id, reducer = ?reducer, "built reducer");
    Ok(reducer)
}

/// Create a reducer from an already decoded configuration
pub fn build_config(config: ReducerConfig) -> Result<Box<dyn Reducer>> {
    config.into_reducer()
}
