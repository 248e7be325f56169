//! Configuration shapes for each reduction policy
//!
//! Raw configuration arrives untyped, as a JSON object. Each policy has a
//! small hand-written decoder that maps the object onto its configuration
//! struct. Decoding only checks shape (required fields present, right JSON
//! type); value validation belongs to the policy constructors.
//!
//! | Policy       | Fields                           |
//! |--------------|----------------------------------|
//! | `average`    | `interval`: duration string      |
//! | `sum`        | `interval`: duration string      |
//! | `max`        | `interval`: duration string      |
//! | `min`        | `interval`: duration string      |
//! | `downsample` | `step`: positive integer         |

use crate::error::{Error, Result};
use crate::reducer::average::Average;
use crate::reducer::downsample::Downsample;
use crate::reducer::extrema::{Max, Min};
use crate::reducer::sum::Sum;
use crate::reducer::traits::{Policy, Reducer};
use crate::reducer::window::WindowWidth;
use serde_json::{Map, Value};

/// Configuration of a windowed policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalConfig {
    /// Window width as a duration string, e.g. `"1m"`
    pub interval: String,
}

/// Configuration of the downsample policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownsampleConfig {
    /// Keep every `step`-th sample
    pub step: i64,
}

/// Decoded configuration for any policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReducerConfig {
    /// Configuration for [`Average`]
    Average(IntervalConfig),
    /// Configuration for [`Sum`]
    Sum(IntervalConfig),
    /// Configuration for [`Max`]
    Max(IntervalConfig),
    /// Configuration for [`Min`]
    Min(IntervalConfig),
    /// Configuration for [`Downsample`]
    Downsample(DownsampleConfig),
}

fn as_object(policy: Policy, raw: &Value) -> Result<&Map<String, Value>> {
    raw.as_object().ok_or_else(|| {
        Error::config_decode(policy, format!("expected an object, got {}", json_type(raw)))
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required<'a>(policy: Policy, object: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| Error::config_decode(policy, format!("missing field '{}'", field)))
}

fn ignore_unknown(policy: Policy, object: &Map<String, Value>, known: &[&str]) {
    for key in object.keys().filter(|k| !known.contains(&k.as_str())) {
        tracing::debug!(%policy, key = %key, "ignoring unknown configuration key");
    }
}

impl IntervalConfig {
    /// Decode `{ "interval": "<duration>" }`
    pub fn decode(policy: Policy, raw: &Value) -> Result<Self> {
        let object = as_object(policy, raw)?;
        ignore_unknown(policy, object, &["interval"]);

        match required(policy, object, "interval")? {
            Value::String(interval) => Ok(Self {
                interval: interval.clone(),
            }),
            other => Err(Error::config_decode(
                policy,
                format!("field 'interval' must be a string, got {}", json_type(other)),
            )),
        }
    }

    /// Parse and validate the window width
    pub fn width(&self) -> Result<WindowWidth> {
        WindowWidth::parse(&self.interval)
    }
}

impl DownsampleConfig {
    /// Decode `{ "step": <integer> }`
    ///
    /// Floats with no fractional part (e.g. `2.0`) are accepted as integers.
    pub fn decode(raw: &Value) -> Result<Self> {
        let policy = Policy::Downsample;
        let object = as_object(policy, raw)?;
        ignore_unknown(policy, object, &["step"]);

        let value = required(policy, object, "step")?;
        let step = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        };

        step.map(|step| Self { step }).ok_or_else(|| {
            Error::config_decode(
                policy,
                format!("field 'step' must be an integer, got {}", value),
            )
        })
    }
}

impl ReducerConfig {
    /// Decode a raw payload into the configuration shape of `policy`
    pub fn decode(policy: Policy, raw: &Value) -> Result<Self> {
        Ok(match policy {
            Policy::Average => Self::Average(IntervalConfig::decode(policy, raw)?),
            Policy::Sum => Self::Sum(IntervalConfig::decode(policy, raw)?),
            Policy::Max => Self::Max(IntervalConfig::decode(policy, raw)?),
            Policy::Min => Self::Min(IntervalConfig::decode(policy, raw)?),
            Policy::Downsample => Self::Downsample(DownsampleConfig::decode(raw)?),
        })
    }

    /// Policy this configuration belongs to
    pub fn policy(&self) -> Policy {
        match self {
            Self::Average(_) => Policy::Average,
            Self::Sum(_) => Policy::Sum,
            Self::Max(_) => Policy::Max,
            Self::Min(_) => Policy::Min,
            Self::Downsample(_) => Policy::Downsample,
        }
    }

    /// Validate the configuration and construct its reducer
    ///
    /// Validation failures are wrapped in [`Error::InvalidConfiguration`].
    pub fn into_reducer(self) -> Result<Box<dyn Reducer>> {
        let policy = self.policy();
        let reducer: Result<Box<dyn Reducer>> = match self {
            Self::Average(c) => c.width().map(|w| Box::new(Average::new(w)) as Box<dyn Reducer>),
            Self::Sum(c) => c.width().map(|w| Box::new(Sum::new(w)) as Box<dyn Reducer>),
            Self::Max(c) => c.width().map(|w| Box::new(Max::new(w)) as Box<dyn Reducer>),
            Self::Min(c) => c.width().map(|w| Box::new(Min::new(w)) as Box<dyn Reducer>),
            Self::Downsample(c) => {
                Downsample::new(c.step).map(|d| Box::new(d) as Box<dyn Reducer>)
            }
        };
        reducer.map_err(|source| Error::invalid_configuration(policy, source))
    }
}
