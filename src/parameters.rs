//! Parameter values, search dimensions and the nested maps built from them

use crate::error::{Result, SearchError};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Concrete value of a single component parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl ParameterValue {
    /// Get as float (integers are widened)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Float(v) => Some(*v),
            ParameterValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as int
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParameterValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParameterValue::Null)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Null => f.write_str("null"),
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::Int(v) => write!(f, "{}", v),
            ParameterValue::Float(v) => write!(f, "{}", v),
            ParameterValue::Str(v) => write!(f, "'{}'", v),
            ParameterValue::List(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Bool(v)
    }
}

impl From<i64> for ParameterValue {
    fn from(v: i64) -> Self {
        ParameterValue::Int(v)
    }
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        ParameterValue::Float(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Str(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::Str(v)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(v: Vec<String>) -> Self {
        ParameterValue::List(v)
    }
}

/// A tunable range for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Dimension {
    /// Continuous interval `[low, high]`
    Real { low: f64, high: f64 },
    /// Integer interval `[low, high]`
    Integer { low: i64, high: i64 },
    /// Finite ordered set of choices
    Categorical { choices: Vec<ParameterValue> },
}

impl Dimension {
    pub fn real(low: f64, high: f64) -> Self {
        Dimension::Real { low, high }
    }

    pub fn integer(low: i64, high: i64) -> Self {
        Dimension::Integer { low, high }
    }

    pub fn categorical<V: Into<ParameterValue>>(choices: impl IntoIterator<Item = V>) -> Self {
        Dimension::Categorical {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject declarations the optimizer cannot search over
    pub fn validate(&self) -> Result<()> {
        match self {
            Dimension::Real { low, high } => {
                if !low.is_finite() || !high.is_finite() {
                    return Err(SearchError::Configuration(format!(
                        "real dimension bounds must be finite, got [{}, {}]",
                        low, high
                    )));
                }
                if low >= high {
                    return Err(SearchError::Configuration(format!(
                        "the lower bound {} has to be less than the upper bound {}",
                        low, high
                    )));
                }
            }
            Dimension::Integer { low, high } => {
                if low > high {
                    return Err(SearchError::Configuration(format!(
                        "the lower bound {} has to be less than or equal to the upper bound {}",
                        low, high
                    )));
                }
            }
            Dimension::Categorical { choices } => {
                if choices.is_empty() {
                    return Err(SearchError::Configuration(
                        "categorical dimension needs at least one choice".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Whether `value` lies within this dimension
    pub fn contains(&self, value: &ParameterValue) -> bool {
        match self {
            Dimension::Real { low, high } => value
                .as_f64()
                .map_or(false, |v| v.is_finite() && *low <= v && v <= *high),
            Dimension::Integer { low, high } => {
                value.as_i64().map_or(false, |v| *low <= v && v <= *high)
            }
            Dimension::Categorical { choices } => choices.contains(value),
        }
    }

    /// Sample a value uniformly
    pub fn sample(&self, rng: &mut impl Rng) -> ParameterValue {
        match self {
            Dimension::Real { low, high } => {
                let u: f64 = rng.gen();
                ParameterValue::Float((low * (1.0 - u) + high * u).clamp(*low, *high))
            }
            Dimension::Integer { low, high } => ParameterValue::Int(rng.gen_range(*low..=*high)),
            Dimension::Categorical { choices } => {
                let idx = rng.gen_range(0..choices.len());
                choices[idx].clone()
            }
        }
    }

    /// Number of distinct points, `None` for continuous dimensions
    pub fn cardinality(&self) -> Option<u64> {
        match self {
            Dimension::Real { .. } => None,
            Dimension::Integer { low, high } => Some(high.abs_diff(*low).saturating_add(1)),
            Dimension::Categorical { choices } => Some(choices.len() as u64),
        }
    }
}

/// Either a fixed value or a tunable range, as supplied by users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterSetting {
    Range(Dimension),
    Value(ParameterValue),
}

impl From<Dimension> for ParameterSetting {
    fn from(d: Dimension) -> Self {
        ParameterSetting::Range(d)
    }
}

impl From<ParameterValue> for ParameterSetting {
    fn from(v: ParameterValue) -> Self {
        ParameterSetting::Value(v)
    }
}

/// Parameters of one component
pub type ComponentParameters = BTreeMap<String, ParameterValue>;

/// Nested `component -> parameter -> value` mapping
pub type ParameterMap = BTreeMap<String, ComponentParameters>;

/// Ranges of one component
pub type ComponentRanges = BTreeMap<String, Dimension>;

/// Nested `component -> parameter -> dimension` mapping
pub type HyperparameterRanges = BTreeMap<String, ComponentRanges>;

/// Nested user settings, not yet checked for ranges vs values
pub type ParameterSettings = BTreeMap<String, BTreeMap<String, ParameterSetting>>;

/// Parse nested settings from JSON, requiring mappings at both levels
pub fn parse_parameter_settings(value: &serde_json::Value, what: &str) -> Result<ParameterSettings> {
    let components = value.as_object().ok_or_else(|| {
        SearchError::Configuration(format!(
            "If {} provided, must be a mapping. Received {}",
            what,
            json_kind(value)
        ))
    })?;

    let mut settings = ParameterSettings::new();
    for (component, params) in components {
        let params = params.as_object().ok_or_else(|| {
            SearchError::Configuration(format!(
                "{} has invalid entry for {}: expected a mapping, received {}",
                what,
                component,
                json_kind(params)
            ))
        })?;
        let mut entry = BTreeMap::new();
        for (name, raw) in params {
            let setting: ParameterSetting = serde_json::from_value(raw.clone()).map_err(|e| {
                SearchError::Configuration(format!(
                    "{} has invalid value for {} parameter {}: {}",
                    what, component, name, e
                ))
            })?;
            entry.insert(name.clone(), setting);
        }
        settings.insert(component.clone(), entry);
    }
    Ok(settings)
}

/// Custom hyperparameters may only hold ranges
pub fn ranges_from_settings(settings: &ParameterSettings) -> Result<HyperparameterRanges> {
    let mut ranges = HyperparameterRanges::new();
    for (component, params) in settings {
        let mut component_ranges = ComponentRanges::new();
        for (name, setting) in params {
            match setting {
                ParameterSetting::Range(dimension) => {
                    dimension.validate()?;
                    component_ranges.insert(name.clone(), dimension.clone());
                }
                ParameterSetting::Value(value) => {
                    return Err(SearchError::Configuration(format!(
                        "Custom hyperparameters should only contain ranges such as Categorical, Integer and Real; \
                         {} parameter {} is the value {}",
                        component, name, value
                    )));
                }
            }
        }
        ranges.insert(component.clone(), component_ranges);
    }
    Ok(ranges)
}

/// Pipeline parameters may only hold concrete values
pub fn values_from_settings(settings: &ParameterSettings) -> Result<ParameterMap> {
    let mut values = ParameterMap::new();
    for (component, params) in settings {
        let mut component_values = ComponentParameters::new();
        for (name, setting) in params {
            match setting {
                ParameterSetting::Value(value) => {
                    component_values.insert(name.clone(), value.clone());
                }
                ParameterSetting::Range(_) => {
                    return Err(SearchError::Configuration(format!(
                        "Pipeline parameters should not contain ranges ({} parameter {}); \
                         pass them to custom hyperparameters instead",
                        component, name
                    )));
                }
            }
        }
        values.insert(component.clone(), component_values);
    }
    Ok(values)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
