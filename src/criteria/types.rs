//! Parameter model for stopping criteria
//!
//! Criteria declare their tunables as named, typed entries; a benchmark run
//! hands concrete values back through [`CriterionParams`].

use crate::errors::{CriterionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value type tag for a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// 64-bit signed integer
    Int64,

    /// 64-bit floating point
    Float64,

    /// UTF-8 string
    String,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int64 => write!(f, "int64"),
            ParamType::Float64 => write!(f, "float64"),
            ParamType::String => write!(f, "string"),
        }
    }
}

/// A concrete parameter value supplied for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int64(i64),
    Float64(f64),
    String(String),
}

impl ParamValue {
    /// Type tag of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int64(_) => ParamType::Int64,
            ParamValue::Float64(_) => ParamType::Float64,
            ParamValue::String(_) => ParamType::String,
        }
    }

    /// Integer value, if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Float value, if this is a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// String value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Float value, or a typed error naming the criterion and parameter
    pub fn require_f64(&self, criterion: &str, param: &str) -> Result<f64> {
        self.as_f64().ok_or_else(|| CriterionError::ParamTypeMismatch {
            criterion: criterion.to_string(),
            param: param.to_string(),
            expected: ParamType::Float64,
            actual: self.param_type(),
        })
    }

    /// Integer value, or a typed error naming the criterion and parameter
    pub fn require_i64(&self, criterion: &str, param: &str) -> Result<i64> {
        self.as_i64().ok_or_else(|| CriterionError::ParamTypeMismatch {
            criterion: criterion.to_string(),
            param: param.to_string(),
            expected: ParamType::Int64,
            actual: self.param_type(),
        })
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int64(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float64(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

/// One declared tunable: configuration name plus expected value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Name the parameter is accepted under
    pub name: String,

    /// Expected value type
    pub ty: ParamType,
}

impl ParamSpec {
    /// Create a parameter declaration
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered sequence of parameter declarations
pub type ParamsDescription = Vec<ParamSpec>;

/// Named parameter values handed to a criterion when a run starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionParams {
    values: BTreeMap<String, ParamValue>,
}

impl CriterionParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value, replacing any previous value for the name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a value by parameter name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Whether a value was supplied for the name
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over `(name, value)` entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    /// Names of all supplied parameters
    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Number of supplied parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
