//! Service property bag
//!
//! Hub services carry a free-form `props` object. Values are kept as a small
//! tagged variant and read through typed accessors, so a value of the wrong
//! shape reads as "absent" instead of failing the report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known property keys
pub mod keys {
    /// Units the service can report in, most preferred first
    pub const SUP_UNITS: &str = "sup_units";
    /// Operating modes (thermostat, humidity control)
    pub const SUP_MODES: &str = "sup_modes";
    /// Setpoint types the service accepts
    pub const SUP_SETPOINTS: &str = "sup_setpoints";
    /// Fan modes of a combined thermostat and fan
    pub const SUP_FANMODES: &str = "sup_fanmodes";
    /// Lower bound of the settable range
    pub const MIN: &str = "min";
    /// Upper bound of the settable range
    pub const MAX: &str = "max";
    /// Step of the settable range
    pub const STEP: &str = "step";
    /// Hardware flavour hint, e.g. "dehumidifier"
    pub const DEVICE_TYPE: &str = "device_type";
}

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
    TextList(Vec<String>),
    /// Anything else (booleans, objects, mixed arrays). Kept verbatim.
    Other(serde_json::Value),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) if n.is_finite() => Some(*n),
            PropValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            PropValue::TextList(list) => Some(list.as_slice()),
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for PropValue {
    fn from(list: Vec<&str>) -> Self {
        PropValue::TextList(list.into_iter().map(String::from).collect())
    }
}

/// Property bag of a service, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value, also accepting numeric text such as "21.5"
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_number)
    }

    /// Text value; empty strings read as absent
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(PropValue::as_text)
            .filter(|s| !s.trim().is_empty())
    }

    /// List of strings, empty when absent or of another shape
    pub fn text_list(&self, key: &str) -> &[String] {
        self.get(key)
            .and_then(PropValue::as_text_list)
            .unwrap_or_default()
    }

    pub fn supported_units(&self) -> &[String] {
        self.text_list(keys::SUP_UNITS)
    }

    pub fn supported_modes(&self) -> &[String] {
        self.text_list(keys::SUP_MODES)
    }

    pub fn supported_setpoints(&self) -> &[String] {
        self.text_list(keys::SUP_SETPOINTS)
    }

    pub fn supported_fan_modes(&self) -> &[String] {
        self.text_list(keys::SUP_FANMODES)
    }

    pub fn min_value(&self) -> Option<f64> {
        self.number(keys::MIN)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.number(keys::MAX)
    }

    pub fn step(&self) -> Option<f64> {
        self.number(keys::STEP)
    }

    pub fn device_type(&self) -> Option<&str> {
        self.text(keys::DEVICE_TYPE)
    }
}
