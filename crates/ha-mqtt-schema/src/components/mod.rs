//! Component configuration records
//!
//! One record per platform, each flattening the shared `EntityCommon` options.
//! `ComponentConfig` is the closed set of them, serialized with a `platform`
//! tag as required by device-based discovery.

mod binary_sensor;
mod climate;
mod common;
mod humidifier;
mod select;
mod sensor;
mod switch;

pub use binary_sensor::BinarySensorComponent;
pub use climate::ClimateComponent;
pub use common::{Availability, AvailabilityMode, EntityCategory, EntityCommon};
pub use humidifier::HumidifierComponent;
pub use select::SelectComponent;
pub use sensor::{SensorComponent, StateClass};
pub use switch::SwitchComponent;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{schema, Platform, HVAC_MODES};
use crate::error::SchemaError;

/// A populated Home Assistant component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum ComponentConfig {
    Sensor(SensorComponent),
    BinarySensor(BinarySensorComponent),
    Switch(SwitchComponent),
    Climate(ClimateComponent),
    Humidifier(HumidifierComponent),
    Select(SelectComponent),
}

impl ComponentConfig {
    pub fn platform(&self) -> Platform {
        match self {
            ComponentConfig::Sensor(_) => Platform::Sensor,
            ComponentConfig::BinarySensor(_) => Platform::BinarySensor,
            ComponentConfig::Switch(_) => Platform::Switch,
            ComponentConfig::Climate(_) => Platform::Climate,
            ComponentConfig::Humidifier(_) => Platform::Humidifier,
            ComponentConfig::Select(_) => Platform::Select,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        match self {
            ComponentConfig::Sensor(c) => &c.common,
            ComponentConfig::BinarySensor(c) => &c.common,
            ComponentConfig::Switch(c) => &c.common,
            ComponentConfig::Climate(c) => &c.common,
            ComponentConfig::Humidifier(c) => &c.common,
            ComponentConfig::Select(c) => &c.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            ComponentConfig::Sensor(c) => &mut c.common,
            ComponentConfig::BinarySensor(c) => &mut c.common,
            ComponentConfig::Switch(c) => &mut c.common,
            ComponentConfig::Climate(c) => &mut c.common,
            ComponentConfig::Humidifier(c) => &mut c.common,
            ComponentConfig::Select(c) => &mut c.common,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.common().unique_id
    }

    pub fn device_class(&self) -> Option<&str> {
        match self {
            ComponentConfig::Sensor(c) => c.device_class.as_deref(),
            ComponentConfig::BinarySensor(c) => c.device_class.as_deref(),
            ComponentConfig::Switch(c) => c.device_class.as_deref(),
            ComponentConfig::Humidifier(c) => c.device_class.as_deref(),
            ComponentConfig::Climate(_) | ComponentConfig::Select(_) => None,
        }
    }

    /// Check the component against the platform catalog
    pub fn validate(&self) -> Result<(), SchemaError> {
        let common = self.common();
        let unique_id = common.unique_id.as_str();
        if unique_id.trim().is_empty() {
            return Err(SchemaError::EmptyUniqueId);
        }
        if !common.device.is_linkable() {
            return Err(SchemaError::MissingDeviceLink {
                unique_id: unique_id.to_string(),
            });
        }

        let platform = schema(self.platform());
        let json = serde_json::to_value(self)?;
        let empty = Map::new();
        let fields = json.as_object().unwrap_or(&empty);

        for &(template, topic) in platform.command_pairs {
            if is_set(fields, template) && !is_set(fields, topic) {
                return Err(SchemaError::TemplateWithoutTopic {
                    unique_id: unique_id.to_string(),
                    template,
                    topic,
                });
            }
        }

        for &field in platform.required {
            if !is_set(fields, field) {
                return Err(SchemaError::MissingRequired {
                    unique_id: unique_id.to_string(),
                    field,
                });
            }
        }

        if let Some(device_class) = self.device_class() {
            if !platform.accepts_device_class(device_class) {
                return Err(SchemaError::UnknownDeviceClass {
                    unique_id: unique_id.to_string(),
                    platform: platform.platform.as_str(),
                    device_class: device_class.to_string(),
                });
            }
        }

        if let Some(qos) = common.qos {
            if qos > 2 {
                return Err(out_of_range(unique_id, "qos", format!("{qos} > 2")));
            }
        }

        match self {
            ComponentConfig::Climate(c) => {
                for mode in c.modes.iter().flatten() {
                    if !HVAC_MODES.contains(&mode.as_str()) {
                        return Err(SchemaError::InvalidMode {
                            unique_id: unique_id.to_string(),
                            mode: mode.clone(),
                        });
                    }
                }
                check_bounds(unique_id, "min_temp", c.min_temp, c.max_temp, None)?;
                check_bounds(
                    unique_id,
                    "min_humidity",
                    c.min_humidity,
                    c.max_humidity,
                    Some(100.0),
                )?;
            }
            ComponentConfig::Humidifier(c) => {
                if c.modes.is_some() && c.mode_command_topic.is_none() {
                    return Err(SchemaError::MissingRequired {
                        unique_id: unique_id.to_string(),
                        field: "mode_command_topic",
                    });
                }
                check_bounds(
                    unique_id,
                    "min_humidity",
                    c.min_humidity,
                    c.max_humidity,
                    Some(100.0),
                )?;
            }
            _ => {}
        }

        Ok(())
    }

    /// JSON for a per-entity discovery topic: no platform tag, device block kept
    pub fn to_component_json(&self) -> Result<Value, SchemaError> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("platform");
        }
        Ok(value)
    }

    /// JSON for a `cmps` entry of device-based discovery: platform tag kept,
    /// device block dropped since the payload carries it once
    pub fn to_device_entry_json(&self) -> Result<Value, SchemaError> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("device");
        }
        Ok(value)
    }
}

fn is_set(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(_) => true,
    }
}

fn out_of_range(unique_id: &str, field: &'static str, reason: String) -> SchemaError {
    SchemaError::OutOfRange {
        unique_id: unique_id.to_string(),
        field,
        reason,
    }
}

/// Lower bound must not exceed upper; both within `0..=ceiling` when given
fn check_bounds(
    unique_id: &str,
    field: &'static str,
    min: Option<f64>,
    max: Option<f64>,
    ceiling: Option<f64>,
) -> Result<(), SchemaError> {
    if let Some(ceiling) = ceiling {
        for value in [min, max].into_iter().flatten() {
            if !(0.0..=ceiling).contains(&value) {
                return Err(out_of_range(
                    unique_id,
                    field,
                    format!("{value} not within 0..={ceiling}"),
                ));
            }
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(out_of_range(unique_id, field, format!("{min} > {max}")));
        }
    }
    Ok(())
}
