//! `sensor` platform

use serde::{Deserialize, Serialize};

use super::common::EntityCommon;

/// How Home Assistant's statistics treat a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

/// A read-only numeric or textual reading
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    pub state_topic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_display_precision: Option<u8>,

    /// Seconds after which the value expires without an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_update: Option<bool>,
}
