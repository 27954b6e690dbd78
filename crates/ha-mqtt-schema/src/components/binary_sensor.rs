//! `binary_sensor` platform

use serde::Serialize;

use super::common::EntityCommon;

/// A read-only on/off state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BinarySensorComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    pub state_topic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    /// Defaults to `ON`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_on: Option<String>,

    /// Defaults to `OFF`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_delay: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<u32>,
}
