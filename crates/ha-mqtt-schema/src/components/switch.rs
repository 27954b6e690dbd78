//! `switch` platform

use serde::Serialize;

use super::common::EntityCommon;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwitchComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    pub command_topic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_template: Option<String>,

    /// Without a state topic the switch runs optimistic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain: Option<bool>,
}
