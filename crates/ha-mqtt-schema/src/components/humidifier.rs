//! `humidifier` platform

use serde::Serialize;

use super::common::EntityCommon;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HumidifierComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    /// `humidifier` (default) or `dehumidifier`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    /// Power on/off commands
    pub command_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_template: Option<String>,

    /// Target humidity commands, a percentage
    pub target_humidity_command_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_command_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_value_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_state_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity_template: Option<String>,

    /// Must be configured together with `modes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_state_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,

    /// Current action: `off`, `humidifying`, `drying` or `idle`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_reset_humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_reset_mode: Option<String>,

    /// Defaults to 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_humidity: Option<f64>,
    /// Defaults to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_humidity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain: Option<bool>,
}
