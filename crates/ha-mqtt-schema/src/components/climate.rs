//! `climate` platform (HVAC)
//!
//! Every `*_state_topic` may be paired with a template rendering the received
//! payload, and every `*_command_topic` with a template rendering the outgoing
//! one. Topics without a state counterpart make Home Assistant run that
//! attribute optimistically.

use serde::Serialize;

use super::common::EntityCommon;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClimateComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    /// Current action: `off`, `heating`, `cooling`, `drying`, `idle` or `fan`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_mode_state_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_modes: Option<Vec<String>>,

    /// Initial target temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_state_template: Option<String>,
    /// Subset of the HVAC modes; Home Assistant offers all of them when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_off: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_command_template: Option<String>,

    /// 0.1, 0.5 or 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_mode_value_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_modes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_horizontal_mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_horizontal_mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_horizontal_mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_horizontal_mode_state_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_horizontal_modes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_mode_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_mode_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_mode_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_mode_state_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_modes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_humidity_state_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_state_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high_state_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low_command_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low_command_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low_state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low_state_template: Option<String>,

    /// `C` or `F`; the system unit when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_step: Option<f64>,

    /// Default template for every `*_state_topic`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,
}
