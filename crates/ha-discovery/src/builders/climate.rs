//! Thermostat builders: the climate entity and its optional fan mode select

use ha_inclusion::Service;
use ha_mqtt_schema::{ClimateComponent, ComponentConfig, SelectComponent};

use super::{clean_list, BuildContext};
use crate::classify::normalize_unit;
use crate::templates::{
    command_template, mapped_state_template, mapped_text_value, state_template, VAL_NUMBER,
    VAL_TEXT,
};

const CMD_MODE_SET: &str = "cmd.mode.set";
const CMD_SETPOINT_SET: &str = "cmd.setpoint.set";
const CMD_FANMODE_SET: &str = "cmd.fanmode.set";
const EVT_STATE_REPORT: &str = "evt.state.report";
const EVT_SENSOR_REPORT: &str = "evt.sensor.report";

/// Setpoint commands taking `{"type", "temp", "unit"}` instead of a number
const VAL_T_STR_MAP: &str = "str_map";
const DEFAULT_SETPOINT_TYPE: &str = "heat";

/// Hub thermostat mode to Home Assistant HVAC mode
fn hvac_mode(hub_mode: &str) -> Option<&'static str> {
    match hub_mode {
        "off" => Some("off"),
        "heat" => Some("heat"),
        "cool" => Some("cool"),
        "auto" => Some("auto"),
        "heat_cool" | "auto_changeover" => Some("heat_cool"),
        "fan" | "fan_only" => Some("fan_only"),
        "dry" | "dry_air" => Some("dry"),
        _ => None,
    }
}

/// Supported hub modes paired with their HVAC mode, unknown modes dropped
fn mode_pairs<'s>(supported: &'s [String]) -> Vec<(&'s str, &'static str)> {
    clean_list(supported)
        .into_iter()
        .filter_map(|hub| hvac_mode(hub).map(|hvac| (hub, hvac)))
        .collect()
}

/// Hub to HVAC names where they differ
fn state_mapping<'s>(pairs: &[(&'s str, &'static str)]) -> Vec<(&'s str, &'static str)> {
    pairs.iter().copied().filter(|(hub, hvac)| hub != hvac).collect()
}

/// HVAC to hub names where they differ; the first hub mode of each HVAC mode wins
fn command_mapping<'s>(pairs: &[(&'s str, &'static str)]) -> Vec<(&'static str, &'s str)> {
    let mut mapping = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for &(hub, hvac) in pairs {
        if seen.contains(&hvac) {
            continue;
        }
        seen.push(hvac);
        if hub != hvac {
            mapping.push((hvac, hub));
        }
    }
    mapping
}

pub(super) fn build_climate(
    unique_id: String,
    address: &str,
    service: &Service,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    let topics = ctx.topics();
    let props = &service.props;

    let pairs = mode_pairs(props.supported_modes());
    let mut modes: Vec<String> = Vec::new();
    for &(_, hvac) in &pairs {
        if !modes.iter().any(|m| m == hvac) {
            modes.push(hvac.to_string());
        }
    }

    let to_hvac = state_mapping(&pairs);
    let mode_state_template = if to_hvac.is_empty() {
        state_template(address, "mode")
    } else {
        mapped_state_template(address, "mode", &to_hvac)
    };

    let unit = temperature_unit(props.supported_units());
    let mut climate = ClimateComponent {
        common: ctx.common(unique_id, "Thermostat"),
        modes: (!modes.is_empty()).then_some(modes),
        mode_state_topic: Some(topics.state.clone()),
        mode_state_template: Some(mode_state_template),
        temperature_state_topic: Some(topics.state.clone()),
        temperature_state_template: Some(state_template(address, "setpoint")),
        temperature_unit: unit.clone(),
        ..Default::default()
    };

    if service.accepts_command(CMD_MODE_SET) {
        let to_hub = command_mapping(&pairs);
        let val = if to_hub.is_empty() {
            VAL_TEXT.to_string()
        } else {
            mapped_text_value(&to_hub)
        };
        climate.mode_command_topic = Some(topics.command.clone());
        climate.mode_command_template = Some(command_template(address, CMD_MODE_SET, &val));
    }

    if service.accepts_command(CMD_SETPOINT_SET) {
        let val = match service.command_value_type(CMD_SETPOINT_SET) {
            Some(VAL_T_STR_MAP) => setpoint_map_value(
                clean_list(props.supported_setpoints())
                    .first()
                    .copied()
                    .unwrap_or(DEFAULT_SETPOINT_TYPE),
                unit.as_deref().unwrap_or("C"),
            ),
            _ => VAL_NUMBER.to_string(),
        };
        climate.temperature_command_topic = Some(topics.command.clone());
        climate.temperature_command_template =
            Some(command_template(address, CMD_SETPOINT_SET, &val));
    }

    if service.reports(EVT_STATE_REPORT) {
        climate.action_topic = Some(topics.state.clone());
        climate.action_template = Some(state_template(address, "action"));
    }

    if service.reports(EVT_SENSOR_REPORT) {
        climate.current_temperature_topic = Some(topics.state.clone());
        climate.current_temperature_template = Some(state_template(address, "temperature"));
    }

    if let (Some(min), Some(max)) = (props.min_value(), props.max_value()) {
        if min < max {
            climate.min_temp = Some(min);
            climate.max_temp = Some(max);
        }
    }

    climate.temp_step = props.step().filter(|step| *step > 0.0);

    ComponentConfig::Climate(climate)
}

/// `{"type": <setpoint>, "temp": "<value>", "unit": <unit>}`
fn setpoint_map_value(setpoint_type: &str, unit: &str) -> String {
    let setpoint_type = serde_json::Value::String(setpoint_type.to_string());
    let unit = serde_json::Value::String(unit.to_string());
    format!(r#"{{"type": {setpoint_type}, "temp": "{{{{ value }}}}", "unit": {unit}}}"#)
}

/// `C` or `F` from the first declared unit; otherwise the system unit applies
fn temperature_unit(units: &[String]) -> Option<String> {
    match units.first().map(|u| normalize_unit(u)) {
        Some("°C") => Some("C".to_string()),
        Some("°F") => Some("F".to_string()),
        _ => None,
    }
}

pub(super) fn build_fan_mode_select(
    unique_id: String,
    address: &str,
    service: &Service,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    let topics = ctx.topics();
    ComponentConfig::Select(SelectComponent {
        common: ctx.common(unique_id, "Fan mode"),
        command_topic: topics.command.clone(),
        command_template: Some(command_template(address, CMD_FANMODE_SET, VAL_TEXT)),
        state_topic: Some(topics.state.clone()),
        value_template: Some(state_template(address, "fan_mode")),
        options: clean_list(service.props.supported_fan_modes())
            .into_iter()
            .map(String::from)
            .collect(),
        ..Default::default()
    })
}
