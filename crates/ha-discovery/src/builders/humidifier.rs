//! Humidity control builder

use ha_inclusion::Service;
use ha_mqtt_schema::{ComponentConfig, HumidifierComponent};

use super::{clean_list, BuildContext};
use crate::templates::{command_template, state_template, VAL_NUMBER, VAL_TEXT};

const CMD_POWER_SET: &str = "cmd.power.set";
const CMD_SETPOINT_SET: &str = "cmd.setpoint.set";
const CMD_MODE_SET: &str = "cmd.mode.set";
const EVT_STATE_REPORT: &str = "evt.state.report";

pub(super) fn build_humidifier(
    unique_id: String,
    address: &str,
    service: &Service,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    let topics = ctx.topics();
    let props = &service.props;

    let device_class = match props.device_type() {
        Some(kind) if kind.eq_ignore_ascii_case("dehumidifier") => "dehumidifier",
        _ => "humidifier",
    };

    let mut humidifier = HumidifierComponent {
        common: ctx.common(unique_id, "Humidity control"),
        device_class: Some(device_class.to_string()),
        command_topic: topics.command.clone(),
        command_template: Some(command_template(address, CMD_POWER_SET, VAL_TEXT)),
        payload_on: Some("on".to_string()),
        payload_off: Some("off".to_string()),
        state_topic: Some(topics.state.clone()),
        state_value_template: Some(state_template(address, "power")),
        target_humidity_command_topic: topics.command.clone(),
        target_humidity_command_template: Some(command_template(
            address,
            CMD_SETPOINT_SET,
            VAL_NUMBER,
        )),
        target_humidity_state_topic: Some(topics.state.clone()),
        target_humidity_state_template: Some(state_template(address, "setpoint")),
        current_humidity_topic: Some(topics.state.clone()),
        current_humidity_template: Some(state_template(address, "humidity")),
        ..Default::default()
    };

    let modes: Vec<String> = clean_list(props.supported_modes())
        .into_iter()
        .map(String::from)
        .collect();
    if !modes.is_empty() {
        humidifier.modes = Some(modes);
        humidifier.mode_command_topic = Some(topics.command.clone());
        humidifier.mode_command_template = Some(command_template(address, CMD_MODE_SET, VAL_TEXT));
        humidifier.mode_state_topic = Some(topics.state.clone());
        humidifier.mode_state_template = Some(state_template(address, "mode"));
    }

    if service.reports(EVT_STATE_REPORT) {
        humidifier.action_topic = Some(topics.state.clone());
        humidifier.action_template = Some(state_template(address, "action"));
    }

    let in_range = |v: &f64| (0.0..=100.0).contains(v);
    if let (Some(min), Some(max)) = (
        props.min_value().filter(in_range),
        props.max_value().filter(in_range),
    ) {
        if min <= max {
            humidifier.min_humidity = Some(min);
            humidifier.max_humidity = Some(max);
        }
    }

    ComponentConfig::Humidifier(humidifier)
}
