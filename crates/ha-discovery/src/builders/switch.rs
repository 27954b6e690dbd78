//! Switch builder

use ha_mqtt_schema::{ComponentConfig, SwitchComponent};

use super::BuildContext;
use crate::classify::{BinaryKind, CMD_BINARY_SET};
use crate::templates::{command_template, on_off_template, VAL_ON_OFF};

pub(super) fn build_switch(
    unique_id: String,
    address: &str,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    let topics = ctx.topics();
    ComponentConfig::Switch(SwitchComponent {
        common: ctx.common(unique_id, "Switch"),
        command_topic: topics.command.clone(),
        command_template: Some(command_template(address, CMD_BINARY_SET, VAL_ON_OFF)),
        state_topic: Some(topics.state.clone()),
        value_template: Some(on_off_template(address, BinaryKind::Power.field())),
        ..Default::default()
    })
}
