//! Sensor and binary sensor builders

use ha_inclusion::Service;
use ha_mqtt_schema::{BinarySensorComponent, ComponentConfig, EntityCategory, SensorComponent};

use super::BuildContext;
use crate::classify::{normalize_unit, BinaryKind, SensorKind};
use crate::templates::{on_off_template, state_template};

pub(super) fn build_sensor(
    kind: SensorKind,
    unique_id: String,
    address: &str,
    service: &Service,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    let mut common = ctx.common(unique_id, kind.label());
    if kind == SensorKind::Battery {
        common.entity_category = Some(EntityCategory::Diagnostic);
    }

    ComponentConfig::Sensor(SensorComponent {
        common,
        state_topic: ctx.topics().state.clone(),
        value_template: Some(state_template(address, kind.field())),
        device_class: kind.device_class().map(String::from),
        state_class: kind.state_class(),
        unit_of_measurement: resolve_unit(kind, service.props.supported_units()),
        ..Default::default()
    })
}

/// First declared unit when the device class accepts it, else the kind's default
fn resolve_unit(kind: SensorKind, declared: &[String]) -> Option<String> {
    let accepted = kind.accepted_units();
    declared
        .first()
        .map(|u| normalize_unit(u))
        .filter(|u| !u.is_empty())
        .filter(|u| accepted.is_empty() || accepted.contains(u))
        .or_else(|| kind.default_unit())
        .map(String::from)
}

pub(super) fn build_binary_sensor(
    kind: BinaryKind,
    unique_id: String,
    address: &str,
    ctx: &BuildContext<'_>,
) -> ComponentConfig {
    ComponentConfig::BinarySensor(BinarySensorComponent {
        common: ctx.common(unique_id, kind.label()),
        state_topic: ctx.topics().state.clone(),
        value_template: Some(on_off_template(address, kind.field())),
        device_class: Some(kind.device_class().to_string()),
        ..Default::default()
    })
}
