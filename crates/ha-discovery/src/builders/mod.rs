//! Component builders
//!
//! One pure function per [`Target`]. Builders never fail: values they cannot
//! use fall back to the platform's defaults, and required options are always
//! filled from the device's topic layout.

mod climate;
mod humidifier;
mod sensor;
mod switch;

use ha_inclusion::Service;
use ha_mqtt_schema::{ComponentConfig, EntityCommon};

use crate::classify::{classify, MatchRole, PlatformMatch, Target};
use crate::identity::{DeviceIdentity, DeviceTopics};
use crate::settings::TranslationSettings;

/// Everything a builder may read besides the service itself
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub identity: &'a DeviceIdentity,
    pub settings: &'a TranslationSettings,
}

impl<'a> BuildContext<'a> {
    pub fn new(identity: &'a DeviceIdentity, settings: &'a TranslationSettings) -> Self {
        Self { identity, settings }
    }

    pub(crate) fn topics(&self) -> &'a DeviceTopics {
        &self.identity.topics
    }

    /// Shared options; the device block is the identity's, never rebuilt
    pub(crate) fn common(&self, unique_id: String, name: &str) -> EntityCommon {
        let mut common = EntityCommon::new(unique_id, self.identity.device.clone());
        common.name = Some(name.to_string());
        if self.settings.availability {
            common.availability_topic = Some(self.identity.topics.availability.clone());
        }
        if self.settings.qos > 0 {
            common.qos = Some(self.settings.qos);
        }
        common
    }
}

/// Build the component for one match.
///
/// Returns `None` only for services without an address, which the classifier
/// never matches in the first place.
pub fn build(
    platform_match: &PlatformMatch,
    service: &Service,
    ctx: &BuildContext<'_>,
) -> Option<ComponentConfig> {
    let address = service.address()?;
    let unique_id = match platform_match.role {
        MatchRole::Primary => address.to_string(),
        MatchRole::Auxiliary => auxiliary_id(address, platform_match.target),
    };

    let component = match platform_match.target {
        Target::Sensor(kind) => sensor::build_sensor(kind, unique_id, address, service, ctx),
        Target::BinarySensor(kind) => sensor::build_binary_sensor(kind, unique_id, address, ctx),
        Target::Switch => switch::build_switch(unique_id, address, ctx),
        Target::Climate => climate::build_climate(unique_id, address, service, ctx),
        Target::FanModeSelect => climate::build_fan_mode_select(unique_id, address, service, ctx),
        Target::Humidifier => humidifier::build_humidifier(unique_id, address, service, ctx),
    };
    Some(component)
}

/// Classify a service and build every component it yields (zero or more)
pub fn build_service(service: &Service, ctx: &BuildContext<'_>) -> Vec<ComponentConfig> {
    classify(service)
        .iter()
        .filter_map(|m| build(m, service, ctx))
        .collect()
}

fn auxiliary_id(address: &str, target: Target) -> String {
    let suffix = match target {
        Target::FanModeSelect => "fan_mode",
        other => other.platform().as_str(),
    };
    format!("{address}_{suffix}")
}

/// Trimmed, non-empty, first-occurrence-only entries of a string list
pub(crate) fn clean_list<'s>(list: &'s [String]) -> Vec<&'s str> {
    let mut out: Vec<&str> = Vec::new();
    for entry in list.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}
