//! Device merge layer

use std::sync::Arc;

use ha_mqtt_schema::{ComponentConfig, DeviceInfo};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::identity::{DeviceIdentity, DeviceTopics};

/// Everything Home Assistant needs to discover one physical device
///
/// Built fresh on every translation and never patched; the next sweep
/// replaces it as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryPayload {
    pub device_id: String,
    pub device: Arc<DeviceInfo>,
    pub topics: DeviceTopics,
    /// Keyed by unique_id, in service order
    pub components: IndexMap<String, ComponentConfig>,
}

impl DiscoveryPayload {
    /// Payload with no components for the given device
    pub fn empty(identity: &DeviceIdentity) -> Self {
        Self {
            device_id: identity.device_id.clone(),
            device: identity.device.clone(),
            topics: identity.topics.clone(),
            components: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, unique_id: &str) -> Option<&ComponentConfig> {
        self.components.get(unique_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentConfig> {
        self.components.values()
    }
}

/// Fold the components of one device into its discovery payload.
///
/// A later component with an already seen unique_id replaces the earlier one
/// entirely and takes its place at the end. Components that fail schema
/// validation are dropped.
pub fn merge(
    identity: &DeviceIdentity,
    components: impl IntoIterator<Item = ComponentConfig>,
) -> DiscoveryPayload {
    let mut payload = DiscoveryPayload::empty(identity);

    for mut component in components {
        component.common_mut().device = identity.device.clone();

        if let Err(e) = component.validate() {
            warn!(
                device_id = %identity.device_id,
                unique_id = %component.unique_id(),
                "Dropping invalid component: {}",
                e
            );
            continue;
        }

        let unique_id = component.unique_id().to_string();
        if payload.components.shift_remove(&unique_id).is_some() {
            warn!(
                device_id = %identity.device_id,
                unique_id = %unique_id,
                "Duplicate unique_id, keeping the later component"
            );
        }
        payload.components.insert(unique_id, component);
    }

    debug!(
        device_id = %payload.device_id,
        components = payload.components.len(),
        "Merged device components"
    );
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use ha_inclusion::InclusionReport;
    use ha_mqtt_schema::{EntityCommon, SensorComponent, SwitchComponent};

    use crate::settings::TranslationSettings;

    fn identity() -> DeviceIdentity {
        DeviceIdentity::from_report(&InclusionReport::new("7"), &TranslationSettings::default())
    }

    fn sensor(unique_id: &str, device_class: Option<&str>) -> ComponentConfig {
        ComponentConfig::Sensor(SensorComponent {
            common: EntityCommon::new(unique_id.to_string(), Arc::new(DeviceInfo::default())),
            state_topic: "fimp-ha/7/state".to_string(),
            device_class: device_class.map(String::from),
            ..Default::default()
        })
    }

    #[test]
    fn test_merge_keys_by_unique_id() {
        let identity = identity();
        let payload = merge(
            &identity,
            vec![sensor("a", Some("temperature")), sensor("b", None)],
        );

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.device_id, "7");
        let keys: Vec<&str> = payload.components.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_merge_attaches_shared_device() {
        let identity = identity();
        let payload = merge(&identity, vec![sensor("a", None), sensor("b", None)]);
        for component in payload.iter() {
            assert!(Arc::ptr_eq(&component.common().device, &identity.device));
        }
    }

    #[test]
    fn test_collision_last_write_wins() {
        let identity = identity();
        let payload = merge(
            &identity,
            vec![
                sensor("a", Some("temperature")),
                sensor("b", None),
                sensor("a", Some("humidity")),
            ],
        );

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("a").and_then(|c| c.device_class()), Some("humidity"));
        let keys: Vec<&str> = payload.components.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_collision_is_not_field_merged() {
        let identity = identity();
        let payload = merge(
            &identity,
            vec![sensor("a", Some("temperature")), sensor("a", None)],
        );
        assert_eq!(payload.get("a").and_then(|c| c.device_class()), None);
    }

    #[test]
    fn test_invalid_component_dropped() {
        let identity = identity();
        let switch = ComponentConfig::Switch(SwitchComponent {
            common: EntityCommon::new("s".to_string(), Arc::new(DeviceInfo::default())),
            command_topic: String::new(),
            ..Default::default()
        });
        let payload = merge(
            &identity,
            vec![sensor("a", Some("no_such_class")), switch, sensor("b", None)],
        );

        assert_eq!(payload.len(), 1);
        assert!(payload.get("b").is_some());
    }

    #[test]
    fn test_merge_nothing() {
        let payload = merge(&identity(), Vec::new());
        assert!(payload.is_empty());
        assert_eq!(payload.topics.state, "fimp-ha/7/state");
    }
}
