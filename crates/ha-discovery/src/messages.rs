//! Rendering a discovery payload into MQTT messages

use std::collections::HashSet;

use ha_mqtt_schema::{OriginInfo, SchemaError};
use serde::Serialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::identity::topic_safe;
use crate::merge::DiscoveryPayload;

/// Availability payload Home Assistant expects by default
pub const PAYLOAD_ONLINE: &str = "online";

/// One retained MQTT message for the publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryMessage {
    pub topic: String,
    /// Serialized JSON; empty for removals
    pub payload: String,
    pub retain: bool,
}

impl DiscoveryMessage {
    fn retained(topic: String, payload: String) -> Self {
        Self {
            topic,
            payload,
            retain: true,
        }
    }

    pub fn is_removal(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Short stable digest of a unique_id, used to tell apart ids that are
/// identical once made topic safe
fn id_digest(unique_id: &str) -> String {
    let hash = Sha256::digest(unique_id.as_bytes());
    hash[..4].iter().map(|b| format!("{b:02x}")).collect()
}

impl DiscoveryPayload {
    /// Topic level identifying each component, in payload order.
    ///
    /// The topic-safe unique_id, unless an earlier component of the same
    /// platform already took it; the later one then gets a digest suffix.
    pub fn object_ids(&self) -> Vec<String> {
        let mut taken: HashSet<(&str, String)> = HashSet::new();
        self.components
            .iter()
            .map(|(unique_id, component)| {
                let platform = component.platform().as_str();
                let mut object_id = topic_safe(unique_id);
                if taken.contains(&(platform, object_id.clone())) {
                    let base = format!("{object_id}_{}", id_digest(unique_id));
                    object_id = base.clone();
                    let mut n = 2;
                    while taken.contains(&(platform, object_id.clone())) {
                        object_id = format!("{base}_{n}");
                        n += 1;
                    }
                    warn!(
                        "Discovery topic of {} collides with another {} on device {}, using {}",
                        unique_id, platform, self.device_id, object_id
                    );
                }
                taken.insert((platform, object_id.clone()));
                object_id
            })
            .collect()
    }

    /// Discovery topic of one component:
    /// `<prefix>/<platform>/<device_id>/<object_id>/config`
    pub fn component_topic(&self, prefix: &str, platform: &str, object_id: &str) -> String {
        format!(
            "{}/{}/{}/{}/config",
            prefix.trim_end_matches('/'),
            platform,
            self.device_id,
            object_id
        )
    }

    /// Device-based discovery topic: `<prefix>/device/<device_id>/config`
    pub fn device_topic(&self, prefix: &str) -> String {
        format!("{}/device/{}/config", prefix.trim_end_matches('/'), self.device_id)
    }

    /// One retained config message per component, in payload order
    pub fn component_messages(&self, prefix: &str) -> Result<Vec<DiscoveryMessage>, SchemaError> {
        self.components
            .values()
            .zip(self.object_ids())
            .map(|(component, object_id)| {
                let topic = self.component_topic(prefix, component.platform().as_str(), &object_id);
                let payload = serde_json::to_string(&component.to_component_json()?)?;
                Ok(DiscoveryMessage::retained(topic, payload))
            })
            .collect()
    }

    /// A single message carrying the whole device with its components under `cmps`
    pub fn device_message(
        &self,
        prefix: &str,
        origin: &OriginInfo,
    ) -> Result<DiscoveryMessage, SchemaError> {
        let mut cmps = Map::new();
        for (unique_id, component) in &self.components {
            cmps.insert(unique_id.clone(), component.to_device_entry_json()?);
        }

        let body = json!({
            "dev": self.device.as_ref(),
            "o": origin,
            "cmps": Value::Object(cmps),
        });
        Ok(DiscoveryMessage::retained(
            self.device_topic(prefix),
            serde_json::to_string(&body)?,
        ))
    }

    /// Empty retained messages clearing every component topic
    pub fn removal_messages(&self, prefix: &str) -> Vec<DiscoveryMessage> {
        self.components
            .values()
            .zip(self.object_ids())
            .map(|(component, object_id)| {
                DiscoveryMessage::retained(
                    self.component_topic(prefix, component.platform().as_str(), &object_id),
                    String::new(),
                )
            })
            .collect()
    }

    /// Retained `online` on the device's availability topic
    pub fn availability_message(&self) -> DiscoveryMessage {
        DiscoveryMessage::retained(self.topics.availability.clone(), PAYLOAD_ONLINE.to_string())
    }

    /// Empty retained message clearing the availability topic
    pub fn availability_removal_message(&self) -> DiscoveryMessage {
        DiscoveryMessage::retained(self.topics.availability.clone(), String::new())
    }

    /// Empty retained message clearing the device-based topic
    pub fn device_removal_message(&self, prefix: &str) -> DiscoveryMessage {
        DiscoveryMessage::retained(self.device_topic(prefix), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ha_inclusion::{keys, InclusionReport, Props, Service};
    use ha_mqtt_schema::{ComponentConfig, Platform};

    use crate::translate::translate;

    fn payload() -> DiscoveryPayload {
        let mut report = InclusionReport::new("12")
            .with_service(
                Service::new("sensor_direct", "dev1/sensor1")
                    .with_props(Props::new().with(keys::SUP_UNITS, vec!["°"])),
            )
            .with_service(Service::new("battery", "dev1/battery"));
        report.product_name = Some("Wind vane".to_string());
        translate(&report)
    }

    #[test]
    fn test_component_messages() {
        let messages = payload().component_messages("homeassistant/").unwrap();
        assert_eq!(messages.len(), 2);

        let first = &messages[0];
        assert_eq!(first.topic, "homeassistant/sensor/12/dev1_sensor1/config");
        assert!(first.retain);

        let body: Value = serde_json::from_str(&first.payload).unwrap();
        assert_eq!(body["unique_id"], "dev1/sensor1");
        assert_eq!(body["device_class"], "wind_direction");
        assert_eq!(body["unit_of_measurement"], "°");
        assert_eq!(body["device"]["identifiers"], json!(["hub_12"]));
        assert_eq!(body["device"]["name"], "Wind vane");
        assert!(body.get("platform").is_none());

        assert_eq!(messages[1].topic, "homeassistant/sensor/12/dev1_battery/config");
    }

    #[test]
    fn test_device_message() {
        let origin = OriginInfo {
            name: "fimp-ha".to_string(),
            sw_version: Some("0.1.0".to_string()),
            support_url: None,
        };
        let message = payload().device_message("homeassistant", &origin).unwrap();
        assert_eq!(message.topic, "homeassistant/device/12/config");
        assert!(message.retain);

        let body: Value = serde_json::from_str(&message.payload).unwrap();
        assert_eq!(body["dev"]["identifiers"], json!(["hub_12"]));
        assert_eq!(body["o"], json!({"name": "fimp-ha", "sw_version": "0.1.0"}));

        let entry = &body["cmps"]["dev1/sensor1"];
        assert_eq!(entry["platform"], "sensor");
        assert_eq!(entry["unique_id"], "dev1/sensor1");
        assert!(entry.get("device").is_none());
        assert_eq!(body["cmps"]["dev1/battery"]["entity_category"], "diagnostic");
    }

    #[test]
    fn test_removal_messages() {
        let payload = payload();
        let removals = payload.removal_messages("homeassistant");
        assert_eq!(removals.len(), 2);
        assert!(removals.iter().all(|m| m.is_removal() && m.retain));
        assert_eq!(
            removals[0].topic,
            "homeassistant/sensor/12/dev1_sensor1/config"
        );

        let device = payload.device_removal_message("homeassistant");
        assert_eq!(device.topic, "homeassistant/device/12/config");
        assert!(device.is_removal());

        let availability = payload.availability_removal_message();
        assert_eq!(availability.topic, "fimp-ha/12/availability");
        assert!(availability.is_removal() && availability.retain);
    }

    #[test]
    fn test_availability_message() {
        let message = payload().availability_message();
        assert_eq!(message.topic, "fimp-ha/12/availability");
        assert_eq!(message.payload, "online");
        assert!(message.retain);
    }

    #[test]
    fn test_colliding_object_ids() {
        let payload = translate(
            &InclusionReport::new("9")
                .with_service(Service::new("sensor_temp", "a/1"))
                .with_service(Service::new("sensor_temp", "a_1"))
                .with_service(Service::new("out_bin_switch", "a.1").with_interface(
                    ha_inclusion::Interface::command("cmd.binary.set", "bool"),
                )),
        );
        assert_eq!(payload.len(), 3);
        assert_eq!(
            payload.iter().map(ComponentConfig::platform).collect::<Vec<_>>(),
            vec![Platform::Sensor, Platform::Sensor, Platform::Switch]
        );

        let ids = payload.object_ids();
        assert_eq!(ids[0], "a_1");
        assert_eq!(ids[1], format!("a_1_{}", id_digest("a_1")));
        assert_eq!(ids[1].len(), "a_1_".len() + 8);
        // another platform has its own topic space
        assert_eq!(ids[2], "a_1");

        let topics: Vec<String> = payload
            .component_messages("homeassistant")
            .unwrap()
            .into_iter()
            .map(|m| m.topic)
            .collect();
        assert_eq!(
            topics,
            vec![
                "homeassistant/sensor/9/a_1/config".to_string(),
                format!("homeassistant/sensor/9/{}/config", ids[1]),
                "homeassistant/switch/9/a_1/config".to_string(),
            ]
        );

        let removals: Vec<String> = payload
            .removal_messages("homeassistant")
            .into_iter()
            .map(|m| m.topic)
            .collect();
        assert_eq!(removals, topics);
        assert_eq!(payload.object_ids(), ids);
    }
}
