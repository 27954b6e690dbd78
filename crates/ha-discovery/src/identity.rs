//! Device identity and topic layout
//!
//! Both are derived once per report and shared by every component built for
//! that device.

use std::sync::Arc;

use ha_inclusion::InclusionReport;
use ha_mqtt_schema::DeviceInfo;
use serde::Serialize;

use crate::settings::TranslationSettings;

/// Replace everything outside `[A-Za-z0-9_-]` so the value fits in one
/// MQTT topic level of a discovery topic
pub fn topic_safe(value: &str) -> String {
    let safe: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('_');
    if safe.is_empty() {
        "_".to_string()
    } else {
        safe.to_string()
    }
}

/// The bridge's own topics for one device
///
/// State messages on `state` are JSON objects keyed by service address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTopics {
    pub state: String,
    pub command: String,
    pub availability: String,
}

impl DeviceTopics {
    pub fn new(topic_root: &str, device_id: &str) -> Self {
        let root = topic_root.trim_end_matches('/');
        Self {
            state: format!("{root}/{device_id}/state"),
            command: format!("{root}/{device_id}/command"),
            availability: format!("{root}/{device_id}/availability"),
        }
    }
}

/// Identity of one physical device, shared by all of its components
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdentity {
    /// Topic-safe device id used in discovery topics
    pub device_id: String,
    pub device: Arc<DeviceInfo>,
    pub topics: DeviceTopics,
}

impl DeviceIdentity {
    pub fn from_report(report: &InclusionReport, settings: &TranslationSettings) -> Self {
        let address = report.address.trim();
        let device_id = topic_safe(address);

        let device = DeviceInfo {
            identifiers: vec![format!("{}_{}", settings.hub_id, address)],
            name: Some(
                report
                    .product_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| format!("Device {address}")),
            ),
            manufacturer: report.manufacturer_id.clone(),
            model: report.product_id.clone(),
            model_id: report.product_hash.clone(),
            hw_version: report.hw_ver.clone(),
            sw_version: report.sw_ver.clone(),
            via_device: Some(settings.hub_id.clone()),
            ..Default::default()
        };

        Self {
            topics: DeviceTopics::new(&settings.topic_root, &device_id),
            device_id,
            device: Arc::new(device),
        }
    }
}
