//! Translation settings

use serde::{Deserialize, Serialize};

/// Inputs to translation that do not come from the report itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// Identifier of the hub, prefixed to device identifiers
    #[serde(default = "default_hub_id")]
    pub hub_id: String,

    /// Root of the bridge's own state/command topics
    #[serde(default = "default_topic_root")]
    pub topic_root: String,

    /// QoS advertised to Home Assistant; 0 is left implicit
    #[serde(default)]
    pub qos: u8,

    /// Advertise a per-device availability topic
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_hub_id() -> String {
    "hub".to_string()
}

fn default_topic_root() -> String {
    "fimp-ha".to_string()
}

fn default_availability() -> bool {
    true
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            hub_id: default_hub_id(),
            topic_root: default_topic_root(),
            qos: 0,
            availability: default_availability(),
        }
    }
}
