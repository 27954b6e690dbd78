//! Bridge configuration
//!
//! Read from the `bridge:` section of the configuration file; every field
//! has a default so an absent section is valid.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ha_discovery::TranslationSettings;
use ha_mqtt_schema::OriginInfo;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// Section of the configuration file holding [`BridgeConfig`]
pub const SECTION: &str = "bridge";

/// Discovery message layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// One retained config message per component
    #[default]
    Component,
    /// One retained message per device carrying all of its components
    Device,
}

impl DiscoveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Component => "component",
            DiscoveryMode::Device => "device",
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "component" => Ok(DiscoveryMode::Component),
            "device" => Ok(DiscoveryMode::Device),
            other => Err(ConfigError::invalid(
                "discovery_mode",
                format!("expected 'component' or 'device', got '{other}'"),
            )),
        }
    }
}

/// Origin advertised in device-based discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginConfig {
    #[serde(default = "default_origin_name")]
    pub name: String,

    #[serde(default)]
    pub sw_version: Option<String>,

    #[serde(default)]
    pub support_url: Option<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            name: default_origin_name(),
            sw_version: None,
            support_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Home Assistant's discovery prefix
    #[serde(default = "default_discovery_prefix")]
    pub discovery_prefix: String,

    #[serde(default)]
    pub discovery_mode: DiscoveryMode,

    #[serde(default = "default_hub_id")]
    pub hub_id: String,

    /// Root of the per-device state/command/availability topics
    #[serde(default = "default_topic_root")]
    pub topic_root: String,

    #[serde(default)]
    pub qos: u8,

    /// Advertise an availability topic on every component
    #[serde(default = "default_availability")]
    pub availability: bool,

    #[serde(default)]
    pub origin: OriginConfig,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_discovery_prefix() -> String {
    "homeassistant".to_string()
}

fn default_hub_id() -> String {
    TranslationSettings::default().hub_id
}

fn default_topic_root() -> String {
    TranslationSettings::default().topic_root
}

fn default_availability() -> bool {
    true
}

fn default_origin_name() -> String {
    "fimp-ha".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            discovery_prefix: default_discovery_prefix(),
            discovery_mode: DiscoveryMode::default(),
            hub_id: default_hub_id(),
            topic_root: default_topic_root(),
            qos: 0,
            availability: default_availability(),
            origin: OriginConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    /// Load and validate the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = load_yaml(path)?;
        Self::from_yaml(&yaml)
    }

    /// Parse the `bridge:` section of an already loaded document
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let section = match yaml {
            Value::Null => None,
            Value::Mapping(map) => map.get(SECTION).cloned(),
            _ => return Err(ConfigError::invalid("root", "configuration must be a mapping")),
        };

        let config: BridgeConfig = match section {
            None | Some(Value::Null) => BridgeConfig::default(),
            Some(section) => serde_yaml::from_value(section)
                .map_err(|e| ConfigError::invalid(SECTION, e.to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.qos > 2 {
            return Err(ConfigError::invalid(
                "qos",
                format!("{} is not one of 0, 1, 2", self.qos),
            ));
        }
        check_topic("discovery_prefix", &self.discovery_prefix)?;
        check_topic("topic_root", &self.topic_root)?;
        if self.hub_id.trim().is_empty() {
            return Err(ConfigError::invalid("hub_id", "must not be empty"));
        }
        Ok(())
    }

    /// Settings handed to the translation engine
    pub fn translation_settings(&self) -> TranslationSettings {
        TranslationSettings {
            hub_id: self.hub_id.clone(),
            topic_root: self.topic_root.clone(),
            qos: self.qos,
            availability: self.availability,
        }
    }

    /// Origin block, with `fallback_version` when none is configured
    pub fn origin_info(&self, fallback_version: &str) -> OriginInfo {
        OriginInfo {
            name: self.origin.name.clone(),
            sw_version: self
                .origin
                .sw_version
                .clone()
                .or_else(|| Some(fallback_version.to_string())),
            support_url: self.origin.support_url.clone(),
        }
    }
}

/// Publish topics must be non-empty and free of MQTT wildcards
fn check_topic(key: &str, topic: &str) -> ConfigResult<()> {
    if topic.trim().trim_matches('/').is_empty() {
        return Err(ConfigError::invalid(key, "must not be empty"));
    }
    if topic.contains(['+', '#']) {
        return Err(ConfigError::invalid(
            key,
            format!("'{topic}' contains an MQTT wildcard"),
        ));
    }
    Ok(())
}
