//! Platform catalog
//!
//! Static description of every platform the bridge can emit: its Home
//! Assistant tag, whether it only reports state, the device classes Home
//! Assistant accepts for it, and which options must be set together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Home Assistant MQTT platforms supported by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Sensor,
    BinarySensor,
    Switch,
    Climate,
    Humidifier,
    Select,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Sensor,
        Platform::BinarySensor,
        Platform::Switch,
        Platform::Climate,
        Platform::Humidifier,
        Platform::Select,
    ];

    /// Platform tag as used in discovery topics and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Sensor => "sensor",
            Platform::BinarySensor => "binary_sensor",
            Platform::Switch => "switch",
            Platform::Climate => "climate",
            Platform::Humidifier => "humidifier",
            Platform::Select => "select",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownPlatform(s.to_string()))
    }
}

/// Static schema facts for one platform
#[derive(Debug)]
pub struct PlatformSchema {
    pub platform: Platform,
    /// Accepted `device_class` values; empty means the option does not exist
    pub device_classes: &'static [&'static str],
    /// `(template, topic)` pairs: a template is only valid with its topic
    pub command_pairs: &'static [(&'static str, &'static str)],
    /// Options Home Assistant refuses the component without
    pub required: &'static [&'static str],
}

impl PlatformSchema {
    pub fn accepts_device_class(&self, device_class: &str) -> bool {
        self.device_classes.contains(&device_class)
    }
}

/// Valid climate HVAC modes
pub static HVAC_MODES: &[&str] = &["auto", "off", "cool", "heat", "dry", "fan_only", "heat_cool"];

static SENSOR: PlatformSchema = PlatformSchema {
    platform: Platform::Sensor,
    device_classes: &[
        "apparent_power",
        "aqi",
        "atmospheric_pressure",
        "battery",
        "carbon_dioxide",
        "carbon_monoxide",
        "current",
        "distance",
        "duration",
        "energy",
        "frequency",
        "gas",
        "humidity",
        "illuminance",
        "irradiance",
        "moisture",
        "monetary",
        "pm25",
        "power",
        "power_factor",
        "precipitation",
        "pressure",
        "signal_strength",
        "sound_pressure",
        "speed",
        "temperature",
        "voltage",
        "volume",
        "water",
        "weight",
        "wind_direction",
        "wind_speed",
    ],
    command_pairs: &[],
    required: &["state_topic"],
};

static BINARY_SENSOR: PlatformSchema = PlatformSchema {
    platform: Platform::BinarySensor,
    device_classes: &[
        "battery",
        "cold",
        "connectivity",
        "door",
        "garage_door",
        "gas",
        "heat",
        "light",
        "lock",
        "moisture",
        "motion",
        "moving",
        "occupancy",
        "opening",
        "plug",
        "power",
        "presence",
        "problem",
        "running",
        "safety",
        "smoke",
        "sound",
        "tamper",
        "vibration",
        "window",
    ],
    command_pairs: &[],
    required: &["state_topic"],
};

static SWITCH: PlatformSchema = PlatformSchema {
    platform: Platform::Switch,
    device_classes: &["outlet", "switch"],
    command_pairs: &[("command_template", "command_topic")],
    required: &["command_topic"],
};

static CLIMATE: PlatformSchema = PlatformSchema {
    platform: Platform::Climate,
    device_classes: &[],
    command_pairs: &[
        ("fan_mode_command_template", "fan_mode_command_topic"),
        ("mode_command_template", "mode_command_topic"),
        ("power_command_template", "power_command_topic"),
        ("preset_mode_command_template", "preset_mode_command_topic"),
        (
            "swing_horizontal_mode_command_template",
            "swing_horizontal_mode_command_topic",
        ),
        ("swing_mode_command_template", "swing_mode_command_topic"),
        (
            "target_humidity_command_template",
            "target_humidity_command_topic",
        ),
        ("temperature_command_template", "temperature_command_topic"),
        (
            "temperature_high_command_template",
            "temperature_high_command_topic",
        ),
        (
            "temperature_low_command_template",
            "temperature_low_command_topic",
        ),
    ],
    required: &[],
};

static HUMIDIFIER: PlatformSchema = PlatformSchema {
    platform: Platform::Humidifier,
    device_classes: &["humidifier", "dehumidifier"],
    command_pairs: &[
        ("command_template", "command_topic"),
        (
            "target_humidity_command_template",
            "target_humidity_command_topic",
        ),
        ("mode_command_template", "mode_command_topic"),
    ],
    required: &["command_topic", "target_humidity_command_topic"],
};

static SELECT: PlatformSchema = PlatformSchema {
    platform: Platform::Select,
    device_classes: &[],
    command_pairs: &[("command_template", "command_topic")],
    required: &["command_topic", "options"],
};

/// Every supported platform, in `Platform::ALL` order
pub static CATALOG: [&PlatformSchema; 6] =
    [&SENSOR, &BINARY_SENSOR, &SWITCH, &CLIMATE, &HUMIDIFIER, &SELECT];

/// Look up the schema for a platform
pub fn schema(platform: Platform) -> &'static PlatformSchema {
    match platform {
        Platform::Sensor => &SENSOR,
        Platform::BinarySensor => &BINARY_SENSOR,
        Platform::Switch => &SWITCH,
        Platform::Climate => &CLIMATE,
        Platform::Humidifier => &HUMIDIFIER,
        Platform::Select => &SELECT,
    }
}
