//! Device registry block
//!
//! The `device` object every discovered component carries so Home Assistant
//! groups it under one device registry entry, plus the `origin` block of
//! device-based discovery.

use serde::{Deserialize, Serialize};

pub const CONNECTION_NETWORK_MAC: &str = "mac";

/// A device connection `[type, id]` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceConnection(pub String, pub String);

impl DeviceConnection {
    pub fn new(conn_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self(conn_type.into(), id.into())
    }

    pub fn connection_type(&self) -> &str {
        &self.0
    }

    pub fn id(&self) -> &str {
        &self.1
    }

    /// Create a connection with MAC addresses lowercased and colon-separated
    pub fn normalized(conn_type: impl Into<String>, id: impl Into<String>) -> Self {
        let ct = conn_type.into();
        let raw_id = id.into();
        let id = if ct == CONNECTION_NETWORK_MAC {
            format_mac(&raw_id)
        } else {
            raw_id
        };
        Self(ct, id)
    }
}

/// Format a MAC address the way Home Assistant stores it
///
/// Accepts colon, dash, dot (Cisco) or unseparated forms. Anything else is
/// returned unchanged.
pub fn format_mac(mac: &str) -> String {
    let separators = |sep: char| mac.chars().filter(|c| *c == sep).count();

    if mac.len() == 17 && separators(':') == 5 {
        return mac.to_lowercase();
    }

    let stripped = if mac.len() == 17 && separators('-') == 5 {
        mac.replace('-', "")
    } else if mac.len() == 14 && separators('.') == 2 {
        mac.replace('.', "")
    } else if mac.len() == 12 && mac.chars().all(|c| c.is_ascii_hexdigit()) {
        mac.to_string()
    } else {
        return mac.to_string();
    };

    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return mac.to_string();
    }

    stripped
        .to_lowercase()
        .chars()
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}

/// Device registry information attached to every component of a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<DeviceConnection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_area: Option<String>,

    /// Identifier of the hub routing messages for this device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_device: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_url: Option<String>,
}

impl DeviceInfo {
    /// Home Assistant needs identifiers or connections to create the registry entry
    pub fn is_linkable(&self) -> bool {
        !self.identifiers.is_empty() || !self.connections.is_empty()
    }
}

/// Origin block of device-based discovery (`o`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
}
