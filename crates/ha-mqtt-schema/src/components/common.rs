//! Options shared by every MQTT platform

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::device::DeviceInfo;

/// Entity category shown in the device page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// Which availability entries must report online
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    All,
    Any,
    #[default]
    Latest,
}

/// One entry of the `availability` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub topic: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_available: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_not_available: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,
}

/// Options every component has, flattened into the platform record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityCommon {
    /// Cross-system join key; the hub service address
    pub unique_id: String,

    /// Entity name; absent means Home Assistant uses the device name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_picture: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_by_default: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Must not be combined with `availability`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<Availability>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_mode: Option<AvailabilityMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_available: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_not_available: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_attributes_topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_attributes_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<u8>,

    /// Shared by every component of the same device
    pub device: Arc<DeviceInfo>,
}

impl EntityCommon {
    pub fn new(unique_id: impl Into<String>, device: Arc<DeviceInfo>) -> Self {
        Self {
            unique_id: unique_id.into(),
            device,
            ..Default::default()
        }
    }
}
