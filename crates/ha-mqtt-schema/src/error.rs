//! Schema validation errors

use thiserror::Error;

/// A populated component that Home Assistant would reject
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("component has an empty unique_id")]
    EmptyUniqueId,

    #[error("{unique_id}: {template} is set without {topic}")]
    TemplateWithoutTopic {
        unique_id: String,
        template: &'static str,
        topic: &'static str,
    },

    #[error("{unique_id}: required option '{field}' is missing")]
    MissingRequired {
        unique_id: String,
        field: &'static str,
    },

    #[error("{unique_id}: device block has neither identifiers nor connections")]
    MissingDeviceLink { unique_id: String },

    #[error("{unique_id}: '{device_class}' is not a {platform} device class")]
    UnknownDeviceClass {
        unique_id: String,
        platform: &'static str,
        device_class: String,
    },

    #[error("{unique_id}: invalid mode '{mode}'")]
    InvalidMode { unique_id: String, mode: String },

    #[error("{unique_id}: '{field}' out of range: {reason}")]
    OutOfRange {
        unique_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("failed to serialize component: {0}")]
    Serialize(#[from] serde_json::Error),
}
