//! `select` platform

use serde::Serialize;

use super::common::EntityCommon;

/// Pick one option out of a fixed list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectComponent {
    #[serde(flatten)]
    pub common: EntityCommon,

    pub command_topic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_template: Option<String>,

    pub options: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain: Option<bool>,
}
