//! Inclusion reports, services and interfaces

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::props::Props;

/// Message type of the hub event carrying an inclusion report
pub const INCLUSION_REPORT_EVENT: &str = "evt.thing.inclusion_report";

/// Direction of a service interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceType {
    /// Messages the service accepts (commands)
    In,
    /// Messages the service emits (reports, events)
    Out,
}

/// One command or report message a service understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub intf_t: InterfaceType,
    pub msg_t: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_t: Option<String>,
}

impl Interface {
    pub fn command(msg_t: impl Into<String>, val_t: impl Into<String>) -> Self {
        Self {
            intf_t: InterfaceType::In,
            msg_t: msg_t.into(),
            val_t: Some(val_t.into()),
        }
    }

    pub fn report(msg_t: impl Into<String>, val_t: impl Into<String>) -> Self {
        Self {
            intf_t: InterfaceType::Out,
            msg_t: msg_t.into(),
            val_t: Some(val_t.into()),
        }
    }
}

/// One functional capability of a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Hub service type, e.g. `sensor_direct` or `thermostat`
    pub name: String,

    /// Hub-wide service address, used as the entity's stable id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub props: Props,

    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<Interface>,
}

fn default_enabled() -> bool {
    true
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Service {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Some(address.into()),
            enabled: true,
            props: Props::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// The service address, or `None` when missing or blank
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// True when the service accepts the given command message
    pub fn accepts_command(&self, msg_t: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.intf_t == InterfaceType::In && i.msg_t == msg_t)
    }

    /// Value type of the given command message, when declared
    pub fn command_value_type(&self, msg_t: &str) -> Option<&str> {
        self.interfaces
            .iter()
            .find(|i| i.intf_t == InterfaceType::In && i.msg_t == msg_t)
            .and_then(|i| i.val_t.as_deref())
    }

    /// True when the service emits the given report message
    pub fn reports(&self, msg_t: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.intf_t == InterfaceType::Out && i.msg_t == msg_t)
    }
}

/// Description of one physical device as discovered by the hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclusionReport {
    /// Stable device address on the hub network
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_ver: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_ver: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
}

impl InclusionReport {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            product_name: None,
            product_hash: None,
            manufacturer_id: None,
            product_id: None,
            hw_ver: None,
            sw_ver: None,
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    fn validate(self) -> ReportResult<Self> {
        if self.address.trim().is_empty() {
            return Err(ReportError::MissingDeviceAddress);
        }
        Ok(self)
    }
}

/// Hub message wrapping a report
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    msg_type: String,
    val: InclusionReport,
}

/// Accepted input shapes, tried in order
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReportSource {
    Envelope(Envelope),
    Single(InclusionReport),
    Many(Vec<InclusionReport>),
}

/// Parse a single inclusion report (bare or wrapped in a hub envelope)
pub fn parse_report(json: &str) -> ReportResult<InclusionReport> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let report = match value.get("val") {
        Some(_) => unwrap_envelope(serde_json::from_value(value)?)?,
        None => serde_json::from_value(value)?,
    };
    report.validate()
}

/// Parse one report, a list of reports, or a hub envelope
///
/// The whole input is rejected when any report in it lacks a device address.
pub fn parse_reports(json: &str) -> ReportResult<Vec<InclusionReport>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    // Untagged errors are opaque, so retry the explicit shape for a useful message
    let source = match serde_json::from_value::<ReportSource>(value.clone()) {
        Ok(source) => source,
        Err(_) if value.is_array() => {
            ReportSource::Many(serde_json::from_value(value)?)
        }
        Err(_) => ReportSource::Single(serde_json::from_value(value)?),
    };

    let reports = match source {
        ReportSource::Envelope(envelope) => vec![unwrap_envelope(envelope)?],
        ReportSource::Single(report) => vec![report],
        ReportSource::Many(reports) => reports,
    };

    let reports = reports
        .into_iter()
        .map(InclusionReport::validate)
        .collect::<ReportResult<Vec<_>>>()?;

    debug!("Parsed {} inclusion report(s)", reports.len());
    Ok(reports)
}

fn unwrap_envelope(envelope: Envelope) -> ReportResult<InclusionReport> {
    if envelope.msg_type != INCLUSION_REPORT_EVENT {
        return Err(ReportError::UnexpectedMessageType {
            msg_type: envelope.msg_type,
            expected: INCLUSION_REPORT_EVENT,
        });
    }
    Ok(envelope.val)
}
