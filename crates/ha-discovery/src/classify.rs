//! Service classifier
//!
//! Decides which platform(s) a hub service becomes. The decision is driven by
//! the declared service type and, where that is ambiguous, by the service's
//! properties and interfaces.

use ha_inclusion::Service;
use ha_mqtt_schema::{Platform, StateClass};
use tracing::{debug, trace};

/// Hub service types the bridge knows how to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Untyped sensor; the kind of reading is inferred from its units
    Sensor,
    SensorDirect,
    SensorTemp,
    SensorHumid,
    SensorLumin,
    SensorPower,
    SensorWind,
    SensorPresence,
    SensorContact,
    Battery,
    MeterElec,
    OutBinSwitch,
    Thermostat,
    HumidityControl,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 14] = [
        ServiceKind::Sensor,
        ServiceKind::SensorDirect,
        ServiceKind::SensorTemp,
        ServiceKind::SensorHumid,
        ServiceKind::SensorLumin,
        ServiceKind::SensorPower,
        ServiceKind::SensorWind,
        ServiceKind::SensorPresence,
        ServiceKind::SensorContact,
        ServiceKind::Battery,
        ServiceKind::MeterElec,
        ServiceKind::OutBinSwitch,
        ServiceKind::Thermostat,
        ServiceKind::HumidityControl,
    ];

    /// Canonical hub name of the service type
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Sensor => "sensor",
            ServiceKind::SensorDirect => "sensor_direct",
            ServiceKind::SensorTemp => "sensor_temp",
            ServiceKind::SensorHumid => "sensor_humid",
            ServiceKind::SensorLumin => "sensor_lumin",
            ServiceKind::SensorPower => "sensor_power",
            ServiceKind::SensorWind => "sensor_wind",
            ServiceKind::SensorPresence => "sensor_presence",
            ServiceKind::SensorContact => "sensor_contact",
            ServiceKind::Battery => "battery",
            ServiceKind::MeterElec => "meter_elec",
            ServiceKind::OutBinSwitch => "out_bin_switch",
            ServiceKind::Thermostat => "thermostat",
            ServiceKind::HumidityControl => "humidity_control",
        }
    }

    /// Parse a hub service name; `-` and `_` are interchangeable
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.name() == normalized)
    }
}

/// Flavour of a numeric sensor; selects device class, units and state field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    WindDirection,
    Temperature,
    Humidity,
    Illuminance,
    Power,
    WindSpeed,
    Battery,
    Energy,
    /// Unknown reading; no device class, any unit
    Generic,
}

impl SensorKind {
    pub fn device_class(&self) -> Option<&'static str> {
        match self {
            SensorKind::WindDirection => Some("wind_direction"),
            SensorKind::Temperature => Some("temperature"),
            SensorKind::Humidity => Some("humidity"),
            SensorKind::Illuminance => Some("illuminance"),
            SensorKind::Power => Some("power"),
            SensorKind::WindSpeed => Some("wind_speed"),
            SensorKind::Battery => Some("battery"),
            SensorKind::Energy => Some("energy"),
            SensorKind::Generic => None,
        }
    }

    /// Unit used when the service declares none, or one outside `accepted_units`
    pub fn default_unit(&self) -> Option<&'static str> {
        match self {
            SensorKind::WindDirection => Some("°"),
            SensorKind::Temperature => Some("°C"),
            SensorKind::Humidity | SensorKind::Battery => Some("%"),
            SensorKind::Illuminance => Some("lx"),
            SensorKind::Power => Some("W"),
            SensorKind::WindSpeed => Some("m/s"),
            SensorKind::Energy => Some("kWh"),
            SensorKind::Generic => None,
        }
    }

    /// Units Home Assistant accepts for the device class; empty accepts any
    pub fn accepted_units(&self) -> &'static [&'static str] {
        match self {
            SensorKind::WindDirection => &["°"],
            SensorKind::Temperature => &["°C", "°F", "K"],
            SensorKind::Humidity | SensorKind::Battery => &["%"],
            SensorKind::Illuminance => &["lx"],
            SensorKind::Power => &["mW", "W", "kW", "MW"],
            SensorKind::WindSpeed => &["m/s", "km/h", "mph", "kn", "ft/s", "Beaufort"],
            SensorKind::Energy => &["Wh", "kWh", "MWh"],
            SensorKind::Generic => &[],
        }
    }

    pub fn state_class(&self) -> Option<StateClass> {
        match self {
            SensorKind::WindDirection | SensorKind::Generic => None,
            SensorKind::Energy => Some(StateClass::TotalIncreasing),
            _ => Some(StateClass::Measurement),
        }
    }

    /// Field of the service's state object carrying the reading
    pub fn field(&self) -> &'static str {
        match self {
            SensorKind::Battery => "lvl",
            SensorKind::Energy => "meter",
            _ => "sensor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorKind::WindDirection => "Wind direction",
            SensorKind::Temperature => "Temperature",
            SensorKind::Humidity => "Humidity",
            SensorKind::Illuminance => "Illuminance",
            SensorKind::Power => "Power",
            SensorKind::WindSpeed => "Wind speed",
            SensorKind::Battery => "Battery",
            SensorKind::Energy => "Energy",
            SensorKind::Generic => "Sensor",
        }
    }

    /// Guess the kind of an untyped sensor from one (normalized) unit
    fn from_unit(unit: &str) -> Self {
        match unit {
            "°" => SensorKind::WindDirection,
            "°C" | "°F" | "K" => SensorKind::Temperature,
            "%" => SensorKind::Humidity,
            "lx" => SensorKind::Illuminance,
            "W" | "kW" => SensorKind::Power,
            "Wh" | "kWh" | "MWh" => SensorKind::Energy,
            "m/s" | "km/h" => SensorKind::WindSpeed,
            _ => SensorKind::Generic,
        }
    }
}

/// Map hub unit spellings onto Home Assistant's
pub(crate) fn normalize_unit(raw: &str) -> &str {
    match raw.trim() {
        "°" | "deg" | "degree" | "degrees" => "°",
        "C" | "°C" | "celsius" => "°C",
        "F" | "°F" | "fahrenheit" => "°F",
        "lux" | "Lux" | "lx" => "lx",
        "w" | "W" => "W",
        "kwh" | "kWh" | "KWh" => "kWh",
        other => other,
    }
}

/// Flavour of an on/off sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    Presence,
    Contact,
    /// A switch output that cannot be commanded
    Power,
}

impl BinaryKind {
    pub fn device_class(&self) -> &'static str {
        match self {
            BinaryKind::Presence => "occupancy",
            BinaryKind::Contact => "opening",
            BinaryKind::Power => "power",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            BinaryKind::Presence => "presence",
            BinaryKind::Contact => "open",
            BinaryKind::Power => "binary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BinaryKind::Presence => "Presence",
            BinaryKind::Contact => "Contact",
            BinaryKind::Power => "Power",
        }
    }
}

/// The builder a match selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Sensor(SensorKind),
    BinarySensor(BinaryKind),
    Switch,
    Climate,
    /// Auxiliary fan mode entity of a thermostat with a fan
    FanModeSelect,
    Humidifier,
}

impl Target {
    pub fn platform(&self) -> Platform {
        match self {
            Target::Sensor(_) => Platform::Sensor,
            Target::BinarySensor(_) => Platform::BinarySensor,
            Target::Switch => Platform::Switch,
            Target::Climate => Platform::Climate,
            Target::FanModeSelect => Platform::Select,
            Target::Humidifier => Platform::Humidifier,
        }
    }
}

/// Whether a match is the service's main entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRole {
    /// unique_id is the service address
    Primary,
    /// Extra entity of a composite service, unique_id derived from the address
    Auxiliary,
}

/// How the match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchBasis {
    /// The service type names the platform directly
    Declared,
    /// Picked by inspecting properties or interfaces
    Inferred,
}

/// One platform a service translates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformMatch {
    pub target: Target,
    pub role: MatchRole,
    pub basis: MatchBasis,
}

impl PlatformMatch {
    fn declared(target: Target) -> Self {
        Self {
            target,
            role: MatchRole::Primary,
            basis: MatchBasis::Declared,
        }
    }

    fn inferred(target: Target) -> Self {
        Self {
            target,
            role: MatchRole::Primary,
            basis: MatchBasis::Inferred,
        }
    }

    fn auxiliary(target: Target) -> Self {
        Self {
            target,
            role: MatchRole::Auxiliary,
            basis: MatchBasis::Inferred,
        }
    }

    pub fn platform(&self) -> Platform {
        self.target.platform()
    }
}

/// Hub command a switch must accept to be controllable
pub(crate) const CMD_BINARY_SET: &str = "cmd.binary.set";

/// Classify one service. An empty result means the service is skipped.
pub fn classify(service: &Service) -> Vec<PlatformMatch> {
    let Some(address) = service.address() else {
        trace!("Skipping '{}' service without address", service.name);
        return Vec::new();
    };

    if !service.enabled {
        debug!("Skipping disabled service {}", address);
        return Vec::new();
    }

    let Some(kind) = ServiceKind::from_name(&service.name) else {
        trace!("No platform for service type '{}' ({})", service.name, address);
        return Vec::new();
    };

    let matches = match kind {
        ServiceKind::Sensor => {
            let kind = service
                .props
                .supported_units()
                .iter()
                .map(|u| normalize_unit(u))
                .find(|u| !u.is_empty())
                .map(SensorKind::from_unit)
                .unwrap_or(SensorKind::Generic);
            vec![PlatformMatch::inferred(Target::Sensor(kind))]
        }
        ServiceKind::SensorDirect => sensor(SensorKind::WindDirection),
        ServiceKind::SensorTemp => sensor(SensorKind::Temperature),
        ServiceKind::SensorHumid => sensor(SensorKind::Humidity),
        ServiceKind::SensorLumin => sensor(SensorKind::Illuminance),
        ServiceKind::SensorPower => sensor(SensorKind::Power),
        ServiceKind::SensorWind => sensor(SensorKind::WindSpeed),
        ServiceKind::Battery => sensor(SensorKind::Battery),
        ServiceKind::MeterElec => sensor(SensorKind::Energy),
        ServiceKind::SensorPresence => {
            vec![PlatformMatch::declared(Target::BinarySensor(BinaryKind::Presence))]
        }
        ServiceKind::SensorContact => {
            vec![PlatformMatch::declared(Target::BinarySensor(BinaryKind::Contact))]
        }
        ServiceKind::OutBinSwitch => {
            if service.accepts_command(CMD_BINARY_SET) {
                vec![PlatformMatch::declared(Target::Switch)]
            } else {
                vec![PlatformMatch::inferred(Target::BinarySensor(BinaryKind::Power))]
            }
        }
        ServiceKind::Thermostat => {
            let mut matches = vec![PlatformMatch::declared(Target::Climate)];
            if has_entries(service.props.supported_fan_modes()) {
                matches.push(PlatformMatch::auxiliary(Target::FanModeSelect));
            }
            matches
        }
        ServiceKind::HumidityControl => vec![PlatformMatch::declared(Target::Humidifier)],
    };

    debug!(
        "Service {} ({}) -> {:?}",
        address,
        kind.name(),
        matches.iter().map(|m| m.platform().as_str()).collect::<Vec<_>>()
    );
    matches
}

fn sensor(kind: SensorKind) -> Vec<PlatformMatch> {
    vec![PlatformMatch::declared(Target::Sensor(kind))]
}

fn has_entries(list: &[String]) -> bool {
    list.iter().any(|s| !s.trim().is_empty())
}
