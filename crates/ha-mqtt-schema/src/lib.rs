//! Home Assistant MQTT discovery schemas
//!
//! This crate holds the component configuration shapes Home Assistant accepts
//! over MQTT discovery, the static platform catalog describing them, and the
//! device registry block that ties components to one physical device.
//!
//! Everything here is data. The only behaviour is validation of a populated
//! component against the catalog and rendering to discovery JSON.

mod catalog;
mod components;
mod device;
mod error;

pub use catalog::{schema, Platform, PlatformSchema, CATALOG, HVAC_MODES};
pub use components::{
    Availability, AvailabilityMode, BinarySensorComponent, ClimateComponent, ComponentConfig,
    EntityCategory, EntityCommon, HumidifierComponent, SelectComponent, SensorComponent,
    StateClass, SwitchComponent,
};
pub use device::{format_mac, DeviceConnection, DeviceInfo, OriginInfo, CONNECTION_NETWORK_MAC};
pub use error::SchemaError;
