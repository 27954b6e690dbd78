//! Service-to-component translation engine
//!
//! Turns one hub inclusion report into the Home Assistant MQTT discovery
//! payload for that device:
//!
//! 1. [`classify`] decides which platform(s) each service becomes
//! 2. the builders fill one component per match
//! 3. [`merge`] folds the components into a [`DiscoveryPayload`] keyed by
//!    unique_id, sharing one device block
//!
//! Translation is pure and total. Services that cannot be translated are
//! skipped, odd property values fall back to platform defaults, and the
//! result is always a (possibly empty) payload.
//!
//! # Example
//!
//! ```ignore
//! use ha_discovery::Translator;
//!
//! let report = ha_inclusion::parse_report(&json)?;
//! let payload = Translator::default().translate(&report);
//! for message in payload.component_messages("homeassistant")? {
//!     publisher.publish(&message).await?;
//! }
//! ```

mod builders;
mod classify;
mod identity;
mod merge;
mod messages;
mod settings;
mod templates;
mod translate;

pub use builders::{build, build_service, BuildContext};
pub use classify::{
    classify, BinaryKind, MatchBasis, MatchRole, PlatformMatch, SensorKind, ServiceKind, Target,
};
pub use identity::{topic_safe, DeviceIdentity, DeviceTopics};
pub use merge::{merge, DiscoveryPayload};
pub use messages::{DiscoveryMessage, PAYLOAD_ONLINE};
pub use settings::TranslationSettings;
pub use translate::{translate, Translator};
