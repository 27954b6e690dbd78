//! Bridge configuration
//!
//! The configuration is a YAML file whose `bridge:` section deserializes into
//! [`BridgeConfig`]. Three custom tags are resolved while loading:
//!
//! - `!include path` - Include another YAML file
//! - `!secret key` - Substitute from `secrets.yaml` beside the file
//! - `!env_var VAR [fallback]` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use ha_config::BridgeConfig;
//!
//! let config = BridgeConfig::load("/etc/fimp-ha/bridge.yaml")?;
//! let translator = ha_discovery::Translator::new(config.translation_settings());
//! ```

mod bridge_config;
mod error;
mod loader;
mod secrets;

pub use bridge_config::{BridgeConfig, DiscoveryMode, OriginConfig, SECTION};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_yaml, YamlLoader};
pub use secrets::{Secrets, SECRETS_FILE};

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
