//! `secrets.yaml` lookup for `!secret` tags

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up beside the configuration file
pub const SECRETS_FILE: &str = "secrets.yaml";

/// Secrets loaded from `secrets.yaml`
///
/// Scalar values are kept as strings. `Debug` prints the keys only.
#[derive(Clone, Default)]
pub struct Secrets {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl Secrets {
    /// Load `secrets.yaml` from `dir`; a missing file yields an empty store
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(SECRETS_FILE);
        if !path.is_file() {
            debug!("No secrets file at {:?}", path);
            return Ok(Self {
                values: HashMap::new(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        let raw: HashMap<String, serde_yaml::Value> =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.clone(),
                source: e,
            })?;

        let mut values = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Null => String::new(),
                _ => {
                    return Err(ConfigError::invalid(
                        format!("{SECRETS_FILE}: {key}"),
                        "secrets must be scalar values",
                    ))
                }
            };
            values.insert(key, value);
        }

        debug!("Loaded {} secrets from {:?}", values.len(), path);
        Ok(Self { values, path })
    }

    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Secrets")
            .field("path", &self.path)
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_secrets() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SECRETS_FILE),
            "mqtt_password: hunter2\nhub_port: 1884\ntls: true\n",
        )
        .unwrap();

        let secrets = Secrets::load(dir.path()).unwrap();
        assert_eq!(secrets.get("mqtt_password").unwrap(), "hunter2");
        assert_eq!(secrets.get("hub_port").unwrap(), "1884");
        assert_eq!(secrets.get("tls").unwrap(), "true");
        assert_eq!(secrets.len(), 3);
        assert!(secrets.contains("tls"));
    }

    #[test]
    fn test_missing_secret() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRETS_FILE), "key: value\n").unwrap();

        let secrets = Secrets::load(dir.path()).unwrap();
        assert!(matches!(
            secrets.get("nonexistent"),
            Err(ConfigError::SecretNotFound { .. })
        ));
    }

    #[test]
    fn test_no_secrets_file() {
        let dir = TempDir::new().unwrap();
        assert!(Secrets::load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_nested_secret_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRETS_FILE), "nested:\n  a: 1\n").unwrap();
        assert!(matches!(
            Secrets::load(dir.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_hides_values() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRETS_FILE), "mqtt_password: hunter2\n").unwrap();

        let printed = format!("{:?}", Secrets::load(dir.path()).unwrap());
        assert!(printed.contains("mqtt_password"));
        assert!(!printed.contains("hunter2"));
    }
}
