//! YAML loading with custom tags
//!
//! - `!include path` - replace the node with another YAML file, resolved
//!   relative to the including file
//! - `!secret key` - substitute from `secrets.yaml` beside the main file
//! - `!env_var NAME [fallback]` - substitute an environment variable

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub struct YamlLoader {
    base_dir: PathBuf,
    secrets: Secrets,
    /// Files currently being loaded, outermost first
    include_stack: Vec<PathBuf>,
}

impl YamlLoader {
    /// Loader resolving relative paths and `secrets.yaml` against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let base_dir = base_dir.into();
        let secrets = Secrets::load(&base_dir)?;
        Ok(Self::with_secrets(base_dir, secrets))
    }

    pub fn with_secrets(base_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            base_dir: base_dir.into(),
            secrets,
            include_stack: Vec::new(),
        }
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve(path.as_ref());
        if self.include_stack.contains(&path) {
            return Err(ConfigError::CircularInclude { path });
        }
        debug!("Loading YAML file {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.include_stack.push(path.clone());
        let result = self.load_str(&content, &path);
        self.include_stack.pop();
        result
    }

    /// Parse `content` as if it were read from `origin`
    pub fn load_str(&mut self, content: &str, origin: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: origin.to_path_buf(),
            source: e,
        })?;
        self.process(value, origin)
    }

    fn process(&mut self, value: Value, origin: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged, origin),
            Value::Mapping(map) => {
                let mut out = serde_yaml::Mapping::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k, self.process(v, origin)?);
                }
                Ok(Value::Mapping(out))
            }
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.process(v, origin))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            other => Ok(other),
        }
    }

    fn process_tagged(&mut self, tagged: TaggedValue, origin: &Path) -> ConfigResult<Value> {
        trace!("Processing tag {} in {:?}", tagged.tag, origin);

        if tagged.tag == "include" {
            let path = self.include_path(&tagged.value, origin)?;
            self.load_file(path)
        } else if tagged.tag == "secret" {
            let key = scalar_arg("!secret", &tagged.value)?;
            Ok(Value::String(self.secrets.get(&key)?.to_string()))
        } else if tagged.tag == "env_var" {
            let arg = scalar_arg("!env_var", &tagged.value)?;
            env_var(&arg).map(Value::String)
        } else {
            // Tags we do not own are kept for the consumer
            let value = self.process(tagged.value, origin)?;
            Ok(Value::Tagged(Box::new(TaggedValue {
                tag: tagged.tag,
                value,
            })))
        }
    }

    fn include_path(&self, value: &Value, origin: &Path) -> ConfigResult<PathBuf> {
        let raw = match value {
            Value::String(s) if !s.trim().is_empty() => s.trim(),
            other => {
                return Err(ConfigError::InvalidIncludePath {
                    path: format!("{other:?}"),
                    reason: "path must be a non-empty string".to_string(),
                })
            }
        };

        let raw = Path::new(raw);
        if raw.is_absolute() {
            return Ok(raw.to_path_buf());
        }
        let dir = origin
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&self.base_dir);
        Ok(dir.join(raw))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn scalar_arg(tag: &str, value: &Value) -> ConfigResult<String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ConfigError::invalid(tag, "argument must be a scalar")),
    }
}

/// `NAME` or `NAME fallback`
fn env_var(arg: &str) -> ConfigResult<String> {
    let (name, fallback) = match arg.split_once(char::is_whitespace) {
        Some((name, fallback)) => (name, Some(fallback.trim())),
        None => (arg, None),
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => {
            debug!("{} not set, using fallback", name);
            Ok(fallback.to_string())
        }
        (Err(_), None) => Err(ConfigError::EnvVarNotFound {
            var: name.to_string(),
        }),
    }
}

/// Load `file` with every tag resolved; the directory holding it is the base
pub fn load_yaml(file: impl AsRef<Path>) -> ConfigResult<Value> {
    let file = file.as_ref();
    let base_dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut loader = YamlLoader::new(base_dir)?;
    loader.load_file(file.file_name().map(Path::new).unwrap_or(file))
}
