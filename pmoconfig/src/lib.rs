//! # PMOMusic Configuration Module
//!
//! This module provides read-mostly configuration management for PMOMusic sources:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Path-based getters and in-memory setters
//!
//! Configuration is never written back to disk. Each source crate adds its own
//! typed accessors through an extension trait (see `pmoapplemusic::AppleMusicConfigExt`).
//!
//! ## Usage
//!
//! ```no_run
//! use pmoconfig::Config;
//!
//! let config = Config::load_config("")?;
//! let level = config.get_log_min_level()?;
//! println!("log level: {}", level);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};

// Embedded defaults
const DEFAULT_CONFIG: &str = include_str!("pmomusic.yaml");

const ENV_CONFIG_DIR: &str = "PMOMUSIC_CONFIG";
const ENV_PREFIX: &str = "PMOMUSIC_CONFIG__";
const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";

/// Configuration manager for PMOMusic sources
///
/// Holds the merged YAML tree. Keys are case-insensitive (stored lower-cased).
#[derive(Debug)]
pub struct Config {
    config_dir: Option<PathBuf>,
    data: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        let data = match self.data.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self {
            config_dir: self.config_dir.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    ///
    /// 1. The provided `directory` if not empty
    /// 2. The `PMOMUSIC_CONFIG` environment variable
    /// 3. `.pmomusic` in the current directory
    /// 4. `.pmomusic` in the user's home directory
    fn find_config_dir(directory: &str) -> PathBuf {
        if !directory.is_empty() {
            return PathBuf::from(directory);
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return PathBuf::from(env_path);
        }

        let local = Path::new(".pmomusic");
        if local.exists() {
            return local.to_path_buf();
        }

        if let Some(home) = home_dir() {
            let home_config = home.join(".pmomusic");
            if home_config.exists() {
                return home_config;
            }
        }

        local.to_path_buf()
    }

    /// Loads the configuration
    ///
    /// Starts from the embedded defaults, merges `config.yaml` from the config
    /// directory when present, then applies `PMOMUSIC_CONFIG__*` overrides.
    /// A missing directory or file is not an error.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        let external = match fs::read_to_string(&config_file) {
            Ok(text) => {
                info!(config_file = %config_file.display(), "Loaded config file");
                Some(text)
            }
            Err(_) => {
                info!(config_file = %config_file.display(), "Config file not found, using embedded defaults");
                None
            }
        };

        let mut value = Self::merged_with_defaults(external.as_deref())?;
        Self::apply_env_overrides(&mut value, env::vars());

        Ok(Self {
            config_dir: Some(config_dir),
            data: Mutex::new(value),
        })
    }

    /// Builds a configuration from a YAML document merged over the defaults
    ///
    /// Environment overrides are not applied.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value = Self::merged_with_defaults(Some(yaml))?;
        Ok(Self {
            config_dir: None,
            data: Mutex::new(value),
        })
    }

    fn merged_with_defaults(external: Option<&str>) -> Result<Value> {
        let mut value = lower_keys(serde_yaml::from_str(DEFAULT_CONFIG)?);
        if let Some(text) = external {
            let external: Value = serde_yaml::from_str(text)?;
            // An empty document parses as Null
            if !external.is_null() {
                // keys are folded before merging so mixed-case sections merge deeply
                merge_yaml(&mut value, &lower_keys(external));
            }
        }
        Ok(value)
    }

    /// Returns the directory the configuration was loaded from, if any
    pub fn directory(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Sets a value at the specified path, in memory only
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys (e.g., `&["accounts", "applemusic", "user_token"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))?;
        set_value_internal(&mut data, path, value)
    }

    /// Gets a value at the specified path
    ///
    /// Returns an error if any segment of the path does not exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self
            .data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))?;
        get_value_internal(&data, path)
    }

    /// Gets a string value, `None` when absent, null or empty
    pub fn get_string(&self, path: &[&str]) -> Option<String> {
        match self.get_value(path) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Ok(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Gets an unsigned integer value, `None` when absent or not a number
    pub fn get_u64(&self, path: &[&str]) -> Option<u64> {
        match self.get_value(path) {
            Ok(Value::Number(n)) => n.as_u64(),
            Ok(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Minimum log level used to build the default tracing filter
    pub fn get_log_min_level(&self) -> Result<String> {
        Ok(self
            .get_string(&["host", "logger", "min_level"])
            .unwrap_or_else(|| DEFAULT_LOG_MIN_LEVEL.to_string()))
    }

    fn apply_env_overrides(config: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key_path: Vec<&str> = rest.split("__").collect();
            debug!(key = %key, "Applying config override from environment");
            let _ = set_value_internal(config, &key_path, convert_env_value(&value));
        }
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((first, rest)) = path.split_first() else {
        *data = value;
        return Ok(());
    };

    if data.is_null() {
        *data = Value::Mapping(Mapping::new());
    }

    let Value::Mapping(map) = data else {
        return Err(anyhow!("Current node is not a map"));
    };

    let key = Value::String(first.to_lowercase());
    if rest.is_empty() {
        map.insert(key, value);
        Ok(())
    } else {
        let entry = map.entry(key).or_insert(Value::Mapping(Mapping::new()));
        set_value_internal(entry, rest, value)
    }
}

fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
    let mut current = data;
    for (i, key) in path.iter().enumerate() {
        let Value::Mapping(map) = current else {
            return Err(anyhow!("Path {} is not a map", path[..i].join(".")));
        };
        match map.get(Value::String(key.to_lowercase())) {
            Some(next) => current = next,
            None => return Err(anyhow!("Path {} does not exist", path[..=i].join("."))),
        }
    }
    Ok(current.clone())
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn lower_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys).collect()),
        other => other,
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the default.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}
