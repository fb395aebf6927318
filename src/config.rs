//! # Configuration
//!
//! Runtime knobs for the starred-entities actor. Values come from code, from a
//! deserialized document (any serde format), or from the environment via
//! [`StarredConfig::from_env`].
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `STARRED_BUFFER_SIZE` | `buffer_size` | `32` |
//! | `STARRED_TOGGLE_STRATEGY` | `toggle_strategy` (`cached` or `fresh`) | `cached` |
//! | `STARRED_STORAGE_PATH` | `storage_path` | unset (memory storage) |

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_BUFFER_SIZE: &str = "STARRED_BUFFER_SIZE";
pub const ENV_TOGGLE_STRATEGY: &str = "STARRED_TOGGLE_STRATEGY";
pub const ENV_STORAGE_PATH: &str = "STARRED_STORAGE_PATH";

const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// How `toggle_starred` decides whether an entity is currently starred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStrategy {
    /// Decide against the actor's in-memory set.
    #[default]
    Cached,
    /// Reload the set from storage before deciding. Picks up writes made by
    /// other processes sharing the same storage.
    Fresh,
}

impl FromStr for ToggleStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cached" => Ok(Self::Cached),
            "fresh" => Ok(Self::Fresh),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_TOGGLE_STRATEGY,
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for [`StarredSystem`](crate::lifecycle::StarredSystem) and the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarredConfig {
    /// Capacity of the request channel. Callers wait when it is full.
    pub buffer_size: usize,
    pub toggle_strategy: ToggleStrategy,
    /// JSON file holding the starred set. `None` keeps the set in memory.
    pub storage_path: Option<PathBuf>,
}

impl Default for StarredConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            toggle_strategy: ToggleStrategy::default(),
            storage_path: None,
        }
    }
}

impl StarredConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BUFFER_SIZE) {
            config.buffer_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_BUFFER_SIZE,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(ENV_TOGGLE_STRATEGY) {
            config.toggle_strategy = raw.parse()?;
        }

        if let Some(raw) = lookup(ENV_STORAGE_PATH).filter(|raw| !raw.trim().is_empty()) {
            config.storage_path = Some(PathBuf::from(raw));
        }

        Ok(config)
    }

    pub fn with_toggle_strategy(mut self, toggle_strategy: ToggleStrategy) -> Self {
        self.toggle_strategy = toggle_strategy;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = StarredConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StarredConfig::default());
        assert_eq!(config.buffer_size, 32);
        assert_eq!(config.toggle_strategy, ToggleStrategy::Cached);
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_reads_all_values() {
        let config = StarredConfig::from_lookup(lookup(&[
            (ENV_BUFFER_SIZE, "8"),
            (ENV_TOGGLE_STRATEGY, "Fresh"),
            (ENV_STORAGE_PATH, "/tmp/starred.json"),
        ]))
        .unwrap();

        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.toggle_strategy, ToggleStrategy::Fresh);
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/starred.json")));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = StarredConfig::from_lookup(lookup(&[(ENV_BUFFER_SIZE, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_BUFFER_SIZE,
                value: "0".to_string()
            }
        );

        let err =
            StarredConfig::from_lookup(lookup(&[(ENV_TOGGLE_STRATEGY, "sometimes")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_TOGGLE_STRATEGY));
    }

    #[test]
    fn test_deserialize_with_partial_fields() {
        let config: StarredConfig = serde_json::from_str(r#"{"toggle_strategy": "fresh"}"#).unwrap();
        assert_eq!(config.toggle_strategy, ToggleStrategy::Fresh);
        assert_eq!(config.buffer_size, 32);
    }
}
