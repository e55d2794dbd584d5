//! TOML-based planner configuration.
//!
//! Holds the static inputs of the placement engine:
//! - Placement rules (buffer, day window, quotas, preference orders)
//! - Teaching table
//! - Task catalog
//! - Manual pins
//! - Content library
//!
//! Configuration is stored at `~/.config/weekplan/config.toml`. Every section
//! falls back to the built-in tables, so an empty file plans the default week.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::default_config_path;
use crate::error::{ConfigError, Result};
use crate::scheduler::PlacementRules;
use crate::schedule::{
    default_content_library, default_pins, default_task_catalog, ContentCategory, ManualPin,
    TaskSpec, TeachingTable,
};

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/weekplan/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub rules: PlacementRules,
    #[serde(default)]
    pub teaching: TeachingTable,
    /// Placement order follows declaration order.
    #[serde(default = "default_task_catalog")]
    pub tasks: Vec<TaskSpec>,
    #[serde(default = "default_pins")]
    pub pins: Vec<ManualPin>,
    #[serde(default = "default_content_library")]
    pub content: Vec<ContentCategory>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rules: PlacementRules::default(),
            teaching: TeachingTable::default(),
            tasks: default_task_catalog(),
            pins: default_pins(),
            content: default_content_library(),
        }
    }
}

impl PlannerConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    fn parse_leaf(
        existing: &serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<serde_json::Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let parsed = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        Ok(parsed)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let parts: Vec<&str> = key.split('.').collect();
        let (leaf, parents) = match parts.split_last() {
            Some((leaf, parents)) if !leaf.is_empty() => (*leaf, parents),
            _ => return Err(unknown()),
        };

        let mut current = root;
        for part in parents {
            current = match current {
                serde_json::Value::Array(items) => {
                    let idx = part.parse::<usize>().map_err(|_| unknown())?;
                    items.get_mut(idx).ok_or_else(unknown)?
                }
                other => other.get_mut(*part).ok_or_else(unknown)?,
            };
        }

        match current {
            serde_json::Value::Array(items) => {
                let idx = leaf.parse::<usize>().map_err(|_| unknown())?;
                let slot = items.get_mut(idx).ok_or_else(unknown)?;
                *slot = Self::parse_leaf(slot, key, value)?;
            }
            serde_json::Value::Object(obj) => {
                let existing = obj.get(leaf).ok_or_else(unknown)?;
                let new_value = Self::parse_leaf(existing, key, value)?;
                obj.insert(leaf.to_string(), new_value);
            }
            _ => return Err(unknown()),
        }
        Ok(())
    }

    /// Resolve the config path: an explicit override or the default location.
    pub fn path(override_path: Option<&Path>) -> Result<PathBuf> {
        match override_path {
            Some(p) => Ok(p.to_path_buf()),
            None => default_config_path(),
        }
    }

    /// Load from `path`, writing and returning defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Persist to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    /// Array elements are addressed by index, e.g. `tasks.0.occurrences`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, keeping the existing value's type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
