//! TOML-based application configuration.
//!
//! Stores the countdown settings:
//! - Begin and end dates (UTC arrays or `YYYY-MM-DD` strings)
//! - Time zone applied to string dates
//! - Panel position and refresh period for the host
//! - Label templates
//!
//! Configuration is stored at `~/.config/deadline-timer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::countdown::{LabelTemplates, TimeWindow};
use crate::dates::{DateSpec, DateZone};
use crate::error::{ConfigError, CoreError, Result};

/// Where the host places the indicator in its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPosition {
    Left,
    Center,
    #[default]
    Right,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/deadline-timer/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<DateSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateSpec>,
    /// Zone for `YYYY-MM-DD` dates. UTC arrays ignore it.
    #[serde(default)]
    pub date_zone: DateZone,
    /// Accept dates given in reverse order by swapping them.
    #[serde(default)]
    pub swap_reversed: bool,
    #[serde(default)]
    pub bar_position: BarPosition,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default)]
    pub labels: LabelTemplates,
}

fn default_refresh_secs() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            begin: None,
            end: None,
            date_zone: DateZone::default(),
            swap_reversed: false,
            bar_position: BarPosition::default(),
            refresh_secs: default_refresh_secs(),
            labels: LabelTemplates::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::MissingKey("config key is empty".into()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Parse a date given on the command line: a JSON array of five numbers
    /// or a `YYYY-MM-DD` string.
    fn parse_date_value(key: &str, value: &str) -> Result<DateSpec, ConfigError> {
        let trimmed = value.trim();
        let spec = if trimmed.starts_with('[') {
            serde_json::from_str::<[i32; 5]>(trimmed)
                .map(DateSpec::Utc)
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?
        } else {
            DateSpec::Text(trimmed.to_string())
        };
        spec.resolve(DateZone::Utc)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(spec)
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// `begin` and `end` accept either a `[y, m, d, h, min]` array or a
    /// `YYYY-MM-DD` string, even while unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "begin" => self.begin = Some(Self::parse_date_value(key, value)?),
            "end" => self.end = Some(Self::parse_date_value(key, value)?),
            _ => {
                let mut json = serde_json::to_value(&*self)?;
                Self::set_json_value_by_path(&mut json, key, value)?;
                *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Resolve the configured dates into a window.
    ///
    /// # Errors
    ///
    /// Missing dates, unparsable dates, and an empty or (unless
    /// `swap_reversed` is set) reversed window are errors.
    pub fn window(&self) -> Result<TimeWindow> {
        let begin = self
            .begin
            .as_ref()
            .ok_or_else(|| ConfigError::MissingKey("begin".into()))?
            .resolve(self.date_zone)?;
        let end = self
            .end
            .as_ref()
            .ok_or_else(|| ConfigError::MissingKey("end".into()))?
            .resolve(self.date_zone)?;

        let window = if self.swap_reversed {
            TimeWindow::from_instants(begin, end)?
        } else {
            TimeWindow::new(begin, end)?
        };
        tracing::debug!(begin = window.begin(), end = window.end(), "resolved window");
        Ok(window)
    }

    /// Window for the evaluator: any configuration problem becomes `None`.
    pub fn evaluable_window(&self) -> Option<TimeWindow> {
        match self.window() {
            Ok(window) => Some(window),
            Err(CoreError::Config(ConfigError::MissingKey(key))) => {
                tracing::debug!(%key, "countdown date not configured");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "invalid countdown window");
                None
            }
        }
    }
}
