//! TOML-based application configuration.
//!
//! Stores:
//! - The peak and low-engagement hour tables
//! - Engine options (peak table mode, display time format)
//! - The shell's cosmetic delay
//!
//! Configuration is stored at `~/.config/posttime/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::engine::{PeakTableMode, PostingTimeEngine, DEFAULT_TIME_FORMAT};
use crate::error::{ConfigError, Result};
use crate::schedule::ScheduleTables;
use crate::shell::AnalysisShell;

/// Hour tables, as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "default_weekday_peak_hours")]
    pub weekday_peak_hours: Vec<u8>,
    #[serde(default = "default_weekend_peak_hours")]
    pub weekend_peak_hours: Vec<u8>,
    #[serde(default = "default_low_engagement_hours")]
    pub low_engagement_hours: Vec<u8>,
}

/// Engine options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rank weekend instants against the weekend peak table.
    #[serde(default)]
    pub weekend_aware: bool,
    /// chrono strftime pattern for the next best time.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

/// Invocation shell options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/posttime/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

// Default functions
fn default_weekday_peak_hours() -> Vec<u8> {
    ScheduleTables::default().weekday_peak_hours().to_vec()
}
fn default_weekend_peak_hours() -> Vec<u8> {
    ScheduleTables::default().weekend_peak_hours().to_vec()
}
fn default_low_engagement_hours() -> Vec<u8> {
    ScheduleTables::default().low_engagement_hours().to_vec()
}
fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.into()
}
fn default_delay_ms() -> u64 {
    1000
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            weekday_peak_hours: default_weekday_peak_hours(),
            weekend_peak_hours: default_weekend_peak_hours(),
            low_engagement_hours: default_low_engagement_hours(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weekend_aware: false,
            time_format: default_time_format(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut *root, |node, part| node.get_mut(part)),
            None => Some(root),
        };
        let obj = parent
            .and_then(|node| node.as_object_mut())
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

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

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default config file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
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

    /// Set a config value by dot-separated key, without saving.
    ///
    /// The updated config must still build a valid engine; otherwise it is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting tables/format fail validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.build_engine()?;
        *self = updated;
        Ok(())
    }

    /// Validated schedule tables from the `[tables]` section.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the tables are empty, out of range or
    /// overlapping.
    pub fn schedule_tables(&self) -> Result<ScheduleTables> {
        Ok(ScheduleTables::new(
            &self.tables.weekday_peak_hours,
            &self.tables.weekend_peak_hours,
            &self.tables.low_engagement_hours,
        )?)
    }

    pub fn peak_table_mode(&self) -> PeakTableMode {
        if self.engine.weekend_aware {
            PeakTableMode::WeekendAware
        } else {
            PeakTableMode::WeekdayOnly
        }
    }

    /// Engine built from the `[tables]` and `[engine]` sections.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad tables or an unparseable time format.
    pub fn build_engine(&self) -> Result<PostingTimeEngine> {
        let engine = PostingTimeEngine::new(self.schedule_tables()?)
            .with_mode(self.peak_table_mode())
            .with_time_format(&self.engine.time_format)?;
        Ok(engine)
    }

    /// Shell over the system clock using the configured engine and delay.
    ///
    /// # Errors
    ///
    /// Same as [`Config::build_engine`].
    pub fn build_shell(&self) -> Result<AnalysisShell> {
        Ok(AnalysisShell::new(self.build_engine()?)
            .with_delay(Duration::from_millis(self.shell.delay_ms)))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }
}
