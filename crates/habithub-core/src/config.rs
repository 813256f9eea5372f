//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timing mode (real calendar vs. compressed periods for trying the
//!   reward loop out quickly)
//! - The watch-loop tick interval
//! - An optional seed for deterministic coin payouts
//!
//! Configuration is stored at `~/.config/habithub/config.toml`.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::evaluator::{CompressedPeriods, Evaluator, Timing};
use crate::storage::data_dir;

/// Period timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// When true, periods last seconds instead of calendar spans.
    #[serde(default)]
    pub compressed: bool,
    #[serde(default = "default_daily_secs")]
    pub daily_secs: u32,
    #[serde(default = "default_weekly_secs")]
    pub weekly_secs: u32,
    #[serde(default = "default_monthly_secs")]
    pub monthly_secs: u32,
}

/// Watch-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickConfig {
    #[serde(default = "default_tick_interval")]
    pub interval_secs: u32,
}

/// Reward configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Seed for the coin payout. Unset means a fresh roll every run.
    #[serde(default)]
    pub coin_seed: Option<u64>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habithub/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub tick: TickConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

// Default functions
fn default_daily_secs() -> u32 {
    60
}
fn default_weekly_secs() -> u32 {
    120
}
fn default_monthly_secs() -> u32 {
    180
}
fn default_tick_interval() -> u32 {
    6
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            compressed: false,
            daily_secs: default_daily_secs(),
            weekly_secs: default_weekly_secs(),
            monthly_secs: default_monthly_secs(),
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_tick_interval(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self { coin_seed: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            tick: TickConfig::default(),
            rewards: RewardsConfig::default(),
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as boolean"),
                        })?,
                    ),
                    serde_json::Value::Number(_) | serde_json::Value::Null => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written
    /// to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
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

    /// Set a config value by key and persist the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// The timing mode the config describes. Compressed durations are
    /// clamped to at least one second.
    pub fn timing(&self) -> Timing {
        if self.timing.compressed {
            Timing::Compressed(CompressedPeriods {
                daily: Duration::seconds(i64::from(self.timing.daily_secs.max(1))),
                weekly: Duration::seconds(i64::from(self.timing.weekly_secs.max(1))),
                monthly: Duration::seconds(i64::from(self.timing.monthly_secs.max(1))),
            })
        } else {
            Timing::Calendar
        }
    }

    /// Build the evaluator the config describes.
    pub fn evaluator(&self) -> Evaluator {
        let mut evaluator = Evaluator::new().with_timing(self.timing());
        if let Some(seed) = self.rewards.coin_seed {
            evaluator = evaluator.with_coin_seed(seed);
        }
        evaluator
    }

    /// Watch-loop sleep interval, at least one second.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.tick.interval_secs.max(1)))
    }
}
