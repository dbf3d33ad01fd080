//! TOML-based application configuration.
//!
//! Stores the reward catalog and export cadence at
//! `~/.config/ascend/config.toml`. Everything has a default so a missing or
//! partial file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::storage::data_dir;

/// One claimable reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDef {
    pub name: String,
    pub label: String,
    pub cost: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ascend/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Claimable reward catalog.
    #[serde(default = "default_rewards")]
    pub rewards: Vec<RewardDef>,
    /// Days between export reminders.
    #[serde(default = "default_export_reminder_days")]
    pub export_reminder_days: u32,
}

fn default_export_reminder_days() -> u32 {
    14
}

fn default_rewards() -> Vec<RewardDef> {
    fn def(name: &str, label: &str, cost: u64) -> RewardDef {
        RewardDef {
            name: name.into(),
            label: label.into(),
            cost,
        }
    }
    vec![
        def("break", "Extra Study Break (15 min)", 20),
        def("gaming", "Gaming Session (2h)", 50),
        def("movie", "Movie Night", 80),
        def("meal", "Cheat Meal", 100),
        def("social", "Social Outing", 150),
        def("dayoff", "Full Day Off", 300),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rewards: default_rewards(),
            export_reminder_days: default_export_reminder_days(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/ascend"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Write the config back out.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Look up a reward by its short name.
    pub fn reward(&self, name: &str) -> Option<&RewardDef> {
        self.rewards.iter().find(|r| r.name == name)
    }
}
