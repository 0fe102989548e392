//! TOML-based goal configuration.
//!
//! Stores the user's monthly targets:
//! - `monthly_additions`: lines added this month
//! - `monthly_hours`: hours of active coding this month
//!
//! Configuration is stored at `~/.config/linepulse/config.toml`. An absent
//! or non-positive threshold means the goal is unset; a misconfigured value
//! disables the goal, it never faults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::data_dir;

/// Configured monthly goal thresholds.
///
/// Serialized to/from TOML at `~/.config/linepulse/config.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Target lines added per month, unset when absent.
    #[serde(default)]
    pub monthly_additions: Option<i64>,
    /// Target active hours per month, unset when absent.
    #[serde(default)]
    pub monthly_hours: Option<i64>,
}

impl GoalConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/linepulse"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, or return the default when the file is missing or
    /// cannot be parsed. A corrupt config file must not take the session
    /// down; it just means no goals are set.
    pub fn load_or_default() -> Self {
        let Ok(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The additions threshold, with non-positive values treated as unset.
    pub fn additions_target(&self) -> Option<u64> {
        self.monthly_additions.filter(|t| *t > 0).map(|t| t as u64)
    }

    /// The active-hours threshold, with non-positive values treated as unset.
    pub fn hours_target(&self) -> Option<u64> {
        self.monthly_hours.filter(|t| *t > 0).map(|t| t as u64)
    }
}
