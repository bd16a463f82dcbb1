//! System configuration parameters
//!
//! Tunables for the CatPoint controller.  Defaults are usable as-is; a JSON
//! file can override any subset of fields.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum classifier confidence (percent) for a scan to count as a cat
    pub cat_confidence_threshold: f32,
    /// Reset every sensor to inactive when the system is armed
    pub reset_sensors_on_arm: bool,
    /// Where the JSON repository keeps its snapshot
    pub state_file: PathBuf,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: 50.0,
            reset_sensors_on_arm: true,
            state_file: PathBuf::from("catpoint.json"),
        }
    }
}

impl SecurityConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.cat_confidence_threshold) {
            return Err(Error::Config("cat_confidence_threshold must be 0.0–100.0"));
        }
        if self.state_file.as_os_str().is_empty() {
            return Err(Error::Config("state_file must not be empty"));
        }
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|_| Error::Config("config file unreadable"))?;
        let config: Self = serde_json::from_str(&text).map_err(|_| Error::Config("config file is not valid JSON"))?;
        config.validate()?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}
