//! User settings
//!
//! Stored as JSON at `<config dir>/powerlut/settings.json`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that can point at the cars directory
pub const CARS_PATH_ENV: &str = "POWERLUT_CARS_PATH";

/// Persisted user settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cars directory of the simulator install
    pub cars_path: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location
    pub fn settings_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .context("Could not find a configuration directory")?;
        Ok(base.join("powerlut").join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Load settings from `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Pick the cars directory: flag, then environment, then settings
    pub fn resolve_cars_path(
        &self,
        flag: Option<PathBuf>,
        env: Option<PathBuf>,
    ) -> Result<PathBuf> {
        match flag.or(env).or_else(|| self.cars_path.clone()) {
            Some(path) => Ok(path),
            None => bail!(
                "No cars directory given; pass --path, set {} or add \"cars_path\" to the settings file",
                CARS_PATH_ENV
            ),
        }
    }
}
