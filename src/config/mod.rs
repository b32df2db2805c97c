//! This module handles the crate's configuration, including loading and
//! saving host-wide overlay preferences to a `settings.toml` file.
//!
//! Configuration only ever adjusts *default table* values (toast timing and
//! placement, guard cooldown, UI language); caller-supplied options always
//! win over configuration, and configuration wins over the built-in
//! defaults.

mod defaults;

pub use defaults::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, DEFAULT_GUARD_COOLDOWN_MS, DEFAULT_TOAST_POSITION,
    DEFAULT_TOAST_TIMEOUT_MS, MAX_DIAGNOSTICS_BUFFER_CAPACITY, MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "OverlayKit";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub toast_timeout_ms: Option<u64>,
    #[serde(default)]
    pub toast_position: Option<String>,
    #[serde(default)]
    pub guard_cooldown_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            toast_timeout_ms: Some(DEFAULT_TOAST_TIMEOUT_MS),
            toast_position: Some(DEFAULT_TOAST_POSITION.to_string()),
            guard_cooldown_ms: Some(DEFAULT_GUARD_COOLDOWN_MS),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
