//! Settings loader for config.toml

use super::types::Settings;
use obrand_core::prelude::*;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.toml";
const OBRAND_DIR: &str = "obrand";

/// Environment variable overriding the configured base directory
pub const ETC_DIR_ENV: &str = "OBRAND_ETC_DIR";

/// Default location of the settings file (`~/.config/obrand/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(OBRAND_DIR).join(CONFIG_FILENAME))
}

/// Load settings from the default location, or defaults if there is none
pub fn load_default_settings() -> Settings {
    match default_config_path() {
        Some(path) => load_settings(&path),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from a config file
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Resolve the base installation directory
///
/// Priority:
/// 1. `OBRAND_ETC_DIR` (when set and non-empty)
/// 2. `branding.etc_dir` from the settings
pub fn resolve_etc_dir(settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(ETC_DIR_ENV).filter(|v| !v.is_empty()) {
        debug!("Using {} from {}", PathBuf::from(&dir).display(), ETC_DIR_ENV);
        return Ok(PathBuf::from(dir));
    }

    match &settings.branding.etc_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
        _ => Err(Error::config_invalid(format!(
            "no base installation directory: set branding.etc_dir or {}",
            ETC_DIR_ENV
        ))),
    }
}
