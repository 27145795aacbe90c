//! Configuration module for dmgmonkey
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "DMGMONKEY_SETTINGS_PATH";

/// Load settings from an explicit path, the environment or the default locations.
///
/// An explicit path must exist. Otherwise the first existing file among
/// `$DMGMONKEY_SETTINGS_PATH`, `dmgmonkey.yml`, `config/dmgmonkey.yml` and
/// `<config dir>/dmgmonkey/settings.yml` is used, falling back to defaults.
/// Environment overrides are applied last and the result is validated.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match explicit {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(path)?
        }
        None => match find_settings_file() {
            Some(path) => {
                info!("Loading settings from: {}", path.display());
                Settings::from_file(&path)?
            }
            None => {
                debug!("No settings file found, using defaults");
                Settings::default()
            }
        },
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("dmgmonkey.yml"),
        PathBuf::from("config/dmgmonkey.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("dmgmonkey/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}
