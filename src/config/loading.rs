//! Configuration file discovery and loading.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use super::validation::validate_config;
use crate::common::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Path of the configuration file: inside `config_dir` when given, otherwise
/// under the user's configuration directory.
pub fn get_config_path(config_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = config_dir {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the configuration, or the defaults when no file exists.
pub fn load(config_dir: Option<&Path>) -> Result<Config> {
    let path = get_config_path(config_dir)?;
    if !path.exists() {
        log_decorated!("No configuration at {}, using defaults", path.display());
        let mut config = Config::default();
        config.apply_defaults();
        return Ok(config);
    }
    load_from_path(&path)
}

/// Load, validate and complete the configuration at `path`.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    config.apply_defaults();
    Ok(config)
}
