use std::fs;
use std::path::{Path, PathBuf};

use super::core::BiasguardConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".biasguard.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<BiasguardConfig> {
    let config = toml::from_str::<BiasguardConfig>(contents)
        .map_err(|e| Error::parse(CONFIG_FILE_NAME, e))?;
    config.validate()?;
    Ok(config)
}

/// Strictly load a config file: missing, unreadable or invalid files are errors.
pub fn load_config_from_path(path: &Path) -> Result<BiasguardConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut config = parse_and_validate_config(&contents)?;
    resolve_ruleset_path(&mut config, path);
    Ok(config)
}

/// A relative ruleset path is relative to the config file that names it.
fn resolve_ruleset_path(config: &mut BiasguardConfig, config_path: &Path) {
    if let (Some(ruleset), Some(dir)) = (config.ruleset.path.as_mut(), config_path.parent()) {
        if ruleset.is_relative() {
            *ruleset = dir.join(&*ruleset);
        }
    }
}

/// Try loading config from a specific path, logging anything but "not found"
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<BiasguardConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Ignoring {}: {}", config_path.display(), e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the first usable config file.
pub fn load_config_from(start: PathBuf) -> BiasguardConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BiasguardConfig::default()
        })
}

pub fn load_config() -> BiasguardConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            BiasguardConfig::default()
        }
    }
}
