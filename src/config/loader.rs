//! Configuration loading and discovery for `zenflip.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{ReportFormat, ZenflipConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "zenflip.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse zenflip.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override axis letters
    pub axes: Option<String>,
    /// Enable rotation reflection
    pub rotation: Option<bool>,
    /// Enable per-match diagnostics
    pub verbose: Option<bool>,
    /// Override report format
    pub format: Option<ReportFormat>,
}

/// Find zenflip.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for zenflip.toml
/// 2. Check XDG_CONFIG_HOME/zenflip/zenflip.toml (or ~/.config/zenflip/zenflip.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find zenflip.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("zenflip").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find zenflip.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a zenflip.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("worlds/zenflip.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ZenflipConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ZenflipConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ZenflipConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Configuration used when no zenflip.toml is found: flip X, leave rotations.
pub fn default_config() -> ZenflipConfig {
    ZenflipConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// configuration is validated again, since an override can be invalid.
pub fn merge_cli_overrides(
    config: &mut ZenflipConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref axes) = overrides.axes {
        config.flip.axes = axes.clone();
    }

    // Flags can only switch a setting on
    if overrides.rotation == Some(true) {
        config.flip.rotation = true;
    }
    if overrides.verbose == Some(true) {
        config.report.verbose = true;
    }

    if let Some(format) = overrides.format {
        config.report.format = format;
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}
