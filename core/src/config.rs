//! Loading and saving [`IndicatorConfig`].
//!
//! Settings live in the platform config directory via `confy`; explicit
//! paths (scenario fixtures, exports) are read and written as TOML. Every
//! load passes through `IndicatorConfig::sanitized`, so callers never see an
//! out-of-range value.

use std::fs;
use std::path::{Path, PathBuf};

use meleeguard_types::IndicatorConfig;
use thiserror::Error;

/// Application name used for the confy store
pub const APP_NAME: &str = "meleeguard";

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Settings store error: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Clamp a freshly loaded config, warning about anything that was out of range
fn sanitize(config: IndicatorConfig, origin: &str) -> IndicatorConfig {
    if config.needs_sanitizing() {
        tracing::warn!(
            origin,
            poll_interval_secs = config.poll_interval_secs,
            size = config.size,
            "Settings out of range, clamping"
        );
    }
    config.sanitized()
}

/// Load settings from the platform config directory, creating defaults on first run
pub fn load() -> Result<IndicatorConfig, ConfigError> {
    let config: IndicatorConfig = confy::load(APP_NAME, None)?;
    Ok(sanitize(config, "store"))
}

/// Persist settings to the platform config directory
pub fn store(config: &IndicatorConfig) -> Result<(), ConfigError> {
    confy::store(APP_NAME, None, config.clone().sanitized())?;
    Ok(())
}

/// Path of the confy-managed settings file
pub fn store_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

/// Load settings from a specific TOML file
pub fn load_file(path: &Path) -> Result<IndicatorConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: IndicatorConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(sanitize(config, "file"))
}

/// Save settings to a specific TOML file
pub fn save_file(path: &Path, config: &IndicatorConfig) -> Result<(), ConfigError> {
    let contents =
        toml::to_string_pretty(&config.clone().sanitized()).map_err(|e| ConfigError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Directory holding user data (scenarios, exported settings)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

/// Subdirectory of the data dir holding scenario files
pub const SCENARIO_DIR: &str = "scenarios";

/// Resolve a scenario path, falling back to the user's scenario directory
pub fn resolve_scenario_path(path: &Path) -> PathBuf {
    resolve_in(path, default_data_dir().as_deref())
}

/// Use `path` as given if it exists or is absolute; otherwise look for it
/// under `data_dir/scenarios`.
fn resolve_in(path: &Path, data_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    match data_dir.map(|dir| dir.join(SCENARIO_DIR).join(path)) {
        Some(candidate) if candidate.exists() => {
            tracing::debug!(path = %candidate.display(), "Resolved scenario from data dir");
            candidate
        }
        _ => path.to_path_buf(),
    }
}
