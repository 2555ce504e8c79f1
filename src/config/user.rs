use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

/// User-level configuration loaded from `~/.config/scaffold/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// API version written into generated metadata when `--apiversion` is not given.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Template store used instead of the built-in bundles.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scaffold").join("config.toml"))
}

/// Read `scaffold/config.toml` from the platform config directory.
///
/// A missing file is not an error; an unreadable or malformed one is.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| ScaffoldError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}
