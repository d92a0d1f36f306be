//! Persistent CLI configuration.

use crate::error::{DebriefError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration stored at `<config dir>/debrief/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Vault scanned when no `--vault` flag is given.
    pub default_vault: Option<PathBuf>,
}

impl Config {
    /// Location of the config file, if a config directory exists.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("debrief").join("config.toml"))
    }

    /// Load the config file; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Pick the vault path: the CLI flag wins, then `default_vault`.
    pub fn resolve_vault_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.default_vault {
            return Ok(path.clone());
        }

        Err(DebriefError::ConfigError(
            "no vault path: pass --vault or set default_vault in the config file".to_string(),
        ))
    }
}
