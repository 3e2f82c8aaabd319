//! Tool configuration
//!
//! Uses RON (Rusty Object Notation) for a human-editable config file. Every
//! field has a default, so a file only needs the values it changes:
//!
//! ```ron
//! (
//!     export: (scale_mode: NormalizeToBounds, winding: DualSided),
//!     preview: (display_scale: 4.0, interaction: (friction: 0.97)),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::export::ExportSettings;
use crate::preview::PreviewSettings;

/// Name of the config file inside the user config directory
const CONFIG_FILE: &str = "config.ron";
const APP_DIR: &str = "psxmodel";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportSettings,
    pub preview: PreviewSettings,
}

impl Config {
    /// Parse config text
    pub fn from_ron(text: &str) -> Result<Config, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Load an explicit config file
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// `--config` if given, else the user config file if it exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }
}

/// `<config_dir>/psxmodel/config.ron`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
