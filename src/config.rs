//! User configuration loaded from `config.toml`.
//!
//! The file lives at `$XDG_CONFIG_HOME/zcalc/config.toml` unless a path is
//! given on the command line. Every key is optional.
//!
//! ```toml
//! precision = 10
//! thousands_separator = true
//! history_limit = 100
//! prompt = "> "
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::calculator::FormatOptions;

/// Digits beyond this are noise for an `f64`.
pub const MAX_PRECISION: usize = 17;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub precision: usize,
    pub thousands_separator: bool,
    pub history_limit: usize,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: 10,
            thousands_separator: true,
            history_limit: 100,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load the config from `path`, or from [`Config::default_path`].
    ///
    /// An explicitly given file must exist. A missing default file yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file_or_default(&path),
                None => {
                    warn!("No config directory found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn from_file_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "Failed to read config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config from TOML text. Precision is clamped to
    /// [`MAX_PRECISION`].
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents).context("Failed to parse TOML")?;
        config.precision = config.precision.min(MAX_PRECISION);
        Ok(config)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            precision: self.precision,
            thousands_separator: self.thousands_separator,
        }
    }
}
