//! diplog configuration.
//!
//! Loaded from `~/.diplog/config.toml`. Every key is optional and a
//! missing file means defaults; command-line flags override it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::corpus::FailurePolicy;

/// diplog configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Schedule file used when `--schedule` is not given.
    pub schedule: Option<PathBuf>,

    /// Message log extension, without the dot.
    pub extension: String,

    /// What to do with a block that fails to parse.
    pub on_error: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: None,
            extension: "txt".to_string(),
            on_error: FailurePolicy::Abort,
        }
    }
}

impl Config {
    /// Load config from `~/.diplog/config.toml`, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.extension.is_empty() || config.extension.starts_with('.') {
            return Err(format!(
                "extension in {} must be non-empty and without a leading dot",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.diplog/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".diplog").join("config.toml"))
    }
}
