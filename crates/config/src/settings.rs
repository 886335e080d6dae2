// Validator settings
// Loaded from ~/.config/sipot/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Output
    #[serde(rename = "output.downloadDir")]
    pub download_dir: PathBuf,

    #[serde(rename = "output.writeAcuse")]
    pub write_acuse: bool,

    // Logging
    #[serde(rename = "log.dir")]
    pub log_dir: PathBuf,

    #[serde(rename = "log.retentionDays")]
    pub log_retention_days: usize,

    /// `tracing` filter directive, e.g. `info` or `sipot_io=debug`.
    #[serde(rename = "log.level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("temp_downloads"),
            write_acuse: false,
            log_dir: PathBuf::from("logs"),
            log_retention_days: 30,
            log_level: "info".to_string(),
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Where clean runs leave their <run-id>.json document
    "output.downloadDir": "temp_downloads",

    // Write ACUSE_DE_ERRORES_<run-id>.txt into the download dir whenever a run has findings
    "output.writeAcuse": false,

    // Daily log files validacion.<date>.log, oldest pruned past the retention
    "log.dir": "logs",
    "log.retentionDays": 30,

    // Overridden by RUST_LOG when set
    "log.level": "info"
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sipot");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields defaults and is created with comments for the
    /// user to edit; failing to create it is not an error.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path();

        if !path.exists() {
            let _ = Self::create_default_file(&path);
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load settings from an explicit file. Lines starting with `//` are
    /// comments; absent keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&strip_comments(&contents)).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to `path` as plain JSON.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(write_err)
    }

    /// Create default settings file with comments
    fn create_default_file(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_FILE)
    }
}

/// Strip comments (lines starting with //)
fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}
