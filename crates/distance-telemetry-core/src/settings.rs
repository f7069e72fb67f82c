//! Telemetry settings
//!
//! Destination host and port persisted as a small JSON file:
//!
//! ```json
//! { "Host": "127.0.0.1", "Port": 12345 }
//! ```
//!
//! Missing keys are filled with defaults and written back, so a fresh install ends
//! up with an editable file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::protocol::{EndpointConfig, DEFAULT_HOST, DEFAULT_PORT};

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "telemetry.json";

/// Errors loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Settings file is not valid JSON
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted telemetry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Destination host
    #[serde(rename = "Host")]
    pub host: String,
    /// Destination port
    #[serde(rename = "Port")]
    pub port: i32,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// On-disk shape; every key optional so missing ones can be detected
#[derive(Deserialize)]
struct StoredSettings {
    #[serde(rename = "Host")]
    host: Option<String>,
    #[serde(rename = "Port")]
    port: Option<i32>,
}

impl TelemetrySettings {
    /// Default settings location: `<config dir>/distance-telemetry/telemetry.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("distance-telemetry")
            .join(SETTINGS_FILE_NAME)
    }

    /// Load settings, creating the file or filling missing keys with defaults
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = Self::default();
                tracing::info!(path = %path.display(), "Creating default telemetry settings");
                settings.save(path)?;
                return Ok(settings);
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let stored: StoredSettings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let complete = stored.host.is_some() && stored.port.is_some();
        let defaults = Self::default();
        let settings = Self {
            host: stored.host.unwrap_or(defaults.host),
            port: stored.port.unwrap_or(defaults.port),
        };

        if !complete {
            tracing::info!(path = %path.display(), "Filling missing telemetry settings with defaults");
            settings.save(path)?;
        }

        Ok(settings)
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let io_err = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Endpoint for the sender
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(self.host.clone(), self.port)
    }
}
