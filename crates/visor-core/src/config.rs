//! # Viewer Configuration
//!
//! Settings shared by the API server and the CLI. Resolution order, lowest
//! to highest precedence:
//!
//! 1. Built-in defaults ([`ViewerConfig::default`]).
//! 2. An optional YAML file (`--config`).
//! 3. Environment variables (`VISOR_ARCHIVE`, `VISOR_HOST`, `VISOR_PORT`,
//!    `VISOR_BASEMAP`).
//! 4. Command-line flags, applied by the binaries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::basemap::BaseMapStyle;
use crate::error::ConfigError;

/// Default location of the bundled territory archive.
pub const DEFAULT_ARCHIVE_PATH: &str = "data/Formalizado.zip";

/// Runtime configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Zip archive holding the territory shapefile.
    pub archive_path: PathBuf,
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Base map used when a request does not pick one.
    pub default_basemap: BaseMapStyle,
    /// Page title.
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(DEFAULT_ARCHIVE_PATH),
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_basemap: BaseMapStyle::default(),
            title: "Visor de Territorios Formalizados".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Resolve defaults, then the optional YAML file, then the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Read a YAML configuration file. Missing keys take their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|reason| ConfigError::Parse {
            path: path.display().to_string(),
            reason,
        })
    }

    fn from_yaml_str(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    }

    /// Override settings from environment variables supplied by `lookup`.
    ///
    /// Blank values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(archive) = get("VISOR_ARCHIVE") {
            self.archive_path = PathBuf::from(archive.trim());
        }
        if let Some(host) = get("VISOR_HOST") {
            self.host = host.trim().to_string();
        }
        if let Some(port) = get("VISOR_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    key: "VISOR_PORT".to_string(),
                    value: port.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(basemap) = get("VISOR_BASEMAP") {
            self.default_basemap = basemap.parse().map_err(|_| ConfigError::InvalidValue {
                key: "VISOR_BASEMAP".to_string(),
                value: basemap.clone(),
                reason: "unknown base map style".to_string(),
            })?;
        }
        Ok(self)
    }

    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
