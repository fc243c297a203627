//! # Dashboard Settings
//!
//! Optional `kpiboard.toml` in the dashboard root.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8000
//! config_file = "config.yaml"
//! status_file = "status.csv"
//! ```
//!
//! Every key is optional. CLI flags take precedence over the file, and the
//! file takes precedence over built-in defaults.

use kpiboard_core::{
    DashboardLayout, KpiboardError,
    primitives::{CONFIG_FILE, DEFAULT_HOST, DEFAULT_PORT, STATUS_FILE},
    read_document,
};
use serde::Deserialize;
use std::path::Path;

/// Name of the settings file looked up in the dashboard root.
pub const SETTINGS_FILE: &str = "kpiboard.toml";

/// Resolved launcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub config_file: String,
    pub status_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            config_file: CONFIG_FILE.to_string(),
            status_file: STATUS_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Load `kpiboard.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self, KpiboardError> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {:?}, using defaults", SETTINGS_FILE, root);
            return Ok(Self::default());
        }

        let text = read_document(&path)?;
        Self::parse(&text)
    }

    /// Parse settings from TOML text.
    pub fn parse(text: &str) -> Result<Self, KpiboardError> {
        toml::from_str(text).map_err(|e| {
            KpiboardError::MalformedDocument(format!("{}: {}", SETTINGS_FILE, e))
        })
    }

    /// Apply CLI overrides.
    #[must_use]
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// File names for the validators.
    #[must_use]
    pub fn layout(&self) -> DashboardLayout {
        DashboardLayout {
            config_file: self.config_file.clone(),
            status_file: self.status_file.clone(),
        }
    }

    /// `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
