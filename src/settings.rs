//! Appliance connection settings with JSON persistence.
//!
//! This module provides:
//! - `ApplianceSettings` describing how to reach and authenticate to the
//!   appliance
//! - Persistence to a JSON file in a settings directory
//!
//! Every field carries a serde default so older or hand-written files that
//! omit fields still load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::updates::{UpdateError, UpdateResult};

/// Default HTTPS port of the appliance's management interface.
pub const DEFAULT_PORT: u16 = 443;

/// Default administrative account.
pub const DEFAULT_USERNAME: &str = "admin@local";

/// Default per-request timeout. Uploads of multi-gigabyte packages can take
/// a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for one appliance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceSettings {
    /// Hostname or address of the appliance's management interface.
    #[serde(default)]
    pub hostname: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Verify the appliance's TLS certificate. Off by default since
    /// appliances ship with self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApplianceSettings {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: DEFAULT_PORT,
            username: default_username(),
            password: String::new(),
            verify_tls: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApplianceSettings {
    /// HTTPS origin of the management interface.
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.hostname, self.port)
    }

    /// Check that the settings are usable for a connection.
    pub fn validate(&self) -> UpdateResult<()> {
        if self.hostname.trim().is_empty() {
            return Err(UpdateError::InvalidSettings {
                reason: "hostname is empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(UpdateError::InvalidSettings {
                reason: "port must be non-zero".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(UpdateError::InvalidSettings {
                reason: "timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings file name stored in the settings directory.
const SETTINGS_FILENAME: &str = "appliance_settings.json";

/// Manages persistence of appliance settings to JSON file.
pub struct SettingsManager {
    settings_file_path: PathBuf,
}

impl SettingsManager {
    /// Create a new settings manager for the given settings directory.
    pub fn new(settings_dir: &Path) -> Self {
        let settings_file_path = settings_dir.join(SETTINGS_FILENAME);
        Self { settings_file_path }
    }

    /// Load settings from disk, returning defaults if file doesn't exist.
    pub fn load(&self) -> Result<ApplianceSettings, String> {
        if !self.settings_file_path.exists() {
            return Ok(ApplianceSettings::default());
        }

        let contents = fs::read_to_string(&self.settings_file_path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        // Handle empty file gracefully
        if contents.trim().is_empty() {
            return Ok(ApplianceSettings::default());
        }

        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse settings JSON: {}", e))
    }

    /// Save settings to disk.
    pub fn save(&self, settings: &ApplianceSettings) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = self.settings_file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let contents = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&self.settings_file_path, contents)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }

    /// Get the path where settings are stored.
    pub fn settings_path(&self) -> &Path {
        &self.settings_file_path
    }
}
