//! Commands for appliance settings management.
//!
//! Provides get/save operations for the connection settings,
//! persisting to a JSON file in the settings directory.

use std::path::Path;

use tracing::info;

use crate::settings::{ApplianceSettings, SettingsManager};

/// Get current appliance settings from disk.
///
/// Returns default settings if no settings file exists yet.
pub async fn get_appliance_settings(settings_dir: &Path) -> Result<ApplianceSettings, String> {
    let manager = SettingsManager::new(settings_dir);
    manager.load()
}

/// Save appliance settings to disk.
pub async fn save_appliance_settings(
    settings_dir: &Path,
    settings: &ApplianceSettings,
) -> Result<(), String> {
    let manager = SettingsManager::new(settings_dir);
    manager.save(settings)?;

    info!(
        path = %manager.settings_path().display(),
        hostname = %settings.hostname,
        "Saved appliance settings"
    );

    Ok(())
}
