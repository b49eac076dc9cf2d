//! Commands for available-update operations.
//!
//! The update client is blocking, so every command runs it on tokio's
//! blocking pool and maps errors to messages carrying the support code.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::settings::SettingsManager;
use crate::updates::{
    HttpTransport, OperationOptions, OperationResult, UpdateCatalogClient, UpdateError,
    UpdateIdentity, UpdateResult,
};

/// Result of an install, together with the client's version belief after it.
#[derive(Debug, Clone, Serialize)]
pub struct InstallOutcome {
    #[serde(flatten)]
    pub result: OperationResult,
    /// Version recorded after a successful install; `None` if nothing was
    /// installed.
    pub last_known_version: Option<String>,
}

/// Load settings from `settings_dir` and run `operation` against a fresh
/// client on the blocking pool.
async fn run_with_client<F, R>(settings_dir: &Path, label: &str, operation: F) -> Result<R, String>
where
    F: FnOnce(&mut UpdateCatalogClient<HttpTransport>) -> UpdateResult<R> + Send + 'static,
    R: Send + 'static,
{
    let settings = SettingsManager::new(settings_dir).load()?;

    let outcome = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&settings)?;
        let mut client = UpdateCatalogClient::new(transport);
        operation(&mut client)
    })
    .await
    .unwrap_or_else(|e| {
        Err(UpdateError::TaskFailed {
            reason: e.to_string(),
        })
    });

    outcome.map_err(|e| format!("{} failed [{}]: {}", label, e.error_code(), e))
}

/// List the updates known to the appliance.
pub async fn list_updates(settings_dir: &Path) -> Result<OperationResult, String> {
    run_with_client(settings_dir, "Listing available updates", |client| {
        client.get_available_updates()
    })
    .await
}

/// Ask the appliance to discover newly published updates.
pub async fn discover_updates(settings_dir: &Path) -> Result<OperationResult, String> {
    run_with_client(settings_dir, "Discovering updates", |client| {
        client.discover_updates()
    })
    .await
}

/// Show the appliance's firmware partitions.
pub async fn firmware_settings(settings_dir: &Path) -> Result<OperationResult, String> {
    run_with_client(settings_dir, "Retrieving firmware settings", |client| {
        client.get_firmware_settings()
    })
    .await
}

/// Upload an update package.
///
/// # Arguments
/// * `settings_dir` - Directory holding the appliance settings file
/// * `file` - Path to the update package
/// * `options` - `force` / `dry_run` flags
pub async fn upload_update(
    settings_dir: &Path,
    file: PathBuf,
    options: OperationOptions,
) -> Result<OperationResult, String> {
    run_with_client(settings_dir, "Uploading update", move |client| {
        client.upload_update(&file, options)
    })
    .await
}

/// Install a previously uploaded update.
pub async fn install_update(
    settings_dir: &Path,
    identity: UpdateIdentity,
    options: OperationOptions,
) -> Result<InstallOutcome, String> {
    run_with_client(settings_dir, "Installing update", move |client| {
        let result = client.install_update(&identity, options)?;
        Ok(InstallOutcome {
            result,
            last_known_version: client.last_known_version().map(str::to_string),
        })
    })
    .await
}
