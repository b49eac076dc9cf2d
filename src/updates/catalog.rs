//! Client for the appliance's available-updates catalog.
//!
//! The two mutating operations, [`UpdateCatalogClient::upload_update`] and
//! [`UpdateCatalogClient::install_update`], are idempotent: unless `force` is
//! set they first ask the appliance whether the change is still needed and
//! return an unchanged result when it is not.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::config::{
    AVAILABLE_UPDATES_URI, DISCOVER_UPDATES_URI, INSTALL_UPDATE_URI, STATE_INSTALLING,
    UPLOAD_FORM_FIELD, UPLOAD_MIME_TYPE, UPLOAD_UPDATE_URI,
};
use super::error::UpdateResult;
use super::firmware;
use super::package::parse_package_name;
use super::types::{
    ApplianceFacts, OperationOptions, OperationResult, UpdateIdentity, UpdateRecord,
};
use crate::traits::{ApplianceTransport, FileUpload};

/// Body of an install request.
#[derive(Serialize)]
struct InstallRequest<'a> {
    updates: Vec<&'a UpdateIdentity>,
}

/// Lists, discovers, uploads and installs appliance updates through an
/// injected transport.
pub struct UpdateCatalogClient<T: ApplianceTransport> {
    transport: T,
    facts: ApplianceFacts,
}

impl<T: ApplianceTransport> UpdateCatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            facts: ApplianceFacts::default(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn facts(&self) -> &ApplianceFacts {
        &self.facts
    }

    /// Version recorded by the last successful install made through this
    /// client, if any.
    pub fn last_known_version(&self) -> Option<&str> {
        self.facts.version.as_deref()
    }

    /// Retrieve the updates known to the appliance.
    pub fn get_available_updates(&self) -> UpdateResult<OperationResult> {
        self.transport
            .invoke_get("Retrieving available updates", AVAILABLE_UPDATES_URI)
    }

    /// Ask the appliance to check for newly published updates.
    pub fn discover_updates(&self) -> UpdateResult<OperationResult> {
        self.transport
            .invoke_get("Discovering available updates", DISCOVER_UPDATES_URI)
    }

    /// Retrieve the appliance's firmware partitions.
    pub fn get_firmware_settings(&self) -> UpdateResult<OperationResult> {
        firmware::get_firmware_settings(&self.transport)
    }

    /// Upload an update package unless it is already on the appliance.
    pub fn upload_update<P: AsRef<Path>>(
        &self,
        file: P,
        options: OperationOptions,
    ) -> UpdateResult<OperationResult> {
        let file = file.as_ref();

        if options.force || !self.is_update_already_uploaded(file)? {
            if options.dry_run {
                info!(file = %file.display(), "Dry run: would upload update package");
                return Ok(OperationResult::changed());
            }

            info!(file = %file.display(), "Uploading update package");
            let upload = FileUpload {
                form_field: UPLOAD_FORM_FIELD.to_string(),
                path: file.to_path_buf(),
                mime_type: UPLOAD_MIME_TYPE.to_string(),
            };
            return self.transport.invoke_post_file(
                "Uploading available update",
                UPLOAD_UPDATE_URI,
                &upload,
            );
        }

        info!(file = %file.display(), "Update package already present, skipping upload");
        Ok(OperationResult::unchanged())
    }

    /// Install a previously uploaded update unless it is not installable.
    ///
    /// On a successful install the client's last known version becomes
    /// `identity.version`.
    pub fn install_update(
        &mut self,
        identity: &UpdateIdentity,
        options: OperationOptions,
    ) -> UpdateResult<OperationResult> {
        if options.force || self.is_update_installable(identity)? {
            if options.dry_run {
                info!(version = %identity.version, "Dry run: would install update");
                return Ok(OperationResult::changed());
            }

            info!(
                update_type = %identity.update_type,
                version = %identity.version,
                release_date = %identity.release_date,
                "Installing update"
            );
            let body = serde_json::to_value(InstallRequest {
                updates: vec![identity],
            })?;
            let result = self.transport.invoke_post(
                "Installing available update",
                INSTALL_UPDATE_URI,
                &body,
            )?;

            self.facts.version = Some(identity.version.clone());
            return Ok(result);
        }

        info!(version = %identity.version, "Update not installable, skipping install");
        Ok(OperationResult::unchanged())
    }

    fn available_update_records(&self) -> UpdateResult<Vec<UpdateRecord>> {
        self.get_available_updates()?
            .decode_data("retrieve available updates")
    }

    /// Decide from the package file name whether the update is already
    /// satisfied, either by the active firmware or by an uploaded update.
    ///
    /// File names that do not parse count as "not uploaded" so that an
    /// upload is still attempted. The active-partition check compares names
    /// as plain strings, not as versions: `"9.10.0.0" < "9.9.0.0"`.
    fn is_update_already_uploaded(&self, file: &Path) -> UpdateResult<bool> {
        debug!(file = %file.display(), "Checking whether update package is already uploaded");

        let package = match parse_package_name(file) {
            Ok(package) => package,
            Err(e) => {
                debug!(error = %e, "Unrecognised package name, treating as not uploaded");
                return Ok(false);
            }
        };
        debug!(
            prefix = %package.prefix,
            version = %package.version,
            release_date = %package.release_date,
            "Parsed package name"
        );

        for partition in firmware::list_partitions(&self.transport)? {
            if partition.active && partition.name.as_str() >= package.stem.as_str() {
                info!(
                    active = %partition.name,
                    package = %package.stem,
                    "Active partition is at or beyond the package level"
                );
                return Ok(true);
            }
        }

        // Installed updates drop out of this list.
        let uploaded = self.available_update_records()?.iter().any(|update| {
            update.version == package.version
                && update.compact_release_date() == package.release_date
        });
        if uploaded {
            debug!(version = %package.version, "Update package already uploaded");
        }
        Ok(uploaded)
    }

    /// Decide whether `identity` can be installed now.
    ///
    /// Records are scanned in appliance order; an `Installing` record seen
    /// before the match aborts the scan.
    fn is_update_installable(&self, identity: &UpdateIdentity) -> UpdateResult<bool> {
        for update in self.available_update_records()? {
            if update.state == STATE_INSTALLING {
                debug!(name = %update.name, "An update is being installed, aborting");
                return Ok(false);
            }
            if update.matches(identity) {
                debug!(version = %identity.version, "Requested update is ready for install");
                return Ok(true);
            }
        }

        debug!(version = %identity.version, "Requested update is not available for install");
        Ok(false)
    }
}
