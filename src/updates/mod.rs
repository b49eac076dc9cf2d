//! Available-updates client for ISAM appliances.
//!
//! This module wraps the appliance's firmware-update REST endpoints:
//! listing available updates, triggering discovery, uploading an update
//! package and installing an uploaded update.
//!
//! # Idempotency
//!
//! Uploads and installs are skipped when the appliance already has what the
//! caller asks for:
//! - **Upload** - skipped when the active firmware partition is at or beyond
//!   the package's level, or when an update with the package's version and
//!   release date is already listed. Package names that cannot be parsed
//!   never block an upload.
//! - **Install** - skipped unless the update is listed, and aborted whenever
//!   an earlier listed update is still `Installing`.
//!
//! Both accept [`OperationOptions`]: `force` bypasses the check, `dry_run`
//! reports `changed = true` without calling the appliance.
//!
//! # Example
//!
//! ```ignore
//! use isam_updates::settings::ApplianceSettings;
//! use isam_updates::updates::{HttpTransport, OperationOptions, UpdateCatalogClient};
//!
//! let transport = HttpTransport::new(&settings)?;
//! let client = UpdateCatalogClient::new(transport);
//! let result = client.upload_update("isam_9.0.2.0_20161102-2353.pkg", OperationOptions::default())?;
//! if !result.changed {
//!     println!("already uploaded");
//! }
//! ```

mod catalog;
pub mod config;
mod error;
mod firmware;
mod package;
mod transport;
mod types;

pub use catalog::UpdateCatalogClient;
pub use error::{UpdateError, UpdateResult};
pub use firmware::list_partitions;
pub use package::{parse_package_name, PackageName, PackageNameError};
pub use transport::HttpTransport;
pub use types::{
    ApplianceFacts, FirmwarePartitionRecord, OperationOptions, OperationResult, UpdateIdentity,
    UpdateRecord,
};
