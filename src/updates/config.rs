//! Endpoint paths and protocol constants for the appliance update subsystem.

// ============================================================================
// REST endpoints
// ============================================================================

/// Lists the updates known to the appliance.
pub const AVAILABLE_UPDATES_URI: &str = "/updates/available.json";

/// Asks the appliance to scan for newly published updates.
pub const DISCOVER_UPDATES_URI: &str = "/updates/available/discover";

/// Multipart upload target for update packages.
pub const UPLOAD_UPDATE_URI: &str = "/core/updates/available";

/// Installs one or more previously uploaded updates.
pub const INSTALL_UPDATE_URI: &str = "/updates/available/install";

/// Firmware partition listing (active and backup partitions).
pub const FIRMWARE_SETTINGS_URI: &str = "/firmware_settings";

// ============================================================================
// Upload
// ============================================================================

/// Form field the appliance expects the package under.
pub const UPLOAD_FORM_FIELD: &str = "uploadedfile";

/// Content type sent for package uploads.
pub const UPLOAD_MIME_TYPE: &str = "application/octet-stream";

// ============================================================================
// Update states
// ============================================================================

/// State reported for an update while the appliance is applying it.
pub const STATE_INSTALLING: &str = "Installing";
