//! Firmware partition queries.

use super::config::FIRMWARE_SETTINGS_URI;
use super::error::UpdateResult;
use super::types::{FirmwarePartitionRecord, OperationResult};
use crate::traits::ApplianceTransport;

/// Retrieve the raw firmware settings (one entry per partition).
pub fn get_firmware_settings<T>(transport: &T) -> UpdateResult<OperationResult>
where
    T: ApplianceTransport + ?Sized,
{
    transport.invoke_get("Retrieving firmware settings", FIRMWARE_SETTINGS_URI)
}

/// Retrieve and decode the firmware partitions.
pub fn list_partitions<T>(transport: &T) -> UpdateResult<Vec<FirmwarePartitionRecord>>
where
    T: ApplianceTransport + ?Sized,
{
    get_firmware_settings(transport)?.decode_data("retrieve firmware settings")
}
