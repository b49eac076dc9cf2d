//! Records exchanged with the appliance and the uniform result wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{UpdateError, UpdateResult};

/// One entry of the appliance's available-updates catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Update category, e.g. "firmware".
    #[serde(rename = "type")]
    pub update_type: String,
    /// Dotted version, e.g. "9.0.2.0".
    pub version: String,
    /// Release date as `YYYY-MM-DD`.
    pub release_date: String,
    /// Appliance-internal identifier, often the same as `version`.
    pub name: String,
    /// Appliance-defined state ("Available", "Installing", ...).
    #[serde(default)]
    pub state: String,
}

impl UpdateRecord {
    /// Release date with the hyphens removed (`2016-11-02` -> `20161102`),
    /// the form used in package file names.
    pub fn compact_release_date(&self) -> String {
        self.release_date.replace('-', "")
    }

    /// Whether this record names exactly the given update.
    pub fn matches(&self, identity: &UpdateIdentity) -> bool {
        self.update_type == identity.update_type
            && self.version == identity.version
            && self.release_date == identity.release_date
            && self.name == identity.name
    }
}

/// One firmware partition as reported by the firmware settings endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwarePartitionRecord {
    /// Whether this is the currently booted partition.
    pub active: bool,
    /// Firmware identifier, shaped like a package stem
    /// (`isam_9.0.2.0_20161102-2353`).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The four fields that identify an installable update.
///
/// Serializes to the item shape the install endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateIdentity {
    #[serde(rename = "type")]
    pub update_type: String,
    pub version: String,
    pub release_date: String,
    pub name: String,
}

impl UpdateIdentity {
    pub fn new(
        update_type: impl Into<String>,
        version: impl Into<String>,
        release_date: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            update_type: update_type.into(),
            version: version.into(),
            release_date: release_date.into(),
            name: name.into(),
        }
    }
}

/// Options accepted by every state-changing operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationOptions {
    /// Skip the idempotency check and always attempt the call.
    pub force: bool,
    /// Report what would change without calling the appliance.
    pub dry_run: bool,
}

impl OperationOptions {
    pub fn forced() -> Self {
        Self {
            force: true,
            dry_run: false,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            force: false,
            dry_run: true,
        }
    }
}

/// Uniform response wrapper returned by every operation.
///
/// Callers detect no-ops by `changed == false`, not by the absence of an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Appliance return code; 0 on success.
    #[serde(default)]
    pub rc: i64,
    /// Whether the operation changed (or, in dry-run, would change) state.
    #[serde(default)]
    pub changed: bool,
    /// Response payload; `null` when no call was made.
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl OperationResult {
    /// Result for an operation that was skipped.
    pub fn unchanged() -> Self {
        Self {
            rc: 0,
            changed: false,
            data: Value::Null,
            warnings: Vec::new(),
        }
    }

    /// Result for a dry run that would have changed state.
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::unchanged()
        }
    }

    /// Result carrying an appliance payload.
    pub fn with_data(data: Value, changed: bool) -> Self {
        Self {
            changed,
            data,
            ..Self::unchanged()
        }
    }

    /// Decode `data` into a typed payload, naming `operation` on failure.
    pub fn decode_data<R: DeserializeOwned>(&self, operation: &str) -> UpdateResult<R> {
        serde_json::from_value(self.data.clone()).map_err(|e| UpdateError::UnexpectedResponse {
            operation: operation.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for OperationResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

/// What the client believes about the appliance it talks to.
///
/// `version` is set once per successful, non-dry-run install and reflects
/// the installed update's version. It is never read back from the appliance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplianceFacts {
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_record_from_appliance_json() {
        let record: UpdateRecord = serde_json::from_value(json!({
            "type": "firmware",
            "version": "9.0.2.0",
            "release_date": "2016-11-02",
            "name": "9.0.2.0",
            "state": "Available",
            "size": 1234
        }))
        .unwrap();

        assert_eq!(record.update_type, "firmware");
        assert_eq!(record.state, "Available");
        assert_eq!(record.compact_release_date(), "20161102");
    }

    #[test]
    fn test_update_record_missing_state_defaults_empty() {
        let record: UpdateRecord = serde_json::from_value(json!({
            "type": "firmware",
            "version": "9.0.2.0",
            "release_date": "2016-11-02",
            "name": "9.0.2.0"
        }))
        .unwrap();

        assert!(record.state.is_empty());
    }

    #[test]
    fn test_update_record_matches_all_four_fields() {
        let record = UpdateRecord {
            update_type: "firmware".into(),
            version: "9.0.3.0".into(),
            release_date: "2017-01-01".into(),
            name: "9.0.3.0".into(),
            state: "Available".into(),
        };

        assert!(record.matches(&UpdateIdentity::new(
            "firmware",
            "9.0.3.0",
            "2017-01-01",
            "9.0.3.0"
        )));
        assert!(!record.matches(&UpdateIdentity::new(
            "fixpack",
            "9.0.3.0",
            "2017-01-01",
            "9.0.3.0"
        )));
        assert!(!record.matches(&UpdateIdentity::new(
            "firmware",
            "9.0.3.0",
            "20170101",
            "9.0.3.0"
        )));
    }

    #[test]
    fn test_update_identity_serializes_type_key() {
        let identity = UpdateIdentity::new("firmware", "9.0.3.0", "2017-01-01", "9.0.3.0");
        let value = serde_json::to_value(&identity).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "firmware",
                "version": "9.0.3.0",
                "release_date": "2017-01-01",
                "name": "9.0.3.0"
            })
        );
    }

    #[test]
    fn test_partition_record_optional_fields() {
        let record: FirmwarePartitionRecord = serde_json::from_value(json!({
            "active": true,
            "name": "isam_9.0.2.0_20161102-2353",
            "partition": "1"
        }))
        .unwrap();

        assert!(record.active);
        assert_eq!(record.partition.as_deref(), Some("1"));
        assert!(record.comment.is_none());
    }

    #[test]
    fn test_operation_result_constructors() {
        let noop = OperationResult::unchanged();
        assert!(!noop.changed);
        assert!(noop.data.is_null());
        assert_eq!(noop, OperationResult::default());

        let dry = OperationResult::changed();
        assert!(dry.changed);
        assert!(dry.data.is_null());
        assert_eq!(dry.rc, 0);
    }

    #[test]
    fn test_decode_data_reports_operation() {
        let result = OperationResult::with_data(json!({"unexpected": true}), false);
        let err = result
            .decode_data::<Vec<UpdateRecord>>("list available updates")
            .unwrap_err();

        match err {
            UpdateError::UnexpectedResponse { operation, .. } => {
                assert_eq!(operation, "list available updates")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_operation_options_presets() {
        assert_eq!(
            OperationOptions::default(),
            OperationOptions {
                force: false,
                dry_run: false
            }
        );
        assert!(OperationOptions::forced().force);
        assert!(OperationOptions::dry_run().dry_run);
    }
}
