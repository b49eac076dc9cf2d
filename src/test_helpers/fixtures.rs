use serde_json::Value;

use crate::updates::{FirmwarePartitionRecord, UpdateRecord};

/// Builder for creating test UpdateRecord instances
pub struct UpdateRecordBuilder {
    update_type: String,
    version: String,
    release_date: String,
    name: String,
    state: String,
}

impl UpdateRecordBuilder {
    pub fn new(version: &str) -> Self {
        Self {
            update_type: "firmware".to_string(),
            version: version.to_string(),
            release_date: "2016-11-02".to_string(),
            name: version.to_string(),
            state: "Available".to_string(),
        }
    }

    pub fn update_type(mut self, update_type: &str) -> Self {
        self.update_type = update_type.to_string();
        self
    }

    pub fn release_date(mut self, release_date: &str) -> Self {
        self.release_date = release_date.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    pub fn build(self) -> UpdateRecord {
        UpdateRecord {
            update_type: self.update_type,
            version: self.version,
            release_date: self.release_date,
            name: self.name,
            state: self.state,
        }
    }
}

impl Default for UpdateRecordBuilder {
    fn default() -> Self {
        Self::new("9.0.2.0")
    }
}

/// Builder for creating test FirmwarePartitionRecord instances
pub struct PartitionBuilder {
    name: String,
    active: bool,
    partition: Option<String>,
}

impl PartitionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: false,
            partition: None,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn partition(mut self, partition: &str) -> Self {
        self.partition = Some(partition.to_string());
        self
    }

    pub fn build(self) -> FirmwarePartitionRecord {
        FirmwarePartitionRecord {
            active: self.active,
            name: self.name,
            partition: self.partition,
            firmware_version: None,
            install_date: None,
            backup_date: None,
            comment: None,
        }
    }
}

/// Render update records the way the appliance returns them.
pub fn updates_json(records: &[UpdateRecord]) -> Value {
    serde_json::to_value(records).expect("Failed to serialize update records")
}

/// Render firmware partitions the way the appliance returns them.
pub fn partitions_json(partitions: &[FirmwarePartitionRecord]) -> Value {
    serde_json::to_value(partitions).expect("Failed to serialize partitions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_record_builder_defaults() {
        let record = UpdateRecordBuilder::default().build();
        assert_eq!(record.update_type, "firmware");
        assert_eq!(record.name, "9.0.2.0");
        assert_eq!(record.state, "Available");
    }

    #[test]
    fn test_updates_json_uses_appliance_keys() {
        let value = updates_json(&[UpdateRecordBuilder::new("9.0.3.0")
            .update_type("fixpack")
            .name("fp1")
            .build()]);
        assert_eq!(value[0]["type"], "fixpack");
        assert_eq!(value[0]["name"], "fp1");
    }

    #[test]
    fn test_partitions_json_skips_absent_fields() {
        let value = partitions_json(&[PartitionBuilder::new("isam_9.0.2.0_20161102-2353")
            .partition("2")
            .build()]);
        assert_eq!(value[0]["partition"], "2");
        assert!(value[0].get("comment").is_none());
    }
}
