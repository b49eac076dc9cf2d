use std::path::PathBuf;

use serde_json::Value;

#[cfg(test)]
use mockall::automock;

use crate::updates::{OperationResult, UpdateResult};

/// One file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Form field name the appliance reads the file from.
    pub form_field: String,
    /// Local file to send; its base name becomes the part's filename.
    pub path: PathBuf,
    pub mime_type: String,
}

/// Abstraction over the appliance's REST interface.
/// This allows mocking the appliance in tests.
///
/// Every call blocks until its single HTTP round-trip completes. `description`
/// is a human-readable label used only for logging.
#[cfg_attr(test, automock)]
pub trait ApplianceTransport: Send {
    /// Issue a GET request.
    fn invoke_get(&self, description: &str, uri: &str) -> UpdateResult<OperationResult>;

    /// Issue a POST request with a JSON body.
    fn invoke_post(&self, description: &str, uri: &str, body: &Value)
        -> UpdateResult<OperationResult>;

    /// Issue a multipart POST carrying a single file.
    fn invoke_post_file(
        &self,
        description: &str,
        uri: &str,
        upload: &FileUpload,
    ) -> UpdateResult<OperationResult>;
}
