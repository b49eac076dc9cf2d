//! Error types for the available-updates client.

use thiserror::Error;

/// Result type alias for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors that can occur while talking to the appliance's update subsystem.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Transport failure from the reqwest client (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance answered with a non-success status.
    #[error("Appliance returned HTTP {status} for {uri}: {message}")]
    HttpStatus {
        status: u16,
        uri: String,
        message: String,
    },

    /// Standard I/O error (reading the package file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The appliance returned a payload we could not interpret.
    #[error("Unexpected response to {operation}: {reason}")]
    UnexpectedResponse { operation: String, reason: String },

    /// Connection settings are incomplete or invalid.
    #[error("Invalid appliance settings: {reason}")]
    InvalidSettings { reason: String },

    /// A blocking worker task panicked or was cancelled.
    #[error("Background task failed: {reason}")]
    TaskFailed { reason: String },
}

impl UpdateError {
    /// Check if this error is transient. The client never retries on its own;
    /// this is for callers that want to.
    pub fn is_retriable(&self) -> bool {
        match self {
            UpdateError::Http(e) => e.is_timeout() || e.is_connect(),
            UpdateError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get a user-friendly error code for support purposes.
    pub fn error_code(&self) -> &'static str {
        match self {
            UpdateError::Http(_) => "UPD-001",
            UpdateError::HttpStatus { .. } => "UPD-002",
            UpdateError::Io(_) => "UPD-003",
            UpdateError::Json(_) => "UPD-004",
            UpdateError::UnexpectedResponse { .. } => "UPD-010",
            UpdateError::InvalidSettings { .. } => "UPD-020",
            UpdateError::TaskFailed { .. } => "UPD-099",
        }
    }
}
