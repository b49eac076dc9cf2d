//! HTTPS transport to the appliance's REST interface.
//!
//! Implements [`ApplianceTransport`] on top of a blocking reqwest client.
//! Each call is a single round-trip; nothing is retried.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::error::{UpdateError, UpdateResult};
use super::types::OperationResult;
use crate::settings::ApplianceSettings;
use crate::traits::{ApplianceTransport, FileUpload};

const USER_AGENT: &str = concat!("isam-updates/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTPS transport authenticated with basic auth.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Build a transport for the appliance described by `settings`.
    pub fn new(settings: &ApplianceSettings) -> UpdateResult<Self> {
        settings.validate()?;
        Self::with_base_url(settings, settings.base_url())
    }

    /// Build a transport against an explicit origin, keeping the credentials,
    /// TLS and timeout options from `settings`.
    pub fn with_base_url(
        settings: &ApplianceSettings,
        base_url: impl Into<String>,
    ) -> UpdateResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, uri: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, uri))
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
    }

    fn send(
        &self,
        description: &str,
        uri: &str,
        request: RequestBuilder,
        changed: bool,
    ) -> UpdateResult<OperationResult> {
        let response = request.send()?;
        debug!(description, uri, status = %response.status(), "Appliance responded");
        process_response(uri, response, changed)
    }
}

impl ApplianceTransport for HttpTransport {
    fn invoke_get(&self, description: &str, uri: &str) -> UpdateResult<OperationResult> {
        debug!(description, uri, "GET");
        self.send(description, uri, self.request(Method::GET, uri), false)
    }

    fn invoke_post(
        &self,
        description: &str,
        uri: &str,
        body: &Value,
    ) -> UpdateResult<OperationResult> {
        debug!(description, uri, "POST");
        let request = self.request(Method::POST, uri).json(body);
        self.send(description, uri, request, true)
    }

    fn invoke_post_file(
        &self,
        description: &str,
        uri: &str,
        upload: &FileUpload,
    ) -> UpdateResult<OperationResult> {
        debug!(description, uri, file = %upload.path.display(), "POST multipart");
        let part = Part::file(&upload.path)?.mime_str(&upload.mime_type)?;
        let form = Form::new().part(upload.form_field.clone(), part);
        let request = self.request(Method::POST, uri).multipart(form);
        self.send(description, uri, request, true)
    }
}

/// Map an HTTP response onto an [`OperationResult`], turning non-success
/// statuses into errors.
fn process_response(uri: &str, response: Response, changed: bool) -> UpdateResult<OperationResult> {
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("").to_string()
        } else {
            body
        };
        return Err(UpdateError::HttpStatus {
            status: status.as_u16(),
            uri: uri.to_string(),
            message,
        });
    }

    Ok(OperationResult::with_data(parse_body(&body), changed))
}

/// Empty bodies become `null`; anything that is not JSON is kept as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
