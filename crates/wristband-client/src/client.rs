//! Rally server HTTP client.

use crate::error::RallyError;
use crate::transport::{HttpResponse, HttpTransport, Transport};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Client for the wristband rally server.
///
/// Holds the base URL and a shared transport; cloning is cheap and clones
/// can issue requests concurrently.
#[derive(Clone)]
pub struct RallyClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl RallyClient {
    /// Create a client over HTTP with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RallyError> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }

    /// Create a client over HTTP whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RallyError> {
        Ok(Self::with_transport(
            base_url,
            HttpTransport::with_timeout(timeout)?,
        ))
    }

    /// Create a client over any transport.
    pub fn with_transport(base_url: impl Into<String>, transport: impl Transport + 'static) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            transport: Arc::new(transport),
            base_url,
        }
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register an email address against a wristband tag.
    ///
    /// Resolves with whatever the server sent back, whatever the HTTP status.
    /// Fails only when the request cannot be completed or the body is not
    /// a JSON object of the expected shape.
    #[instrument(skip(self, email))]
    pub async fn register_email(
        &self,
        tag_id: &str,
        email: &str,
    ) -> Result<RegistrationResult, RallyError> {
        let url = format!("{}/email/{}", self.base_url, encode(tag_id));
        let request = EmailRegistration {
            email: email.to_string(),
        };

        debug!(url = %url, "Submitting email");

        let response = self
            .transport
            .post(&url, Some(serde_json::to_value(&request)?))
            .await?;

        decode(&url, response)
    }

    /// Register a freshly dispensed wristband tag.
    #[instrument(skip(self))]
    pub async fn register_tag(&self, tag_id: &str) -> Result<Acknowledgement, RallyError> {
        let url = format!("{}/register", self.base_url);
        let request = TagRegistration {
            tag_id: tag_id.to_string(),
        };

        debug!(url = %url, "Registering tag");

        let response = self
            .transport
            .post(&url, Some(serde_json::to_value(&request)?))
            .await?;

        decode(&url, response)
    }

    /// Record that a tag reached a flag station.
    #[instrument(skip(self))]
    pub async fn collect_flag(
        &self,
        tag_id: &str,
        station: u32,
    ) -> Result<Acknowledgement, RallyError> {
        let url = format!("{}/flag/{}/{}", self.base_url, encode(tag_id), station);

        debug!(url = %url, "Collecting flag");

        let response = self.transport.post(&url, None).await?;
        decode(&url, response)
    }

    /// Fetch rally statistics.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<RallyStats, RallyError> {
        let url = format!("{}/stats", self.base_url);
        let response = self.transport.get(&url).await?;
        decode(&url, response)
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: HttpResponse) -> Result<T, RallyError> {
    if !response.is_success() {
        let body = String::from_utf8_lossy(&response.body);
        warn!(url = %url, status = response.status, body = %body, "Rally server returned an error status");
    }

    Ok(serde_json::from_slice(&response.body)?)
}
