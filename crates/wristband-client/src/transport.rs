//! HTTP transport used by the rally client.

use crate::error::RallyError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Raw HTTP reply. The status is reported, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and hands back the raw response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST to `url`. A `Some` body is sent as JSON with
    /// `Content-Type: application/json`.
    async fn post(&self, url: &str, body: Option<Value>) -> Result<HttpResponse, RallyError>;

    /// GET `url`.
    async fn get(&self, url: &str) -> Result<HttpResponse, RallyError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport without a request timeout.
    pub fn new() -> Result<Self, RallyError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Create a transport that aborts requests after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RallyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, RallyError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: Option<Value>) -> Result<HttpResponse, RallyError> {
        let mut request = self.client.post(url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::read(response).await
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, RallyError> {
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }
}
