//! HTTP client for the internet users API.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::RemoteError;

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base route, e.g. `https://api.example.org/api`.
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Shared reqwest client bound to one base route.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &HttpConfig) -> Result<Self, RemoteError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RemoteError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/internet`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL of a single resource, with `id` encoded as one path segment.
    pub fn resource_url(&self, collection: &str, id: &str) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.url(collection))
            .map_err(|_| RemoteError::InvalidBaseUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidBaseUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    /// Fail on a non-success status, keeping the body for diagnostics.
    pub async fn check(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "API returned error status");
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Check the status and decode a JSON body.
    pub async fn decode<T: DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> Result<T, RemoteError> {
        let response = Self::check(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RemoteError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}
