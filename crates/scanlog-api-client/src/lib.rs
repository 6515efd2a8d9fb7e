//! HTTP client for the scan service.
//!
//! Provides a minimal client over the `/scans` REST resource: generic
//! GET/POST/DELETE helpers that normalize failures into [`ScanError`], and the
//! domain operations in [`api`] behind the [`ScanApi`] trait. The capture
//! workflow, the history list and the CLI all take the client by injection.

pub mod api;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use scanlog_core::constants::REQUEST_TIMEOUT;
use scanlog_core::{ClientConfig, ScanError, ScanResult};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use api::ScanApi;

/// HTTP client for the scan service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    initialized: Arc<AtomicBool>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ScanResult<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ScanResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            initialized: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ScanResult<Self> {
        config.validate()?;
        Self::with_timeout(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Flip the one-time setup flag. Returns true only on the first call.
    fn mark_initialized(&self) -> bool {
        !self.initialized.swap(true, Ordering::SeqCst)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn send(&self, request: RequestBuilder) -> ScanResult<Response> {
        request
            .send()
            .await
            .map_err(|e| ScanError::transport(e.to_string()))
    }

    /// Turn a non-success response into a network error carrying its body text.
    async fn ensure_success(response: Response) -> ScanResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ScanError::http_status(status.as_u16(), body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ScanResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScanError::transport(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ScanResult<T> {
        let request = self.client.get(self.build_url(path));
        let response = Self::ensure_success(self.send(request).await?).await?;
        Self::read_json(response).await
    }

    /// GET request where 404 means "absent" rather than an error.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ScanResult<Option<T>> {
        let request = self.client.get(self.build_url(path));
        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        Self::read_json(response).await.map(Some)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ScanResult<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = Self::ensure_success(self.send(request).await?).await?;
        Self::read_json(response).await
    }

    /// DELETE request. Returns Ok(()) on any 2xx; the body is ignored.
    pub async fn delete(&self, path: &str) -> ScanResult<()> {
        let request = self.client.delete(self.build_url(path));
        Self::ensure_success(self.send(request).await?).await?;
        Ok(())
    }
}
