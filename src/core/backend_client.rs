// src/core/backend_client.rs
//! HTTP client for the platform REST backend

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

use crate::app_log;
use crate::core::config_manager::BackendConfig;
use crate::utils::join_url;

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create new backend client with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Existence check: issues a HEAD request and reports the status without reading a body
    pub async fn head(&self, endpoint: &str, token: &str) -> Result<StatusCode> {
        let url = join_url(&self.base_url, endpoint);
        app_log!(trace, "HEAD {}", url);

        let response = self
            .client
            .head(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to HEAD {}", url))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);
        Ok(status)
    }

    /// Authenticated GET request with query parameters.
    ///
    /// A non-success status yields `Ok(None)` after logging the body; only
    /// transport and decoding failures are errors.
    pub async fn get_json_if_ok<R>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        token: &str,
    ) -> Result<Option<R>>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = join_url(&self.base_url, endpoint);
        app_log!(trace, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .map(Some)
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(warn, "GET {} returned HTTP {}: {}", url, status, error_text);
            Ok(None)
        }
    }
}
