//! HTTP backend abstraction for the hub API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{HubError, HubResult};
use crate::models::HubConfig;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the hub.
///
/// This is an implementation detail - external code should use the
/// `DatasetHubPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HubResult<T>;

    /// POST a JSON body and deserialize the JSON response.
    async fn post_json<T, B>(&self, url: &Url, body: &B) -> HubResult<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync;

    /// POST a JSON body and discard the response body.
    async fn post_discard<B: Serialize + Sync>(&self, url: &Url, body: &B) -> HubResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HubConfig) -> HubResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            auth_token: config.token.clone(),
        })
    }

    /// Attach optional authentication to a request.
    fn authorize(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Send a request with automatic retry for transient errors.
    ///
    /// `build` is called once per attempt so bodies can be re-sent.
    async fn send_with_retry<F>(&self, url: &Url, build: F) -> HubResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<HubError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tracing::debug!(%url, attempt, ?delay, "retrying hub request");
                tokio::time::sleep(delay).await;
            }

            let error = match self.authorize(build()).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => HubError::ApiRequestFailed {
                    status: response.status().as_u16(),
                    url: url.to_string(),
                },
                Err(e) => HubError::Network(e),
            };

            if attempt == self.max_retries || !error.is_retryable() {
                return Err(error);
            }
            tracing::warn!(%url, %error, "hub request failed");
            last_error = Some(error);
        }

        Err(last_error.unwrap_or_else(|| HubError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HubResult<T> {
        let response = self
            .send_with_retry(url, || self.client.get(url.as_str()))
            .await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_json<T, B>(&self, url: &Url, body: &B) -> HubResult<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync,
    {
        let response = self
            .send_with_retry(url, || self.client.post(url.as_str()).json(body))
            .await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_discard<B: Serialize + Sync>(&self, url: &Url, body: &B) -> HubResult<()> {
        self.send_with_retry(url, || self.client.post(url.as_str()).json(body))
            .await?;
        Ok(())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
