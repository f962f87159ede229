//! Client settings for the dataset hub.

use std::time::Duration;

use dsync_core::HubPortError;
use url::Url;

use crate::models::HubConfig;

/// API root of a hub running on the local machine.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// How transient failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u8,
    /// Delay before the first retry; doubled for each further one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Settings for [`DefaultHubClient`](crate::DefaultHubClient).
///
/// ```
/// use dsync_hub::HubClientConfig;
///
/// let config = HubClientConfig::new()
///     .with_base_url("https://hub.internal/api/v1")
///     .with_optional_token(std::env::var("DSYNC_TOKEN").ok());
/// ```
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    base_url: String,
    token: Option<String>,
    user_agent: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: concat!("dsync-hub/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl HubClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// API root, e.g. `https://hub.internal/api/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Like [`with_token`](Self::with_token), ignoring missing or blank values.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the settings into the client's working configuration.
    pub(crate) fn resolve(&self) -> Result<HubConfig, HubPortError> {
        let trimmed = self.base_url.trim();
        let base_url = Url::parse(trimmed).map_err(|e| HubPortError::Configuration {
            message: format!("invalid hub URL '{trimmed}': {e}"),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(HubPortError::Configuration {
                message: format!("hub URL must be http or https, got '{trimmed}'"),
            });
        }

        Ok(HubConfig {
            base_url,
            token: self.token.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            max_retries: self.retry.max_retries,
            retry_base_delay_ms: u64::try_from(self.retry.base_delay.as_millis())
                .unwrap_or(u64::MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let resolved = HubClientConfig::new().resolve().unwrap();
        assert_eq!(resolved.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(resolved.user_agent.starts_with("dsync-hub/"));
        assert_eq!(resolved.timeout, Duration::from_secs(30));
        assert_eq!(resolved.max_retries, 3);
        assert_eq!(resolved.retry_base_delay_ms, 500);
        assert!(resolved.token.is_none());
    }

    #[test]
    fn test_overrides_resolve() {
        let resolved = HubClientConfig::new()
            .with_base_url("  https://hub.internal/api/v2 ")
            .with_token("secret")
            .with_user_agent("test-agent")
            .with_retry(RetryPolicy {
                max_retries: 1,
                base_delay: Duration::from_millis(20),
            })
            .resolve()
            .unwrap();

        assert_eq!(resolved.base_url.as_str(), "https://hub.internal/api/v2");
        assert_eq!(resolved.token.as_deref(), Some("secret"));
        assert_eq!(resolved.user_agent, "test-agent");
        assert_eq!(resolved.max_retries, 1);
        assert_eq!(resolved.retry_base_delay_ms, 20);
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let config = HubClientConfig::new().with_optional_token(Some("  ".to_string()));
        assert!(config.resolve().unwrap().token.is_none());

        let config = HubClientConfig::new().with_optional_token(Some("t".to_string()));
        assert_eq!(config.resolve().unwrap().token.as_deref(), Some("t"));
    }

    #[test]
    fn test_bad_urls_are_configuration_errors() {
        for url in ["not a url", "ftp://hub.internal/api"] {
            let err = HubClientConfig::new().with_base_url(url).resolve().unwrap_err();
            assert!(matches!(err, HubPortError::Configuration { .. }), "{url}");
        }
    }
}
