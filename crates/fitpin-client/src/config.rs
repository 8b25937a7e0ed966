//! Backend endpoints and fetch tuning.

use fitpin_data::{DependencyTag, FetchClient, FetchError, TimeoutConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default data server.
pub const DEFAULT_DATA_URL: &str = "http://fitpitback.kro.kr:8080";

/// Where the backend lives and how patiently to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Data server base URL.
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// AR try-on server base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_url: Option<String>,

    /// Per-attempt timeout override, in milliseconds. Try-on keeps its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Retry budget override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            ar_url: None,
            timeout_ms: None,
            max_retries: None,
        }
    }
}

impl ApiConfig {
    /// Point at a different data server.
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }

    /// Set the AR try-on server.
    pub fn with_ar_url(mut self, url: impl Into<String>) -> Self {
        self.ar_url = Some(url.into());
        self
    }

    /// Apply the overrides to a client's policies.
    pub fn tune(&self, client: FetchClient) -> FetchClient {
        let timeout = self.timeout_ms.map(Duration::from_millis);
        let retries = self.max_retries;
        client.map_policies(|tag, policy| {
            if let Some(total) = timeout.filter(|_| tag != DependencyTag::TryOn) {
                policy.timeout = TimeoutConfig::from_total(total);
            }
            if let Some(max) = retries {
                policy.retry.max_attempts = max;
            }
        })
    }

    /// Build a `reqwest`-backed client with the overrides applied.
    pub fn fetch_client(&self) -> Result<FetchClient, FetchError> {
        Ok(self.tune(FetchClient::reqwest()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
        assert!(config.ar_url.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"ar_url":"http://ar:5000"}"#).unwrap();
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
        assert_eq!(config.ar_url.as_deref(), Some("http://ar:5000"));
    }

    #[test]
    fn test_tune_keeps_try_on_timeout() {
        let config = ApiConfig {
            timeout_ms: Some(3_000),
            max_retries: Some(0),
            ..ApiConfig::default()
        };
        let client = config.fetch_client().unwrap();

        let catalog = client.policy(DependencyTag::Catalog);
        assert_eq!(catalog.timeout.total, Duration::from_secs(3));
        assert_eq!(catalog.retry.max_attempts, 0);

        let try_on = client.policy(DependencyTag::TryOn);
        assert_eq!(try_on.timeout.total, DependencyTag::TryOn.default_timeout());
    }
}
