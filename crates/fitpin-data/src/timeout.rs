//! Timeout configuration and the combined fetch policy.

use std::time::Duration;

use crate::dependency::DependencyTag;
use crate::retry::RetryPolicy;

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout, per attempt.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: std::cmp::min(total / 4, Duration::from_secs(5)),
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(10))
    }
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Create from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        Self {
            timeout: TimeoutConfig::from_total(tag.default_timeout()),
            retry: RetryPolicy::new(tag.default_max_retries()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_caps_connect() {
        let short = TimeoutConfig::from_total(Duration::from_secs(8));
        assert_eq!(short.connect, Duration::from_secs(2));

        let long = TimeoutConfig::from_total(Duration::from_secs(120));
        assert_eq!(long.connect, Duration::from_secs(5));
    }

    #[test]
    fn test_try_on_policy_does_not_retry() {
        let policy = FetchPolicy::from_tag(DependencyTag::TryOn);
        assert_eq!(policy.retry.max_attempts, 0);
        assert_eq!(policy.timeout.total, Duration::from_secs(120));
    }
}
