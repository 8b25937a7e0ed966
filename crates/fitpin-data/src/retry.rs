//! Retry budget and backoff.
//!
//! A failed attempt is retried when the method is idempotent, the budget is
//! not spent, and the failure is transient: a 5xx answer, a timeout, or a
//! refused connection. Anything else is returned to the caller as is.

use std::time::Duration;

use crate::error::FetchError;
use crate::request::Method;
use crate::response::Response;

/// Exponential delay between attempts, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Delay before the first retry.
    pub base: Duration,
    /// Upper bound for any single delay.
    pub max: Duration,
}

impl Backoff {
    /// Retry immediately.
    pub const NONE: Backoff = Backoff {
        base: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }

    /// Delay before retry number `retry` (0 for the first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base.saturating_mul(factor).min(self.max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(200), Duration::from_secs(2))
    }
}

/// A transient failure worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transient {
    /// The server answered 5xx.
    ServerError(u16),
    /// The attempt ran past its timeout.
    Timeout,
    /// The connection could not be made.
    Connection,
}

impl Transient {
    /// Classify the result of one attempt. `None` means final.
    pub fn classify(result: &Result<Response, FetchError>) -> Option<Self> {
        match result {
            Ok(resp) if resp.is_server_error() => Some(Transient::ServerError(resp.status)),
            Ok(_) => None,
            Err(FetchError::Timeout) => Some(Transient::Timeout),
            Err(FetchError::Connection(_)) => Some(Transient::Connection),
            Err(_) => None,
        }
    }
}

/// How many times to retry, and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::default(),
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: Backoff::NONE,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay before the next attempt, or `None` when `result` is final.
    ///
    /// `retries_done` counts retries already made for this request.
    pub fn next_delay(
        &self,
        method: Method,
        result: &Result<Response, FetchError>,
        retries_done: u32,
    ) -> Option<Duration> {
        if !method.is_idempotent() || retries_done >= self.max_attempts {
            return None;
        }
        Transient::classify(result).map(|_| self.backoff.delay(retries_done))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}
